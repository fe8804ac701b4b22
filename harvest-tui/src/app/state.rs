use harvest::domain::{number_text, EntryDraft, RowModel};
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Table,
    SelectSource,
    Form,
}

/// Single-line text buffer with a byte cursor that always sits on a char
/// boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.replace_range(idx..self.cursor, "");
            self.cursor = idx;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// (before cursor, after cursor)
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }
}

/// Editable cells of one form row, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Plot,
    Kind,
    RawWeight,
    FinishedWeight,
    SurfaceArea,
    Cut,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Plot,
        FormField::Kind,
        FormField::RawWeight,
        FormField::FinishedWeight,
        FormField::SurfaceArea,
        FormField::Cut,
    ];

    /// Cycled with Left/Right rather than typed into.
    pub fn is_selector(self) -> bool {
        matches!(self, FormField::Plot | FormField::Kind | FormField::Cut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Date,
    Row { row: usize, field: FormField },
}

/// Text typed into the numeric inputs of one row. The parsed values live in
/// the row model; these keep exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowInputs {
    pub raw_weight: TextInput,
    pub finished_weight: TextInput,
    pub surface_area: TextInput,
}

impl RowInputs {
    pub fn from_draft(draft: &EntryDraft) -> Self {
        let text = |value: Option<f64>| TextInput::from_str(&value.map(number_text).unwrap_or_default());
        Self {
            raw_weight: text(draft.raw_weight),
            finished_weight: text(draft.finished_weight),
            surface_area: text(draft.surface_area),
        }
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::RawWeight => Some(&self.raw_weight),
            FormField::FinishedWeight => Some(&self.finished_weight),
            FormField::SurfaceArea => Some(&self.surface_area),
            _ => None,
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::RawWeight => Some(&mut self.raw_weight),
            FormField::FinishedWeight => Some(&mut self.finished_weight),
            FormField::SurfaceArea => Some(&mut self.surface_area),
            _ => None,
        }
    }
}

/// Terminal-side state of the open entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub date_input: TextInput,
    pub rows: Vec<RowInputs>,
    pub focus: FormFocus,
}

impl FormState {
    pub fn new(date: Option<Date>, model: &RowModel) -> Self {
        let date_text = date
            .map(harvest::domain::iso_date_text)
            .unwrap_or_default();
        Self {
            date_input: TextInput::from_str(&date_text),
            rows: model.drafts().iter().map(RowInputs::from_draft).collect(),
            focus: FormFocus::Row {
                row: 0,
                field: FormField::Plot,
            },
        }
    }

    pub fn focused_row(&self) -> Option<usize> {
        match self.focus {
            FormFocus::Row { row, .. } => Some(row),
            FormFocus::Date => None,
        }
    }

    /// Every focusable position in tab order. The finished weight of a raw
    /// draft is disabled and skipped.
    pub fn focus_order(model: &RowModel) -> Vec<FormFocus> {
        let mut order = vec![FormFocus::Date];
        for (row, draft) in model.drafts().iter().enumerate() {
            for field in FormField::ORDER {
                if field == FormField::FinishedWeight && draft.kind.is_raw() {
                    continue;
                }
                order.push(FormFocus::Row { row, field });
            }
        }
        order
    }
}

/// Cursor and filter editing state of the history table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub focused_column: usize,
    /// `Some` while the filter of `focused_column` is being typed.
    pub filter_input: Option<TextInput>,
    pub scroll: usize,
}
