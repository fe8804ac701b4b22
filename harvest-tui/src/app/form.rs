use harvest::domain::{
    number_text, parse_input_date, parse_leading_number, CatalogValue, DraftField, RowModel,
};
use time::Date;

use super::state::{FormField, FormFocus, FormState, RowInputs, TextInput, View};
use super::App;

impl App {
    /// Open the entry form with one default row, dated `date`.
    pub fn open_form(&mut self, date: Date) {
        self.workbench.open_form(Some(date));
        self.form = self
            .workbench
            .form()
            .map(|model| FormState::new(Some(date), model));
        self.navigate_to(View::Form);
    }

    pub fn cancel_form(&mut self) {
        self.workbench.close_form();
        self.form = None;
        self.navigate_to(View::Table);
    }

    pub fn form_focus(&self) -> Option<FormFocus> {
        self.form.as_ref().map(|form| form.focus)
    }

    pub fn form_next_field(&mut self) {
        self.move_form_focus(true);
    }

    pub fn form_previous_field(&mut self) {
        self.move_form_focus(false);
    }

    fn move_form_focus(&mut self, forward: bool) {
        let (Some(form), Some(model)) = (self.form.as_mut(), self.workbench.form()) else {
            return;
        };
        let order = FormState::focus_order(model);
        let current = order.iter().position(|f| *f == form.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        form.focus = order[next];
    }

    /// Text input under the cursor, if the focused field takes text.
    fn focused_input(&mut self) -> Option<&mut TextInput> {
        let form = self.form.as_mut()?;
        match form.focus {
            FormFocus::Date => Some(&mut form.date_input),
            FormFocus::Row { row, field } => form.rows.get_mut(row)?.input_mut(field),
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        let is_date = self.form_focus() == Some(FormFocus::Date);
        let accepted = if is_date {
            c.is_ascii_digit() || c == '-'
        } else {
            c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
        };
        if !accepted {
            return;
        }
        if let Some(input) = self.focused_input() {
            input.insert(c);
            self.commit_focused_input();
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.backspace();
            self.commit_focused_input();
        }
    }

    pub fn form_cursor_home_end(&mut self, home: bool) {
        if let Some(input) = self.focused_input() {
            if home {
                input.home();
            } else {
                input.end();
            }
        }
    }

    /// Left/Right: cycle a selector, or move the text cursor.
    pub fn form_left_right(&mut self, forward: bool) {
        match self.form_focus() {
            Some(FormFocus::Row { row, field }) if field.is_selector() => {
                self.cycle_selector(row, field, forward);
            }
            Some(_) => {
                if let Some(input) = self.focused_input() {
                    if forward {
                        input.move_right();
                    } else {
                        input.move_left();
                    }
                }
            }
            None => {}
        }
    }

    fn cycle_selector(&mut self, row: usize, field: FormField, forward: bool) {
        let Some(draft) = self.workbench.form().and_then(|model| model.draft(row)) else {
            return;
        };
        let change = match field {
            FormField::Plot => DraftField::Plot(cycled(draft.plot, forward)),
            FormField::Kind => DraftField::Kind(cycled(draft.kind, forward)),
            FormField::Cut => DraftField::Cut(cycled(draft.cut, forward)),
            _ => return,
        };

        self.workbench.update_draft_field(row, change);
        if field == FormField::Kind {
            self.sync_finished_input(row);
        }
    }

    /// Re-read the finished weight after a kind change; raw kinds force it
    /// to zero.
    fn sync_finished_input(&mut self, row: usize) {
        let finished = self
            .workbench
            .form()
            .and_then(|model| model.draft(row))
            .and_then(|draft| draft.finished_weight);
        if let Some(inputs) = self.form.as_mut().and_then(|form| form.rows.get_mut(row)) {
            inputs.finished_weight =
                TextInput::from_str(&finished.map(number_text).unwrap_or_default());
        }
    }

    /// Push the focused buffer into the row model.
    fn commit_focused_input(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        match form.focus {
            FormFocus::Date => {
                let date = parse_input_date(&form.date_input.value);
                self.workbench.set_form_date(date);
            }
            FormFocus::Row { row, field } => {
                let Some(value) = form
                    .rows
                    .get(row)
                    .and_then(|inputs| inputs.input(field))
                    .map(|input| parse_leading_number(&input.value))
                else {
                    return;
                };
                let change = match field {
                    FormField::RawWeight => DraftField::RawWeight(value),
                    FormField::FinishedWeight => DraftField::FinishedWeight(value),
                    FormField::SurfaceArea => DraftField::SurfaceArea(value),
                    _ => return,
                };
                self.workbench.update_draft_field(row, change);
            }
        }
    }

    /// Append a row copied from the last one and focus it.
    pub fn form_add_row(&mut self) {
        if !self.workbench.add_draft() {
            return;
        }
        let Some(model) = self.workbench.form() else {
            return;
        };
        let row = model.len() - 1;
        let inputs = model.draft(row).map(RowInputs::from_draft).unwrap_or_default();
        if let Some(form) = self.form.as_mut() {
            form.rows.push(inputs);
            form.focus = FormFocus::Row {
                row,
                field: FormField::Plot,
            };
        }
    }

    /// Remove the focused row. The last remaining row stays.
    pub fn form_remove_focused_row(&mut self) {
        let Some(row) = self.form.as_ref().and_then(FormState::focused_row) else {
            return;
        };
        if !self.workbench.remove_draft(row) {
            return;
        }
        if let Some(form) = self.form.as_mut() {
            form.rows.remove(row);
            form.focus = FormFocus::Row {
                row: row.min(form.rows.len().saturating_sub(1)),
                field: FormField::Plot,
            };
        }
    }

    pub fn form_model(&self) -> Option<&RowModel> {
        self.workbench.form()
    }

    /// Forget the form after a successful submission.
    pub fn finish_form(&mut self) {
        self.form = None;
        if self.current_view == View::Form {
            self.navigate_to(View::Table);
        }
    }
}

fn cycled<T: CatalogValue>(value: T, forward: bool) -> T {
    if forward {
        value.next()
    } else {
        value.previous()
    }
}
