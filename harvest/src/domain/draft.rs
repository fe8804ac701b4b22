use time::Date;

use super::{iso_week_number, Cut, Kind, Plot};

/// An unsaved entry being edited in the form. `None` measures are empty
/// inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub plot: Plot,
    pub kind: Kind,
    pub raw_weight: Option<f64>,
    pub finished_weight: Option<f64>,
    pub surface_area: Option<f64>,
    pub cut: Cut,
    pub week_number: u8,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            plot: Plot::default(),
            kind: Kind::Raw,
            raw_weight: None,
            // Raw drafts always carry a finished weight of zero.
            finished_weight: Some(0.0),
            surface_area: None,
            cut: Cut::default(),
            week_number: 0,
        }
    }
}

impl EntryDraft {
    /// True when both required measures are filled in.
    pub fn is_complete(&self) -> bool {
        self.raw_weight.is_some() && self.surface_area.is_some()
    }
}

/// A single field change on a draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftField {
    Plot(Plot),
    Kind(Kind),
    RawWeight(Option<f64>),
    FinishedWeight(Option<f64>),
    SurfaceArea(Option<f64>),
    Cut(Cut),
}

/// The ordered list of drafts shown in the entry form, plus the date they
/// share. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    drafts: Vec<EntryDraft>,
    date: Option<Date>,
}

impl Default for RowModel {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RowModel {
    pub fn new(date: Option<Date>) -> Self {
        let mut model = Self {
            drafts: Vec::new(),
            date,
        };
        model.reset();
        model
    }

    pub fn drafts(&self) -> &[EntryDraft] {
        &self.drafts
    }

    pub fn draft(&self, index: usize) -> Option<&EntryDraft> {
        self.drafts.get(index)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// Week number shared by every draft, 0 until a date is chosen.
    pub fn week_number(&self) -> u8 {
        self.date.map(iso_week_number).unwrap_or(0)
    }

    /// Replace all drafts with a single default one.
    pub fn reset(&mut self) {
        self.drafts = vec![EntryDraft {
            week_number: self.week_number(),
            ..EntryDraft::default()
        }];
    }

    /// Append a copy of the last draft with its measures cleared.
    pub fn add_row(&mut self) {
        let last = self.drafts.last().cloned().unwrap_or_default();
        self.drafts.push(EntryDraft {
            raw_weight: None,
            finished_weight: if last.kind.is_raw() { Some(0.0) } else { None },
            surface_area: None,
            ..last
        });
    }

    /// Remove the draft at `index`. The last remaining draft is never
    /// removed. Returns whether a draft was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.drafts.len() <= 1 || index >= self.drafts.len() {
            return false;
        }
        self.drafts.remove(index);
        true
    }

    /// Apply `field` to the draft at `index`. Returns false when there is no
    /// such draft.
    pub fn update_field(&mut self, index: usize, field: DraftField) -> bool {
        let Some(draft) = self.drafts.get_mut(index) else {
            return false;
        };

        match field {
            DraftField::Plot(plot) => draft.plot = plot,
            DraftField::Kind(kind) => {
                draft.kind = kind;
                if kind.is_raw() {
                    draft.finished_weight = Some(0.0);
                }
            }
            DraftField::RawWeight(value) => draft.raw_weight = value,
            // The finished input is disabled for raw drafts.
            DraftField::FinishedWeight(_) if draft.kind.is_raw() => {}
            DraftField::FinishedWeight(value) => draft.finished_weight = value,
            DraftField::SurfaceArea(value) => draft.surface_area = value,
            DraftField::Cut(cut) => draft.cut = cut,
        }
        true
    }

    /// Change the shared date. Choosing a date recomputes every draft's week
    /// number; clearing it leaves the week numbers alone.
    pub fn set_date(&mut self, date: Option<Date>) {
        self.date = date;
        if let Some(date) = date {
            let week = iso_week_number(date);
            for draft in &mut self.drafts {
                draft.week_number = week;
            }
        }
    }

    /// 1-based position of the first draft missing a required measure.
    pub fn first_incomplete_row(&self) -> Option<usize> {
        self.drafts
            .iter()
            .position(|draft| !draft.is_complete())
            .map(|idx| idx + 1)
    }
}
