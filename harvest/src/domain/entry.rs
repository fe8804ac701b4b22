use time::Date;

use super::{iso_date_text, number_text, Cut, DerivedMetrics, EntryDraft, Kind, Plot};

/// A validated draft ready to be written to the sheet and announced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedEntry {
    pub date: Date,
    pub plot: Plot,
    pub kind: Kind,
    pub raw_weight: f64,
    pub finished_weight: f64,
    pub surface_area: f64,
    pub cut: Cut,
    pub week_number: u8,
    pub metrics: DerivedMetrics,
}

impl SubmittedEntry {
    /// Build the entry for `draft`, or `None` if a required measure is
    /// missing. An empty finished weight counts as zero.
    pub fn from_draft(date: Date, draft: &EntryDraft) -> Option<Self> {
        let raw_weight = draft.raw_weight?;
        let surface_area = draft.surface_area?;
        let finished_weight = if draft.kind.is_raw() {
            0.0
        } else {
            draft.finished_weight.unwrap_or(0.0)
        };

        Some(Self {
            date,
            plot: draft.plot,
            kind: draft.kind,
            raw_weight,
            finished_weight,
            surface_area,
            cut: draft.cut,
            week_number: draft.week_number,
            metrics: DerivedMetrics::compute(draft.kind, raw_weight, finished_weight, surface_area),
        })
    }

    pub fn date_text(&self) -> String {
        iso_date_text(self.date)
    }

    /// Markdown chat message announcing this entry. Finished kinds add the
    /// finished weight, its ratio and the loss.
    pub fn notification_text(&self) -> String {
        let mut text = format!(
            "📅 *Date* : {}\n\
             🌱 *Parcelle* : {}\n\
             📦 *Type* : {}\n\
             🌾 *Superficie* : {} m²\n\
             ⚖️ *Brut* : {} kg\n\
             📊 *R. Brut* : {} kg/m²\n",
            self.date_text(),
            self.plot,
            self.kind,
            number_text(self.surface_area),
            number_text(self.raw_weight),
            self.metrics.raw_ratio,
        );

        if !self.kind.is_raw() {
            text.push_str(&format!(
                "✅ *Fini* : {} kg\n\
                 📊 *R. Fini* : {} kg/m²\n\
                 📉 *Écart* : {}",
                number_text(self.finished_weight),
                self.metrics.finished_ratio,
                self.metrics.loss_percent,
            ));
        }

        text
    }
}
