use thiserror::Error;
use time::Date;
use tracing::instrument;

use crate::domain::{DataSource, EntryDraft, SubmittedEntry};
use crate::ports::{Notifier, SheetStore};

/// Input problems caught before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Veuillez sélectionner une date")]
    MissingDate,
    #[error("Veuillez sélectionner une feuille Google")]
    MissingSource,
    #[error("Veuillez remplir tous les champs obligatoires à la ligne {row}")]
    IncompleteRow { row: usize },
    #[error("Aucun formulaire ouvert")]
    FormClosed,
}

/// Which half of a draft's processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Persist,
    Notify,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Processing stopped at `row` (1-based); the `submitted` drafts before
    /// it were written and announced.
    #[error("Erreur lors de l'ajout des données")]
    Halted {
        submitted: usize,
        row: usize,
        stage: SubmitStage,
        cause: String,
    },
    #[error("Une soumission est déjà en cours")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReport {
    pub submitted: usize,
}

impl SubmitReport {
    pub fn message(&self) -> String {
        format!("{} entrées ajoutées avec succès", self.submitted)
    }
}

/// Check the form and turn every draft into a [`SubmittedEntry`]. Nothing is
/// sent when this fails.
pub fn validate_drafts<'a>(
    source: Option<&'a DataSource>,
    date: Option<Date>,
    drafts: &[EntryDraft],
) -> Result<(&'a DataSource, Vec<SubmittedEntry>), ValidationError> {
    let date = date.ok_or(ValidationError::MissingDate)?;
    let source = source.ok_or(ValidationError::MissingSource)?;

    let entries = drafts
        .iter()
        .enumerate()
        .map(|(idx, draft)| {
            SubmittedEntry::from_draft(date, draft)
                .ok_or(ValidationError::IncompleteRow { row: idx + 1 })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((source, entries))
}

/// Validate, then write and announce each draft in order. The next draft is
/// only started once the previous one is both persisted and notified; the
/// first failure stops the run.
///
/// Not idempotent: re-running after a partial failure writes the earlier
/// drafts again.
#[instrument(skip_all, fields(source = source.map(|s| s.name.as_str()).unwrap_or(""), drafts = drafts.len()))]
pub async fn submit_drafts<S, N>(
    store: &S,
    notifier: &N,
    source: Option<&DataSource>,
    date: Option<Date>,
    drafts: &[EntryDraft],
) -> Result<SubmitReport, SubmitError>
where
    S: SheetStore + ?Sized,
    N: Notifier + ?Sized,
{
    let (source, entries) = validate_drafts(source, date, drafts)?;

    for (idx, entry) in entries.iter().enumerate() {
        let row = idx + 1;

        if let Err(e) = store.append_entry(source, entry).await {
            tracing::warn!(row, error = %e, "sheet write failed, stopping");
            return Err(SubmitError::Halted {
                submitted: idx,
                row,
                stage: SubmitStage::Persist,
                cause: e.to_string(),
            });
        }

        if let Err(e) = notifier.notify(entry).await {
            tracing::warn!(row, error = %e, "notification failed, stopping");
            return Err(SubmitError::Halted {
                submitted: idx,
                row,
                stage: SubmitStage::Notify,
                cause: e.to_string(),
            });
        }

        tracing::info!(row, plot = %entry.plot, kind = %entry.kind, "entry submitted");
    }

    Ok(SubmitReport {
        submitted: entries.len(),
    })
}
