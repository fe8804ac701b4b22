use thiserror::Error;
use time::Date;

use crate::domain::{ColumnFilters, DataSource, Dataset, DraftField, RowModel, TableView};
use crate::pipeline::{submit_drafts, SubmitError, SubmitReport, ValidationError};
use crate::ports::{Notifier, SheetError, SheetStore};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Veuillez sélectionner une feuille Google")]
    NoSource,
    /// The sheet answered with `status: "error"`.
    #[error("{0}")]
    Backend(String),
    #[error("Impossible de charger les données de la feuille")]
    Unavailable(String),
}

impl From<SheetError> for LoadError {
    fn from(e: SheetError) -> Self {
        match e {
            SheetError::Backend(message) => LoadError::Backend(message),
            other => LoadError::Unavailable(other.to_string()),
        }
    }
}

/// Result of a successful submission. The reload that follows is best
/// effort: its failure does not undo the submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub report: SubmitReport,
    pub reload: Result<(), LoadError>,
}

/// Everything the user is working on: the configured sources, the loaded
/// dataset with its filters, and the entry form when it is open.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    sources: Vec<DataSource>,
    selected: Option<usize>,
    dataset: Dataset,
    /// Source the current dataset was loaded from.
    loaded_from: Option<usize>,
    filters: ColumnFilters,
    form: Option<RowModel>,
}

impl Workbench {
    /// The first source, if any, starts selected.
    pub fn new(sources: Vec<DataSource>) -> Self {
        let selected = if sources.is_empty() { None } else { Some(0) };
        Self {
            sources,
            selected,
            ..Self::default()
        }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    /// Select the source at `index`. Returns false for an unknown index.
    pub fn select_source(&mut self, index: usize) -> bool {
        if index >= self.sources.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_source(&self) -> Option<&DataSource> {
        self.selected.and_then(|idx| self.sources.get(idx))
    }

    /// Fetch the selected source. A successful load replaces the dataset and
    /// drops every filter; a failed one leaves the current dataset alone.
    pub async fn load_dataset<S>(&mut self, store: &S) -> Result<(), LoadError>
    where
        S: SheetStore + ?Sized,
    {
        let index = self.selected.ok_or(LoadError::NoSource)?;
        let source = self.sources.get(index).ok_or(LoadError::NoSource)?;

        let dataset = store.fetch_dataset(source).await.map_err(|e| {
            tracing::warn!(source = %source.name, error = %e, "failed to load sheet");
            LoadError::from(e)
        })?;

        tracing::info!(source = %source.name, rows = dataset.rows.len(), "dataset loaded");
        self.dataset = dataset;
        self.loaded_from = Some(index);
        self.filters.clear();
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Open the form with a single default draft dated `date`. An already
    /// open form is reset.
    pub fn open_form(&mut self, date: Option<Date>) {
        self.form = Some(RowModel::new(date));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&RowModel> {
        self.form.as_ref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn add_draft(&mut self) -> bool {
        match self.form.as_mut() {
            Some(form) => {
                form.add_row();
                true
            }
            None => false,
        }
    }

    pub fn remove_draft(&mut self, index: usize) -> bool {
        self.form
            .as_mut()
            .is_some_and(|form| form.remove_row(index))
    }

    pub fn update_draft_field(&mut self, index: usize, field: DraftField) -> bool {
        self.form
            .as_mut()
            .is_some_and(|form| form.update_field(index, field))
    }

    pub fn set_form_date(&mut self, date: Option<Date>) {
        if let Some(form) = self.form.as_mut() {
            form.set_date(date);
        }
    }

    /// Submit every draft of the open form. On success the form is closed
    /// and the dataset reloaded; on failure the form stays as it was.
    pub async fn submit<S, N>(&mut self, store: &S, notifier: &N) -> Result<SubmitOutcome, SubmitError>
    where
        S: SheetStore + ?Sized,
        N: Notifier + ?Sized,
    {
        let form = self.form.as_ref().ok_or(ValidationError::FormClosed)?;
        let report = submit_drafts(
            store,
            notifier,
            self.selected_source(),
            form.date(),
            form.drafts(),
        )
        .await?;

        self.close_form();
        let reload = self.load_dataset(store).await;
        Ok(SubmitOutcome { report, reload })
    }

    /// Set the filter text for `column`. Empty text removes the filter.
    pub fn apply_filter(&mut self, column: usize, text: &str) {
        self.filters.set(column, text);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &ColumnFilters {
        &self.filters
    }

    /// Table for the loaded dataset under the current filters. `None` means
    /// there is nothing to show.
    pub fn table_view(&self) -> Option<TableView> {
        let title = self
            .loaded_from
            .and_then(|idx| self.sources.get(idx))
            .map(|source| source.name.as_str())
            .unwrap_or_default();
        TableView::build(title, &self.dataset, &self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Kind;
    use crate::ports::mock::{MockNotifier, MockSheet};
    use time::macros::date;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn dataset() -> Dataset {
        Dataset {
            headers: row(&["DATE", "PARCELLE", "TYPE", "BRUT", "FINI", "SUPERFICIE"]),
            rows: vec![
                row(&["2024-01-05", "P40 CEBOLLINO", "BRUT", "100", "0", "50"]),
                row(&["2024-02-01", "P41 CEBOLLINO", "BRUT", "10", "0", "5"]),
            ],
        }
    }

    fn workbench() -> Workbench {
        Workbench::new(vec![
            DataSource::new("Inventaire", "https://sheet.example/a"),
            DataSource::new("Archive", "https://sheet.example/b"),
        ])
    }

    fn fill_first_draft(bench: &mut Workbench) {
        bench.update_draft_field(0, DraftField::RawWeight(Some(12.0)));
        bench.update_draft_field(0, DraftField::SurfaceArea(Some(3.0)));
    }

    #[test]
    fn first_source_starts_selected() {
        let bench = workbench();
        assert_eq!(bench.selected_source().unwrap().name, "Inventaire");
        assert!(Workbench::new(Vec::new()).selected_source().is_none());
    }

    #[test]
    fn select_source_rejects_unknown_index() {
        let mut bench = workbench();
        assert!(bench.select_source(1));
        assert!(!bench.select_source(2));
        assert_eq!(bench.selected_source().unwrap().name, "Archive");
    }

    #[tokio::test]
    async fn load_replaces_dataset_and_resets_filters() {
        let sheet = MockSheet::returning(dataset());
        let mut bench = workbench();
        bench.apply_filter(0, "2024-01");

        bench.load_dataset(&sheet).await.unwrap();

        assert_eq!(bench.dataset(), &dataset());
        assert!(bench.filters().is_empty());
        let view = bench.table_view().unwrap();
        assert_eq!(view.title, "Inventaire");
        assert_eq!(view.rows.len(), 2);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_dataset() {
        let sheet = MockSheet::returning(dataset());
        let mut bench = workbench();
        bench.load_dataset(&sheet).await.unwrap();
        bench.apply_filter(1, "p41");

        sheet.set_fetch_result(Err(SheetError::ResponseError("timeout".to_string())));
        let err = bench.load_dataset(&sheet).await.unwrap_err();

        assert_eq!(err.to_string(), "Impossible de charger les données de la feuille");
        assert_eq!(bench.dataset(), &dataset());
        assert_eq!(bench.filters().get(1), "p41");
    }

    #[tokio::test]
    async fn backend_error_message_is_surfaced() {
        let sheet = MockSheet::new();
        sheet.set_fetch_result(Err(SheetError::Backend("Feuille introuvable".to_string())));
        let mut bench = workbench();

        let err = bench.load_dataset(&sheet).await.unwrap_err();
        assert_eq!(err.to_string(), "Feuille introuvable");
    }

    #[tokio::test]
    async fn loading_without_source_fails_without_fetching() {
        let sheet = MockSheet::new();
        let mut bench = Workbench::new(Vec::new());
        assert_eq!(bench.load_dataset(&sheet).await, Err(LoadError::NoSource));
        assert_eq!(sheet.fetch_calls(), 0);
    }

    #[test]
    fn empty_dataset_has_no_table() {
        assert!(workbench().table_view().is_none());
    }

    #[test]
    fn form_operations_require_an_open_form() {
        let mut bench = workbench();
        assert!(!bench.add_draft());
        assert!(!bench.update_draft_field(0, DraftField::Kind(Kind::FinishedUnit)));

        bench.open_form(Some(date!(2024 - 03 - 14)));
        assert!(bench.add_draft());
        assert_eq!(bench.form().unwrap().len(), 2);
        assert_eq!(bench.form().unwrap().drafts()[1].week_number, 11);

        bench.open_form(Some(date!(2024 - 03 - 14)));
        assert_eq!(bench.form().unwrap().len(), 1);

        bench.close_form();
        assert!(bench.form().is_none());
    }

    #[test]
    fn form_date_propagates_week_number() {
        let mut bench = workbench();
        bench.open_form(None);
        bench.add_draft();
        bench.set_form_date(Some(date!(2025 - 01 - 01)));
        assert!(bench
            .form()
            .unwrap()
            .drafts()
            .iter()
            .all(|draft| draft.week_number == 1));
    }

    #[tokio::test]
    async fn successful_submit_closes_form_and_reloads() {
        let sheet = MockSheet::returning(dataset());
        let notifier = MockNotifier::new();
        let mut bench = workbench();
        bench.open_form(Some(date!(2024 - 04 - 03)));
        fill_first_draft(&mut bench);

        let outcome = bench.submit(&sheet, &notifier).await.unwrap();

        assert_eq!(outcome.report.submitted, 1);
        assert_eq!(outcome.reload, Ok(()));
        assert!(!bench.is_form_open());
        assert_eq!(sheet.fetch_calls(), 1);
        assert_eq!(bench.dataset(), &dataset());
        assert_eq!(sheet.appended()[0].week_number, 14);
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_form_and_skips_reload() {
        let sheet = MockSheet::new().failing_append_at(0);
        let notifier = MockNotifier::new();
        let mut bench = workbench();
        bench.open_form(Some(date!(2024 - 04 - 03)));
        fill_first_draft(&mut bench);

        let err = bench.submit(&sheet, &notifier).await.unwrap_err();

        assert!(matches!(err, SubmitError::Halted { .. }));
        assert!(bench.is_form_open());
        assert_eq!(bench.form().unwrap().drafts()[0].raw_weight, Some(12.0));
        assert_eq!(sheet.fetch_calls(), 0);
        assert_eq!(notifier.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_without_form_is_rejected() {
        let mut bench = workbench();
        let result = bench.submit(&MockSheet::new(), &MockNotifier::new()).await;
        assert_eq!(result, Err(ValidationError::FormClosed.into()));
    }

    #[tokio::test]
    async fn reload_failure_after_submit_is_reported_separately() {
        let sheet = MockSheet::new();
        sheet.set_fetch_result(Err(SheetError::ParsingError("html".to_string())));
        let notifier = MockNotifier::new();
        let mut bench = workbench();
        bench.open_form(Some(date!(2024 - 04 - 03)));
        fill_first_draft(&mut bench);

        let outcome = bench.submit(&sheet, &notifier).await.unwrap();

        assert_eq!(outcome.report.submitted, 1);
        assert!(matches!(outcome.reload, Err(LoadError::Unavailable(_))));
        assert!(!bench.is_form_open());
    }
}
