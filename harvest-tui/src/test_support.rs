//! Shared doubles for the terminal tests.

use async_trait::async_trait;
use harvest::domain::{DataSource, Dataset, SubmittedEntry};
use harvest::{Notifier, NotifyError, SheetError, SheetStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::Services;
use crate::app::App;

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

pub fn sample_dataset() -> Dataset {
    Dataset {
        headers: row(&["DATE", "PARCELLE", "TYPE", "BRUT", "FINI", "SUPERFICIE"]),
        rows: vec![
            row(&["2024-01-05", "P40 CEBOLLINO", "BRUT", "100", "0", "50"]),
            row(&["2024-02-01", "P45 HABANERO", "BRUT", "10", "0", "5"]),
        ],
    }
}

pub fn test_app() -> App {
    App::new(vec![
        DataSource::new("Inventaire", "test://inventaire"),
        DataSource::new("Archive", "test://archive"),
    ])
}

/// Sheet returning a fixed dataset and counting calls.
#[derive(Clone, Default)]
pub struct StubSheet {
    pub dataset: Dataset,
    pub fail_fetch: bool,
    pub fail_append: bool,
    pub appends: Arc<AtomicUsize>,
    pub fetches: Arc<AtomicUsize>,
}

impl StubSheet {
    pub fn with(dataset: Dataset) -> Self {
        Self {
            dataset,
            ..Self::default()
        }
    }
}

#[async_trait]
impl SheetStore for StubSheet {
    async fn fetch_dataset(&self, _source: &DataSource) -> Result<Dataset, SheetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(SheetError::ResponseError("unreachable".to_string()));
        }
        Ok(self.dataset.clone())
    }

    async fn append_entry(
        &self,
        _source: &DataSource,
        _entry: &SubmittedEntry,
    ) -> Result<(), SheetError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        if self.fail_append {
            return Err(SheetError::ResponseError("unreachable".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct StubNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Notifier for StubNotifier {
    async fn notify(&self, entry: &SubmittedEntry) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push(entry.notification_text());
        Ok(())
    }
}

pub fn services(sheet: StubSheet, notifier: StubNotifier) -> Services {
    Services {
        store: Box::new(sheet),
        notifier: Box::new(notifier),
    }
}
