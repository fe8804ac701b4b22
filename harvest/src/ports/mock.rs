//! Recording doubles for the outbound ports.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{Notifier, NotifyError, SheetError, SheetStore};
use crate::domain::{DataSource, Dataset, SubmittedEntry};

/// Sheet double that records appended entries. Appends after `fail_append_at`
/// (0-based call index) fail; fetches return the configured result.
#[derive(Clone, Default)]
pub struct MockSheet {
    fetch_result: Arc<Mutex<Option<Result<Dataset, SheetError>>>>,
    appended: Arc<Mutex<Vec<SubmittedEntry>>>,
    fail_append_at: Option<usize>,
    append_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(dataset: Dataset) -> Self {
        let mock = Self::default();
        mock.set_fetch_result(Ok(dataset));
        mock
    }

    pub fn failing_append_at(mut self, call: usize) -> Self {
        self.fail_append_at = Some(call);
        self
    }

    pub fn set_fetch_result(&self, result: Result<Dataset, SheetError>) {
        *self.fetch_result.lock().unwrap() = Some(result);
    }

    pub fn appended(&self) -> Vec<SubmittedEntry> {
        self.appended.lock().unwrap().clone()
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetStore for MockSheet {
    async fn fetch_dataset(&self, _source: &DataSource) -> Result<Dataset, SheetError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Dataset::default()))
    }

    async fn append_entry(
        &self,
        _source: &DataSource,
        entry: &SubmittedEntry,
    ) -> Result<(), SheetError> {
        let call = self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_append_at.is_some_and(|at| call >= at) {
            return Err(SheetError::ResponseError("connection reset".to_string()));
        }
        self.appended.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Notifier double that records every message text.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail_at: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, entry: &SubmittedEntry) -> Result<(), NotifyError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at.is_some_and(|at| call >= at) {
            return Err(NotifyError::Status(502));
        }
        self.sent.lock().unwrap().push(entry.notification_text());
        Ok(())
    }
}
