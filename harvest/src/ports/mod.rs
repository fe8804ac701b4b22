//! Outbound ports: the spreadsheet backend and the chat notifier.
//!
//! Both are black boxes reached over HTTP in production. The traits let the
//! submission pipeline and the [`Workbench`](crate::Workbench) run against
//! in-memory doubles in tests and in dev mode.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DataSource, Dataset, SubmittedEntry};

#[cfg(test)]
pub(crate) mod mock;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    /// The sheet answered with `status: "error"`.
    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
}

/// Tabular store holding one sheet per [`DataSource`].
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Read the whole sheet, header row first.
    async fn fetch_dataset(&self, source: &DataSource) -> Result<Dataset, SheetError>;

    /// Append one entry as a new row.
    async fn append_entry(
        &self,
        source: &DataSource,
        entry: &SubmittedEntry,
    ) -> Result<(), SheetError>;
}

/// Delivery channel for per-entry announcements.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, entry: &SubmittedEntry) -> Result<(), NotifyError>;
}
