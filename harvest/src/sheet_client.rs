use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::domain::{number_text, DataSource, Dataset, SubmittedEntry};
use crate::ports::{SheetError, SheetStore};

/// HTTP client for a spreadsheet web app exposing `?getData=true` reads and
/// JSON row appends.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
}

impl SheetClient {
    pub fn new(timeout: Duration) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SheetError::ResponseError(e.to_string()))?;
        Ok(Self { client })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SheetError> {
        let resp = request
            .send()
            .await
            .map_err(|e| SheetError::ResponseError(e.to_string()))?;

        let body = resp
            .text()
            .await
            .map_err(|e| SheetError::ResponseError(e.to_string()))?;
        parse_body(&body)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, SheetError> {
    serde_json::from_str(body).map_err(|e| {
        SheetError::ParsingError(format!("Failed to parse response as JSON: {}", e))
    })
}

/// Any JSON answer to an append counts as accepted, whatever it says.
fn check_append_body(body: &str) -> Result<(), SheetError> {
    parse_body::<Value>(body).map(|_| ())
}

/// Envelope of a `?getData=true` read.
#[derive(Debug, Deserialize)]
pub struct SheetDataResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl SheetDataResponse {
    pub fn into_dataset(self) -> Result<Dataset, SheetError> {
        if self.status == "error" {
            return Err(SheetError::Backend(self.message.unwrap_or_default()));
        }
        Ok(Dataset::from_values(self.data))
    }
}

/// Row body understood by the sheet's append handler. Field names are the
/// sheet's own column keys.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppendRowRequest {
    pub date: String,
    pub stock_initial: String,
    pub entree: String,
    pub sortie: String,
    pub stock_final: String,
    pub observation: String,
    pub coupre: String,
    pub weeknumber: String,
}

impl From<&SubmittedEntry> for AppendRowRequest {
    fn from(entry: &SubmittedEntry) -> Self {
        Self {
            date: entry.date_text(),
            stock_initial: entry.plot.to_string(),
            entree: entry.kind.to_string(),
            sortie: number_text(entry.raw_weight),
            stock_final: number_text(entry.finished_weight),
            observation: number_text(entry.surface_area),
            coupre: entry.cut.to_string(),
            weeknumber: entry.week_number.to_string(),
        }
    }
}

#[async_trait]
impl SheetStore for SheetClient {
    #[instrument(name = "SheetClient::fetch_dataset", skip(self), fields(source = %source.name))]
    async fn fetch_dataset(&self, source: &DataSource) -> Result<Dataset, SheetError> {
        let request = self.client.get(&source.url).query(&[("getData", "true")]);
        let response: SheetDataResponse = self.fetch(request).await?;
        let dataset = response.into_dataset()?;
        tracing::debug!(rows = dataset.rows.len(), "loaded sheet");
        Ok(dataset)
    }

    #[instrument(
        name = "SheetClient::append_entry",
        skip(self, entry),
        fields(source = %source.name, plot = %entry.plot)
    )]
    async fn append_entry(
        &self,
        source: &DataSource,
        entry: &SubmittedEntry,
    ) -> Result<(), SheetError> {
        let body = serde_json::to_string(&AppendRowRequest::from(entry))
            .map_err(|e| SheetError::ParsingError(e.to_string()))?;

        // Sent as plain text: the web app reads the raw post body.
        let request = self
            .client
            .post(&source.url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body);

        let resp = request
            .send()
            .await
            .map_err(|e| SheetError::ResponseError(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| SheetError::ResponseError(e.to_string()))?;
        check_append_body(&body)
    }
}
