use async_trait::async_trait;
use harvest::domain::{
    iso_date_text, number_text, Cut, DataSource, Dataset, Kind, Plot, SubmittedEntry,
};
use harvest::{Notifier, NotifyError, SheetError, SheetStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::{Duration, OffsetDateTime};

const HEADERS: [&str; 8] = [
    "DATE",
    "PARCELLE",
    "TYPE",
    "BRUT",
    "FINI",
    "SUPERFICIE",
    "COUPE",
    "SEMAINE",
];

pub fn dev_sources() -> Vec<DataSource> {
    vec![
        DataSource::new("Inventaire (dev)", "dev://inventaire"),
        DataSource::new("Archive (dev)", "dev://archive"),
        DataSource::new("Introuvable (dev)", "dev://introuvable"),
    ]
}

/// In-memory sheets keyed by source URL. Appends land in the same table the
/// next fetch returns.
#[derive(Debug, Clone)]
pub struct DevSheet {
    store: Arc<Mutex<HashMap<String, Dataset>>>,
}

impl DevSheet {
    pub fn new() -> Self {
        let mut sheets = HashMap::new();
        sheets.insert("dev://inventaire".to_string(), seed_inventory(6));
        sheets.insert("dev://archive".to_string(), seed_inventory(40));
        Self {
            store: Arc::new(Mutex::new(sheets)),
        }
    }
}

#[async_trait]
impl SheetStore for DevSheet {
    async fn fetch_dataset(&self, source: &DataSource) -> Result<Dataset, SheetError> {
        let store = self
            .store
            .lock()
            .map_err(|_| SheetError::Backend("dev store lock poisoned".to_string()))?;
        match store.get(&source.url) {
            Some(dataset) => Ok(dataset.clone()),
            None => Err(SheetError::Backend(format!(
                "Sheet not found: {}",
                source.name
            ))),
        }
    }

    async fn append_entry(
        &self,
        source: &DataSource,
        entry: &SubmittedEntry,
    ) -> Result<(), SheetError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| SheetError::Backend("dev store lock poisoned".to_string()))?;
        let dataset = store.entry(source.url.clone()).or_insert_with(|| Dataset {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        });
        dataset.rows.push(vec![
            entry.date_text(),
            entry.plot.to_string(),
            entry.kind.to_string(),
            number_text(entry.raw_weight),
            number_text(entry.finished_weight),
            number_text(entry.surface_area),
            entry.cut.to_string(),
            entry.week_number.to_string(),
        ]);
        Ok(())
    }
}

/// Writes each notification to the log instead of a chat.
#[derive(Debug, Clone, Default)]
pub struct DevNotifier {
    sent: Arc<AtomicUsize>,
}

impl DevNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for DevNotifier {
    async fn notify(&self, entry: &SubmittedEntry) -> Result<(), NotifyError> {
        let count = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(count, text = %entry.notification_text(), "dev notification");
        Ok(())
    }
}

fn seed_inventory(days: i64) -> Dataset {
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    let plots = [Plot::P40, Plot::P45, Plot::P48, Plot::P52, Plot::P60];
    let kinds = [Kind::Raw, Kind::FinishedUnit, Kind::FinishedWeight];

    let rows = (0..days)
        .filter_map(|offset| {
            let date = today.checked_sub(Duration::days(days - offset))?;
            let idx = offset as usize;
            let kind = kinds[idx % kinds.len()];
            let raw = 80.0 + (idx % 7) as f64 * 12.5;
            let finished = if kind.is_raw() { 0.0 } else { raw * 0.8 };
            Some(vec![
                iso_date_text(date),
                plots[idx % plots.len()].to_string(),
                kind.to_string(),
                number_text(raw),
                number_text(finished),
                number_text(20.0 + (idx % 3) as f64 * 5.0),
                Cut::from_number((idx % 7 + 1) as u8)
                    .unwrap_or_default()
                    .to_string(),
                harvest::domain::iso_week_number(date).to_string(),
            ])
        })
        .collect();

    Dataset {
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest::domain::{CatalogValue, DerivedMetrics};
    use time::macros::date;

    fn entry() -> SubmittedEntry {
        SubmittedEntry {
            date: date!(2024 - 05 - 02),
            plot: Plot::P45,
            kind: Kind::Raw,
            raw_weight: 12.0,
            finished_weight: 0.0,
            surface_area: 3.0,
            cut: Cut::Second,
            week_number: 18,
            metrics: DerivedMetrics::compute(Kind::Raw, 12.0, 0.0, 3.0),
        }
    }

    #[tokio::test]
    async fn appended_rows_show_up_on_next_fetch() {
        let sheet = DevSheet::new();
        let sources = dev_sources();
        let source = &sources[0];
        let before = sheet.fetch_dataset(source).await.unwrap().rows.len();

        sheet.append_entry(source, &entry()).await.unwrap();

        let dataset = sheet.fetch_dataset(source).await.unwrap();
        assert_eq!(dataset.rows.len(), before + 1);
        assert_eq!(
            dataset.rows.last().unwrap()[..4],
            ["2024-05-02", "P45 HABANERO", "BRUT", "12"]
        );
    }

    #[tokio::test]
    async fn unknown_sheet_reports_backend_error() {
        let sheet = DevSheet::new();
        let err = sheet.fetch_dataset(&dev_sources()[2]).await.unwrap_err();
        assert!(matches!(err, SheetError::Backend(_)));
    }

    #[tokio::test]
    async fn dev_notifier_counts_messages() {
        let notifier = DevNotifier::new();
        notifier.notify(&entry()).await.unwrap();
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn seeded_rows_use_catalog_cut_labels() {
        let labels: Vec<String> = Cut::all().iter().map(Cut::to_string).collect();
        let dataset = seed_inventory(10);
        assert_eq!(dataset.rows.len(), 10);
        assert!(dataset.rows.iter().all(|row| labels.contains(&row[6])));
        assert_eq!(dataset.rows[0][6], "COUPE 1");
        assert_eq!(dataset.rows[7][6], "COUPE 1");
    }
}
