use std::collections::BTreeMap;

use serde_json::Value;

use super::{format_display_date, number_text, parse_leading_number, to_fixed};

pub const DATE_COLUMN: usize = 0;
pub const RAW_COLUMN: usize = 3;
pub const FINISHED_COLUMN: usize = 4;
pub const SURFACE_COLUMN: usize = 5;

/// Historical rows of one sheet, as returned by the backend. Columns are
/// positional: 0 date, 3 raw weight, 4 finished weight, 5 surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Split raw backend data into the header row and the data rows.
    pub fn from_values(data: Vec<Vec<Value>>) -> Self {
        let mut rows = data
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        Self {
            headers,
            rows: rows.collect(),
        }
    }

    /// No header or no data rows: nothing to show.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Display text of a backend cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(number_text).unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Column totals over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableStats {
    pub raw_total: f64,
    pub finished_total: f64,
    pub surface_total: f64,
    /// `(raw - finished) * 100 / raw`, 0 when there is no raw weight.
    pub loss_percent: f64,
}

impl TableStats {
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let mut stats = Self::default();
        for row in rows {
            stats.raw_total += numeric_cell(row, RAW_COLUMN);
            stats.finished_total += numeric_cell(row, FINISHED_COLUMN);
            stats.surface_total += numeric_cell(row, SURFACE_COLUMN);
        }
        stats.loss_percent = if stats.raw_total > 0.0 {
            (stats.raw_total - stats.finished_total) * 100.0 / stats.raw_total
        } else {
            0.0
        };
        stats
    }

    /// Labelled figures in the order they are displayed.
    pub fn summary(&self) -> [(&'static str, String); 4] {
        [
            ("T.FINI", to_fixed(self.finished_total, 0)),
            ("T.BRUT", to_fixed(self.raw_total, 0)),
            ("ECART", format!("{}%", to_fixed(self.loss_percent, 0))),
            ("SUP", format!("{}M²", to_fixed(self.surface_total, 0))),
        ]
    }
}

fn numeric_cell(row: &[String], column: usize) -> f64 {
    row.get(column)
        .and_then(|cell| parse_leading_number(cell))
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

/// Case-insensitive substring filters keyed by column index. Filters on
/// different columns must all match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFilters {
    filters: BTreeMap<usize, String>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter text for `column`; an empty text removes the filter.
    pub fn set(&mut self, column: usize, value: &str) {
        if value.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, value.to_string());
        }
    }

    pub fn get(&self, column: usize) -> &str {
        self.filters.get(&column).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.filters.iter().map(|(col, term)| (*col, term.as_str()))
    }

    /// A row matches when every filtered column contains its term. A column
    /// the row does not have never matches.
    pub fn matches(&self, row: &[String]) -> bool {
        self.filters.iter().all(|(column, term)| {
            row.get(*column)
                .is_some_and(|cell| cell.to_lowercase().contains(&term.to_lowercase()))
        })
    }

    /// The rows of `dataset` that pass every filter, in dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Vec<String>> {
        dataset.rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// What the table shows for the current dataset and filters.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    /// Visible rows, column 0 already formatted for display.
    pub rows: Vec<Vec<String>>,
    pub stats: TableStats,
    pub total_rows: usize,
}

impl TableView {
    /// `None` when the dataset has no header or no rows, in which case a
    /// "no data" placeholder is shown instead of a table.
    pub fn build(title: &str, dataset: &Dataset, filters: &ColumnFilters) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }

        let visible = filters.apply(dataset);
        let stats = TableStats::from_rows(visible.iter().copied());
        let rows = visible
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, cell)| {
                        if idx == DATE_COLUMN {
                            format_display_date(cell)
                        } else {
                            cell.clone()
                        }
                    })
                    .collect()
            })
            .collect();

        Some(Self {
            title: title.to_string(),
            headers: dataset.headers.clone(),
            rows,
            stats,
            total_rows: dataset.rows.len(),
        })
    }
}
