use serde::{Deserialize, Serialize};

/// A spreadsheet the operator can pick, identified by its web-app URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataSource {
    pub name: String,
    pub url: String,
}

impl DataSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
