//! Dataset domain models.
//!
//! Contains the dataset directory entry (`DatasetSummary`) and one fetched
//! page of table rows (`TablePage`). Rows are untyped field-keyed mappings
//! exactly as the backend returns them; the visible column set is inferred
//! from the first row of the current page only.

use serde::{Deserialize, Serialize};

/// An untyped row record, field name to value, in backend key order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Immutable snapshot of one uploaded dataset, as listed by the directory
/// endpoint. A full list replaces the prior list on every directory re-fetch;
/// there is no incremental merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Backend-issued dataset id
    pub id: String,
    /// Original filename of the uploaded file
    pub filename: String,
    /// Upload timestamp as reported by the backend (RFC 3339)
    pub upload_date: String,
    /// Number of data rows in the dataset
    pub row_count: u64,
    /// Number of columns in the dataset
    pub column_count: u64,
    /// Size of the uploaded file in bytes
    pub file_size: u64,
}

impl DatasetSummary {
    /// File size formatted in mebibytes for display, e.g. "1.25 MB".
    pub fn file_size_mb(&self) -> String {
        format!("{:.2} MB", self.file_size as f64 / 1024.0 / 1024.0)
    }
}

/// One page of table rows for a dataset, regenerated wholesale on every fetch
/// keyed by (dataset id, page number).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    /// Ordered row records for this page
    pub rows: Vec<Row>,
    /// 1-based page number this data belongs to
    pub page: u32,
    /// Total number of pages the backend reports for the dataset
    pub total_pages: u32,
}

impl TablePage {
    /// Column names inferred from the keys of the first row of this page.
    ///
    /// Only the first row is consulted. If the backend returns a page whose
    /// first row lacks a field present in later rows, that field does not
    /// appear in the rendered table (see the inference test below).
    pub fn columns(&self) -> Vec<String> {
        match self.rows.first() {
            Some(row) => row.keys().cloned().collect(),
            None => Vec::new(),
        }
    }
}
