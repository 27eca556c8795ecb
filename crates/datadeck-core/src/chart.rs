//! Chart configuration and aggregate data models.
//!
//! Chart data rows are kept untyped, like table rows, because the backend may
//! return either the raw-aggregate shape (`{name, value}`) or arbitrary keyed
//! records. The axis-key convention below lets one renderer serve both.

use crate::dataset::Row;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How the chart panel draws the aggregate data.
///
/// The kind is a presentation parameter only. It is not part of any fetch
/// key: switching kind re-renders already-fetched data without a new fetch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Categorical bars
    Bar,
    /// Time/ordinal line
    Line,
    /// Proportional pie
    Pie,
}

/// Server-side aggregation applied to the chosen column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// Chart configuration mutated directly by user input.
///
/// A chart fetch is keyed by (dataset id, column, aggregation) and is only
/// issued while `column` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    /// Grouping column; `None` shows the "select a column" placeholder
    pub column: Option<String>,
    pub aggregation: Aggregation,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            column: None,
            aggregation: Aggregation::Count,
        }
    }
}

impl ChartConfig {
    /// The configured column, if set and non-empty.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref().filter(|c| !c.is_empty())
    }
}

/// Picks the category/metric field names for rendering chart rows.
///
/// Prefers fields literally named `name`/`value` when the first row has them
/// (the backend's raw-aggregate shape), otherwise falls back to the
/// explicitly configured column and aggregation names. This lets the same
/// renderer serve both shapes uniformly.
pub fn axis_keys(rows: &[Row], config: &ChartConfig) -> (String, String) {
    let first = rows.first();
    let category = match first {
        Some(row) if row.contains_key("name") => "name".to_string(),
        _ => config.column().unwrap_or_default().to_string(),
    };
    let metric = match first {
        Some(row) if row.contains_key("value") => "value".to_string(),
        _ => config.aggregation.to_string(),
    };
    (category, metric)
}

/// Extracts (category, metric) pairs from chart rows using the axis-key
/// convention. Rows missing either field are skipped; non-numeric metrics
/// are skipped.
pub fn chart_points(rows: &[Row], config: &ChartConfig) -> Vec<(String, f64)> {
    let (category_key, metric_key) = axis_keys(rows, config);
    rows.iter()
        .filter_map(|row| {
            let category = row.get(&category_key).map(display_value)?;
            let metric = row.get(&metric_key).and_then(serde_json::Value::as_f64)?;
            Some((category, metric))
        })
        .collect()
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
