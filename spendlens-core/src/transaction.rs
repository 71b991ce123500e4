//! Canonical record types shared across the spendlens pipeline.

use serde::{Deserialize, Serialize};

/// A single normalized spend record.
///
/// `amount` is always a positive magnitude: ingestion folds the sign away
/// because every surviving row represents spend. `id` is assigned by the
/// normalizer that produced the batch, never taken from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub amount: f64,
    /// Free text; `"Uncategorized"` when the input had none.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Derived by the keyword classifier, never user-supplied.
    pub is_discretionary: bool,
}

/// Which bucket a day's spend total belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendType {
    Essential,
    Discretionary,
}

/// One chart point: a date's total for one spend bucket. Every active
/// date produces two of these, one per [`SpendType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub spend_type: SpendType,
}

/// A category's summed spend, as ranked by the category aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub value: f64,
}

/// Ordered stress bands of the 0-100 scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    Stable,
    Mild,
    High,
    Critical,
}

/// Output of the stress-analysis call.
///
/// `score` and `level` are carried exactly as produced upstream; this
/// pipeline does not clamp the score or validate it against the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub level: StressLevel,
    pub observations: Vec<String>,
    pub recent_changes: String,
    pub importance: String,
    pub recommendations: Vec<String>,
}
