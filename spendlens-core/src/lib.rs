//! spendlens-core: canonical transaction model, keyword classification,
//! and spending aggregations for the spendlens pipeline.

pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod sample;
pub mod transaction;

pub use aggregate::{
    TOP_CATEGORIES, aggregate_categories, aggregate_daily_spending, unique_categories,
};
pub use classify::is_discretionary;
pub use filter::TransactionFilter;
pub use sample::generate_sample_data;
pub use transaction::{
    AnalysisResult, CategorySummary, ChartDataPoint, SpendType, StressLevel, Transaction,
};
