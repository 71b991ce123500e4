//! spendlens-ingest: statement ingestion (lenient CSV normalization and
//! input-kind routing) for the spendlens pipeline.

pub mod error;
pub mod source;
pub mod statement;

pub use error::{ColumnRole, IngestError};
pub use source::InputKind;
pub use statement::parse_csv;
