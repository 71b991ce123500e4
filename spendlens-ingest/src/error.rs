//! Closed error taxonomy for statement ingestion.

use thiserror::Error;

/// Logical column roles the normalizer must locate in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Date,
    Amount,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Date => write!(f, "date"),
            ColumnRole::Amount => write!(f, "amount"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    /// No header matched a required column role; the parse fails before
    /// any row is read.
    #[error("statement is missing a usable {0} column")]
    MissingColumn(ColumnRole),

    /// Every data row was dropped during normalization.
    #[error("no valid transactions found in statement")]
    NoValidRows,

    /// Rejected before parsing: the extension maps to no known input.
    #[error("unsupported file type: {0:?} (expected csv, txt, pdf, or an image)")]
    UnsupportedFileType(String),
}
