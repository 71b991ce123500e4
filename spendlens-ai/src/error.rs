//! Error taxonomy for the external model calls.
//!
//! Only extraction-side failures live here: analysis-side failures are
//! masked by the fixed fallback result and never surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// Transport-level failure talking to the model endpoint.
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the model endpoint.
    #[error("model endpoint returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The extraction call answered, but no transaction could be
    /// recovered from its payload. Retry-worthy: a clearer scan of the
    /// same document often succeeds.
    #[error("no transactions could be identified in this file")]
    NoTransactionsExtracted,
}
