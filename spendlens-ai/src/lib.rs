//! spendlens-ai: Gemini-backed document extraction and stress analysis,
//! with lenient JSON cleanup for truncated model responses.

pub mod analyze;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod repair;

pub use analyze::{build_summary_context, fallback_result, map_analysis_response};
pub use error::AiError;
pub use extract::map_extraction_response;
pub use gemini::{DEFAULT_ANALYSIS_MODEL, DEFAULT_EXTRACTION_MODEL, GeminiClient};
pub use repair::{clean_json_block, parse_lenient, repair_truncated_json};
