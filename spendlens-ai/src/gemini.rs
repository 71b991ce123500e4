//! Minimal Gemini REST client for the two model calls.
//!
//! One unary `generateContent` request per operation; no streaming, no
//! retries. A caller that re-runs an analysis simply replaces whatever
//! the previous run produced.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use spendlens_core::{AnalysisResult, Transaction};

use crate::analyze::{
    ANALYSIS_SYSTEM_INSTRUCTION, analysis_schema, build_summary_context, fallback_result,
    map_analysis_response,
};
use crate::error::AiError;
use crate::extract::{EXTRACTION_PROMPT, extraction_schema, map_extraction_response};

/// Default model for document extraction.
pub const DEFAULT_EXTRACTION_MODEL: &str = "gemini-2.0-flash-exp";
/// Default model for stress analysis.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Output cap for extraction; the request prompt caps the transaction
/// count so the structured array fits inside this budget.
const EXTRACTION_MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    extraction_model: String,
    analysis_model: String,
}

#[derive(Serialize)]
struct Req {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: Value,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
}

#[derive(Deserialize)]
struct Resp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<RespContent>,
}

#[derive(Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Deserialize)]
struct RespPart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
        }
    }

    pub fn with_models(mut self, extraction_model: &str, analysis_model: &str) -> Self {
        self.extraction_model = extraction_model.to_string();
        self.analysis_model = analysis_model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Run the document-extraction call and normalize its response.
    ///
    /// Extraction failures stay user-visible: transport and API errors
    /// propagate, and an empty extraction is reported as an error so the
    /// user can retry with a clearer document.
    pub async fn extract_transactions(
        &self,
        file_bytes: &[u8],
        mime_type: &str,
    ) -> Result<Vec<Transaction>, AiError> {
        let data = base64::engine::general_purpose::STANDARD.encode(file_bytes);
        let request = Req {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        mime_type: mime_type.to_string(),
                        data,
                    },
                    Part::Text(EXTRACTION_PROMPT.to_string()),
                ],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": extraction_schema(),
                "maxOutputTokens": EXTRACTION_MAX_OUTPUT_TOKENS,
            }),
            system_instruction: None,
        };

        tracing::debug!(model = %self.extraction_model, "requesting document extraction");
        let text = self.generate_content(&self.extraction_model, &request).await?;
        let transactions = map_extraction_response(&text);
        if transactions.is_empty() {
            return Err(AiError::NoTransactionsExtracted);
        }
        Ok(transactions)
    }

    /// Run the stress-analysis call over a transaction batch.
    ///
    /// Never errors: failures of any kind (transport, API status, empty
    /// or unparseable response) are masked with the fixed fallback
    /// result and logged.
    pub async fn analyze_spending(&self, transactions: &[Transaction]) -> AnalysisResult {
        let context = build_summary_context(transactions);
        let request = Req {
            contents: vec![Content {
                parts: vec![Part::Text(format!(
                    "Perform forensic analysis on this financial data:\n{context}"
                ))],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": analysis_schema(),
            }),
            system_instruction: Some(Content {
                parts: vec![Part::Text(ANALYSIS_SYSTEM_INSTRUCTION.to_string())],
            }),
        };

        tracing::debug!(model = %self.analysis_model, "requesting stress analysis");
        match self.generate_content(&self.analysis_model, &request).await {
            Ok(text) if !text.is_empty() => map_analysis_response(&text),
            Ok(_) => {
                tracing::warn!("analysis call returned an empty response, using fallback");
                fallback_result()
            }
            Err(err) => {
                tracing::warn!("analysis call failed, using fallback: {err}");
                fallback_result()
            }
        }
    }

    async fn generate_content(&self, model: &str, request: &Req) -> Result<String, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let out: Resp = resp.json().await?;
        let mut text = String::new();
        for candidate in out.candidates {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    if let Some(t) = part.text {
                        text.push_str(&t);
                    }
                }
            }
        }
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_gemini_wire_shape() {
        let request = Req {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        mime_type: "application/pdf".to_string(),
                        data: "QUJD".to_string(),
                    },
                    Part::Text("extract".to_string()),
                ],
            }],
            generation_config: json!({"responseMimeType": "application/json"}),
            system_instruction: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(value["contents"][0]["parts"][1]["text"], "extract");
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_text_parts_concatenate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[{\"a\""}, {"text": ":1}]"}]}}
            ]
        }"#;
        let resp: Resp = serde_json::from_str(raw).unwrap();
        let mut text = String::new();
        for candidate in resp.candidates {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    if let Some(t) = part.text {
                        text.push_str(&t);
                    }
                }
            }
        }
        assert_eq!(text, r#"[{"a":1}]"#);
    }
}
