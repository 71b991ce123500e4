//! Mapping of document-extraction responses into canonical transactions.

use serde::Deserialize;
use serde_json::{Value, json};
use spendlens_core::{Transaction, is_discretionary};

use crate::repair::parse_lenient;

/// Instruction sent alongside the document bytes. The 50-transaction cap
/// keeps the structured response inside the output budget so it does not
/// truncate mid-array.
pub const EXTRACTION_PROMPT: &str = "Extract financial transactions from this document into a JSON array. Use YYYY-MM-DD format for dates. Ignore running balances. IMPORTANT: Limit to the first 50 transactions to ensure the JSON response is complete and valid. Do not truncate the JSON output.";

/// Structured-output schema enforced on the extraction call.
pub fn extraction_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": { "type": "STRING", "description": "YYYY-MM-DD" },
                "amount": { "type": "NUMBER", "description": "Transaction amount (positive number)" },
                "category": { "type": "STRING", "description": "Best guess category" },
                "merchant": { "type": "STRING", "description": "Merchant name" }
            },
            "required": ["date", "amount", "category"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct RawExtracted {
    #[serde(default)]
    date: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
}

/// Map a (possibly fenced or truncated) extraction response to canonical
/// transactions.
///
/// A non-array payload yields an empty batch, not an error; the caller
/// decides whether zero transactions is worth surfacing. Array entries
/// that do not fit the expected shape are skipped, and skips leave id
/// gaps just like dropped CSV rows do.
pub fn map_extraction_response(text: &str) -> Vec<Transaction> {
    let Value::Array(items) = parse_lenient(text) else {
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let raw: RawExtracted = serde_json::from_value(item).ok()?;
            let category = raw
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string());
            let merchant = raw.merchant.filter(|m| !m.is_empty());
            let combined = format!(
                "{} {}",
                category.to_lowercase(),
                merchant.as_deref().unwrap_or("").to_lowercase()
            );
            Some(Transaction {
                id: format!("extracted-{idx}"),
                date: raw.date,
                amount: raw.amount.abs(),
                category,
                merchant,
                is_discretionary: is_discretionary(&combined),
            })
        })
        .collect()
}
