//! Stress-analysis prompt construction and response mapping.

use serde_json::{Value, json};
use spendlens_core::{AnalysisResult, StressLevel, Transaction};

use crate::repair::parse_lenient;

/// How many recent transactions the analysis context carries.
const TRANSACTION_LOG_LIMIT: usize = 40;

/// System instruction: analyst persona plus the fixed 0-100 rubric.
pub const ANALYSIS_SYSTEM_INSTRUCTION: &str = "\
You are a Forensic Financial Analyst and Behavioral Economist.
Analyze the provided transaction log and metrics to calculate a \"Financial Stress Score\".

REQUIREMENTS:
1. **Be Factual**: specific amounts, dates, and merchants in your observations. Do not just say \"spending increased\", say \"Spending increased due to ₹2000 at Amazon on 10/12\".
2. **Detect Patterns**: Look for \"doom spending\" (small, frequent discretionary purchases), large impulse buys, or late-night spending clusters.
3. **Tone**: Professional, objective, direct, yet constructive.

SCORING RUBRIC (0-100):
- 0-30 (Stable): <30% discretionary, consistent essential payments.
- 31-60 (Mild): 30-50% discretionary, occasional spikes.
- 61-80 (High): 50-70% discretionary, frequent impulse buys, irregular frequency.
- 81-100 (Critical): >70% discretionary, rapid depletion, gambling/high-risk merchants.

OUTPUT SCHEMA:
Return strictly JSON.";

/// Structured-output schema enforced on the analysis call.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Stress score 0-100 based on the rubric" },
            "level": { "type": "STRING", "enum": ["Stable", "Mild", "High", "Critical"], "description": "Stress level category" },
            "observations": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "3 specific observations citing dates and amounts." },
            "recentChanges": { "type": "STRING", "description": "Factual comparison of recent vs older transactions in the list." },
            "importance": { "type": "STRING", "description": "The single most critical financial habit identified in this dataset." },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "3 actionable, specific steps to reduce the score." }
        },
        "required": ["score", "level", "observations", "recentChanges", "importance", "recommendations"]
    })
}

/// Build the grounding context: hard totals plus the most recent
/// transactions, newest first, one `date: merchant (₹amount)` line each.
pub fn build_summary_context(transactions: &[Transaction]) -> String {
    let total_spent: f64 = transactions.iter().map(|t| t.amount).sum();
    let discretionary_spent: f64 = transactions
        .iter()
        .filter(|t| t.is_discretionary)
        .map(|t| t.amount)
        .sum();
    let essential_spent = total_spent - discretionary_spent;
    let discretionary_ratio = if total_spent > 0.0 {
        discretionary_spent / total_spent * 100.0
    } else {
        0.0
    };
    let count = transactions.len();

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let log = recent
        .iter()
        .take(TRANSACTION_LOG_LIMIT)
        .map(|t| {
            format!(
                "{}: {} (₹{:.2})",
                t.date,
                t.merchant.as_deref().unwrap_or(&t.category),
                t.amount
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "HARD METRICS:\n\
         - Total Spent: ₹{total_spent:.2}\n\
         - Essential Expenses: ₹{essential_spent:.2}\n\
         - Discretionary Expenses: ₹{discretionary_spent:.2} ({discretionary_ratio:.1}%)\n\
         - Transaction Count: {count}\n\
         \n\
         TRANSACTION LOG (Last 40):\n\
         {log}"
    )
}

/// Map a (possibly fenced or truncated) analysis response.
///
/// A successful parse is returned exactly as produced; score range and
/// level consistency are not validated here. Any shape mismatch falls
/// back to the canned result, so analysis problems never surface as
/// errors.
pub fn map_analysis_response(text: &str) -> AnalysisResult {
    let value = parse_lenient(text);
    match serde_json::from_value::<AnalysisResult>(value) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!("analysis response did not match the expected shape: {err}");
            fallback_result()
        }
    }
}

/// Fixed result used whenever the analysis call fails end to end. The
/// rendered bytes are part of the contract; golden-tested.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        score: 50.0,
        level: StressLevel::Mild,
        observations: vec![
            "AI service is momentarily overloaded.".to_string(),
            "Manual review of the transaction log is recommended.".to_string(),
        ],
        recent_changes: "Analysis unavailable.".to_string(),
        importance: "Please retry the analysis in a few moments.".to_string(),
        recommendations: vec![
            "Check internet connection.".to_string(),
            "Ensure file is readable.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, date: &str, amount: f64, category: &str, merchant: Option<&str>, discretionary: bool) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount,
            category: category.to_string(),
            merchant: merchant.map(str::to_string),
            is_discretionary: discretionary,
        }
    }

    #[test]
    fn test_summary_metrics_and_log_lines() {
        let txns = vec![
            txn("a", "2024-01-01", 300.0, "Rent", None, false),
            txn("b", "2024-01-02", 100.0, "Dining", Some("Cafe Uno"), true),
        ];
        let summary = build_summary_context(&txns);
        assert!(summary.contains("- Total Spent: ₹400.00"));
        assert!(summary.contains("- Essential Expenses: ₹300.00"));
        assert!(summary.contains("- Discretionary Expenses: ₹100.00 (25.0%)"));
        assert!(summary.contains("- Transaction Count: 2"));
        assert!(summary.contains("2024-01-02: Cafe Uno (₹100.00)"));
        assert!(summary.contains("2024-01-01: Rent (₹300.00)"), "category stands in for merchant");
    }

    #[test]
    fn test_summary_orders_newest_first_and_caps_at_forty() {
        let txns: Vec<Transaction> = (1..=45)
            .map(|i| txn(&format!("t{i}"), &format!("2024-01-{i:02}"), 10.0, "Misc", None, false))
            .collect();
        let summary = build_summary_context(&txns);
        let log = summary.split("TRANSACTION LOG (Last 40):\n").nth(1).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 40);
        assert!(lines[0].starts_with("2024-01-45"));
        assert!(lines[39].starts_with("2024-01-06"), "oldest five fall off");
    }

    #[test]
    fn test_summary_ratio_zero_when_no_spend() {
        let summary = build_summary_context(&[]);
        assert!(summary.contains("- Discretionary Expenses: ₹0.00 (0.0%)"));
    }

    #[test]
    fn test_map_passes_result_through_unclamped() {
        let text = r#"{
            "score": 150,
            "level": "Critical",
            "observations": ["x"],
            "recentChanges": "y",
            "importance": "z",
            "recommendations": ["w"]
        }"#;
        let result = map_analysis_response(text);
        assert_eq!(result.score, 150.0, "no clamping here");
        assert_eq!(result.level, StressLevel::Critical);
    }

    #[test]
    fn test_map_falls_back_on_unrepairable_payload() {
        assert_eq!(map_analysis_response(r#"{"score":50,"lev"#), fallback_result());
        assert_eq!(map_analysis_response("no json here"), fallback_result());
    }

    #[test]
    fn test_fallback_result_is_golden() {
        let json = serde_json::to_string_pretty(&fallback_result()).unwrap();
        let expected = r#"{
  "score": 50.0,
  "level": "Mild",
  "observations": [
    "AI service is momentarily overloaded.",
    "Manual review of the transaction log is recommended."
  ],
  "recentChanges": "Analysis unavailable.",
  "importance": "Please retry the analysis in a few moments.",
  "recommendations": [
    "Check internet connection.",
    "Ensure file is readable."
  ]
}"#;
        assert_eq!(json, expected);
    }
}
