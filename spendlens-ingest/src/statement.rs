//! Lenient CSV-to-transaction normalizer with header sniffing.
//!
//! Statements arrive with wildly inconsistent headers, so column roles
//! are discovered by case-insensitive substring match instead of fixed
//! positions. Rows whose amount cannot be read are dropped without
//! per-row reporting; only a fully empty result is an error.

use spendlens_core::{Transaction, is_discretionary};

use crate::error::{ColumnRole, IngestError};

/// Candidate header substrings per logical column. Headers are checked
/// in order; the first header containing any candidate wins the role.
const DATE_HEADERS: &[&str] = &["date"];
const AMOUNT_HEADERS: &[&str] = &["amount", "debit", "cost"];
const CATEGORY_HEADERS: &[&str] = &["category", "description", "merchant"];
const MERCHANT_HEADERS: &[&str] = &["merchant", "description"];

/// Column indices resolved from a header row. Category and merchant are
/// optional and may resolve to the same index.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    amount: usize,
    category: Option<usize>,
    merchant: Option<usize>,
}

impl ColumnMap {
    fn sniff(header_line: &str) -> Result<Self, IngestError> {
        let headers: Vec<String> = header_line
            .to_lowercase()
            .split(',')
            .map(|h| h.trim().to_string())
            .collect();

        let find = |candidates: &[&str]| {
            headers
                .iter()
                .position(|h| candidates.iter().any(|c| h.contains(c)))
        };

        let date = find(DATE_HEADERS).ok_or(IngestError::MissingColumn(ColumnRole::Date))?;
        let amount = find(AMOUNT_HEADERS).ok_or(IngestError::MissingColumn(ColumnRole::Amount))?;

        Ok(Self {
            date,
            amount,
            category: find(CATEGORY_HEADERS),
            merchant: find(MERCHANT_HEADERS),
        })
    }
}

/// Split a data row on commas that sit outside double quotes, so a quoted
/// field may contain commas. Each field then loses one wrapping quote
/// pair and surrounding whitespace.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.iter().map(|f| clean_field(f)).collect()
}

fn clean_field(raw: &str) -> String {
    let stripped = raw.strip_prefix('"').unwrap_or(raw);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    stripped.trim().to_string()
}

/// Parse an amount cell, tolerating currency symbols and thousands
/// separators: every character that is not a digit, minus, or period is
/// stripped before parsing. Returns the positive magnitude, or `None`
/// when nothing finite survives.
fn parse_amount(raw: &str) -> Option<f64> {
    let scrubbed: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();
    let value: f64 = scrubbed.parse().ok()?;
    value.is_finite().then(|| value.abs())
}

/// Normalize raw statement text into canonical transactions.
///
/// The first line is the header row. Sign on amounts is discarded: every
/// surviving row represents spend as a positive magnitude. Rows with an
/// unparseable or non-positive amount, or an empty date cell, are dropped
/// silently. Output preserves input row order, and row ids keep the
/// original row index, so a batch with drops has id gaps.
pub fn parse_csv(text: &str) -> Result<Vec<Transaction>, IngestError> {
    let mut lines = text.trim().lines();
    let header = lines.next().unwrap_or("");
    let columns = ColumnMap::sniff(header)?;

    let mut out = Vec::new();
    for (idx, line) in lines.enumerate() {
        let fields = split_row(line);

        let amount = match fields
            .get(columns.amount)
            .map(String::as_str)
            .and_then(parse_amount)
        {
            Some(a) if a > 0.0 => a,
            _ => continue,
        };

        let date = fields.get(columns.date).cloned().unwrap_or_default();
        if date.is_empty() {
            continue;
        }

        let category = columns
            .category
            .and_then(|i| fields.get(i))
            .filter(|c| !c.is_empty())
            .cloned()
            .unwrap_or_else(|| "Uncategorized".to_string());

        let merchant = columns
            .merchant
            .and_then(|i| fields.get(i))
            .filter(|m| !m.is_empty())
            .cloned();

        let is_discretionary = is_discretionary(&category);
        out.push(Transaction {
            id: format!("tx-{idx}"),
            date,
            amount,
            category,
            merchant,
            is_discretionary,
        });
    }

    if out.is_empty() {
        return Err(IngestError::NoValidRows);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_statement() {
        let csv = "Date,Amount,Category\n2024-01-01,100,Groceries\n2024-01-02,-50,Coffee\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, 100.0);
        assert!(!txns[0].is_discretionary);
        assert_eq!(txns[1].amount, 50.0, "sign is dropped");
        assert!(txns[1].is_discretionary);
    }

    #[test]
    fn test_amount_scrubs_currency_and_separators() {
        let csv = "Date,Amount\n2024-01-01,\"₹1,500.50\"\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns[0].amount, 1500.50);
    }

    #[test]
    fn test_missing_date_column_fails() {
        let err = parse_csv("When,Amount\n2024-01-01,100\n").unwrap_err();
        assert_eq!(err, IngestError::MissingColumn(ColumnRole::Date));
    }

    #[test]
    fn test_missing_amount_column_fails() {
        let err = parse_csv("Date,Category\n2024-01-01,Rent\n").unwrap_err();
        assert_eq!(err, IngestError::MissingColumn(ColumnRole::Amount));
    }

    #[test]
    fn test_all_invalid_rows_fail_as_no_valid_rows() {
        let err = parse_csv("Date,Amount\n2024-01-01,0\n2024-01-02,n/a\n").unwrap_err();
        assert_eq!(err, IngestError::NoValidRows);
    }

    #[test]
    fn test_header_matching_is_substring_and_case_insensitive() {
        let csv = "Posting DATE,Total Cost (USD)\n2024-03-01,42.50\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns[0].date, "2024-03-01");
        assert_eq!(txns[0].amount, 42.50);
    }

    #[test]
    fn test_debit_header_serves_as_amount() {
        let csv = "Date,Debit,Description\n2024-01-05,75.25,STARBUCKS 1234\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns[0].amount, 75.25);
        assert_eq!(txns[0].category, "STARBUCKS 1234");
        assert!(txns[0].is_discretionary);
    }

    #[test]
    fn test_quoted_field_keeps_commas() {
        let csv = "Date,Amount,Category\n2024-01-01,100,\"Dining, Drinks\"\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns[0].category, "Dining, Drinks");
    }

    #[test]
    fn test_category_defaults_when_absent_or_empty() {
        let csv = "Date,Amount\n2024-01-01,10\n";
        assert_eq!(parse_csv(csv).unwrap()[0].category, "Uncategorized");

        let csv = "Date,Amount,Category\n2024-01-01,10,\n";
        assert_eq!(parse_csv(csv).unwrap()[0].category, "Uncategorized");
    }

    #[test]
    fn test_merchant_column_may_coincide_with_category() {
        let csv = "Date,Amount,Description\n2024-01-01,10,ACME STORE\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns[0].category, "ACME STORE");
        assert_eq!(txns[0].merchant.as_deref(), Some("ACME STORE"));
    }

    #[test]
    fn test_dropped_rows_leave_id_gaps_and_keep_order() {
        let csv = "Date,Amount\n2024-01-01,10\n2024-01-02,zero\n2024-01-03,30\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, "tx-0");
        assert_eq!(txns[1].id, "tx-2");
        assert_eq!(txns[1].date, "2024-01-03");
    }

    #[test]
    fn test_empty_date_cell_drops_row() {
        let csv = "Date,Amount\n,10\n2024-01-02,20\n";
        let txns = parse_csv(csv).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date, "2024-01-02");
    }

    #[test]
    fn test_empty_input_reports_missing_columns() {
        assert!(matches!(parse_csv(""), Err(IngestError::MissingColumn(_))));
    }
}
