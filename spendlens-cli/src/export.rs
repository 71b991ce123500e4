//! CSV export of normalized transactions.

use std::io::Write;

use anyhow::{Context, Result};
use spendlens_core::Transaction;

/// Write a normalized batch as CSV.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["id", "date", "amount", "category", "merchant", "discretionary"])
        .context("writing export header")?;

    for t in transactions {
        let amount = format!("{:.2}", t.amount);
        w.write_record([
            t.id.as_str(),
            t.date.as_str(),
            amount.as_str(),
            t.category.as_str(),
            t.merchant.as_deref().unwrap_or(""),
            if t.is_discretionary { "true" } else { "false" },
        ])
        .context("writing export row")?;
    }

    w.flush().context("flushing export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_quotes_fields_with_commas() {
        let txns = vec![Transaction {
            id: "tx-0".to_string(),
            date: "2024-01-01".to_string(),
            amount: 12.5,
            category: "Dining, Drinks".to_string(),
            merchant: None,
            is_discretionary: true,
        }];
        let mut buf = Vec::new();
        write_csv(&mut buf, &txns).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("id,date,amount,category,merchant,discretionary\n"));
        assert!(out.contains("tx-0,2024-01-01,12.50,\"Dining, Drinks\",,true"));
    }
}
