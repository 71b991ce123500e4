//! In-memory filtering of a transaction batch ahead of aggregation.

use crate::transaction::Transaction;

/// Bounds applied to a batch before charting. Every field is optional;
/// `None` leaves that dimension unconstrained. Date bounds compare ISO
/// date strings and are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(start) = &self.start_date {
            if t.date.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if t.date.as_str() > end.as_str() {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &t.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if t.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if t.amount > max {
                return false;
            }
        }
        true
    }

    /// Keep the transactions that satisfy every bound, in input order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
