//! Synthetic statement data for demo mode.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::transaction::Transaction;

/// Generate roughly 30 days of synthetic transactions ending today.
///
/// Fixed essential bills (rent on the window boundary, weekly groceries)
/// plus randomized discretionary activity that fires more often in the
/// most recent week, so the demo dataset always shows a recent spike.
pub fn generate_sample_data() -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();
    let mut data = Vec::new();

    for i in 0..30i64 {
        let date = (today - Duration::days(i)).format("%Y-%m-%d").to_string();

        if i % 30 == 0 {
            data.push(sample_txn(format!("rent-{i}"), &date, 15000.0, "Rent", false));
        }
        if i % 7 == 0 {
            let amount = 1500.0 + rng.gen_range(0.0..1000.0);
            data.push(sample_txn(format!("grocery-{i}"), &date, amount, "Groceries", false));
        }

        let stressed_week = i < 7;

        let impulse_chance = if stressed_week { 0.7 } else { 0.2 };
        if rng.gen_bool(impulse_chance) {
            let amount = 250.0 + rng.gen_range(0.0..200.0);
            data.push(sample_txn(format!("coffee-{i}"), &date, amount, "Cafe/Dining", true));
        }

        let shopping_chance = if stressed_week { 0.4 } else { 0.1 };
        if rng.gen_bool(shopping_chance) {
            let amount = 800.0 + rng.gen_range(0.0..3000.0);
            data.push(sample_txn(format!("shop-{i}"), &date, amount, "Online Shopping", true));
        }
    }
    data
}

fn sample_txn(id: String, date: &str, amount: f64, category: &str, discretionary: bool) -> Transaction {
    Transaction {
        id,
        date: date.to_string(),
        amount,
        category: category.to_string(),
        merchant: None,
        is_discretionary: discretionary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_contains_fixed_bills() {
        let data = generate_sample_data();
        assert_eq!(data.iter().filter(|t| t.category == "Rent").count(), 1);
        assert_eq!(data.iter().filter(|t| t.category == "Groceries").count(), 5);
    }

    #[test]
    fn test_sample_amounts_are_positive_spend() {
        for t in generate_sample_data() {
            assert!(t.amount > 0.0, "{} has non-positive amount", t.id);
        }
    }

    #[test]
    fn test_sample_flags_follow_category() {
        for t in generate_sample_data() {
            match t.category.as_str() {
                "Rent" | "Groceries" => assert!(!t.is_discretionary),
                "Cafe/Dining" | "Online Shopping" => assert!(t.is_discretionary),
                other => panic!("unexpected category {other}"),
            }
        }
    }

    #[test]
    fn test_sample_dates_are_iso_within_window() {
        let today = Utc::now().date_naive();
        let oldest = today - Duration::days(29);
        for t in generate_sample_data() {
            let date = chrono::NaiveDate::parse_from_str(&t.date, "%Y-%m-%d").unwrap();
            assert!(date >= oldest && date <= today);
        }
    }
}
