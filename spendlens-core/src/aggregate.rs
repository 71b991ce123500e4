//! Pure reductions from a transaction batch to chart-ready summaries.

use std::collections::HashMap;

use crate::transaction::{CategorySummary, ChartDataPoint, SpendType, Transaction};

/// How many categories [`aggregate_categories`] retains.
pub const TOP_CATEGORIES: usize = 8;

/// Per-day essential/discretionary totals.
///
/// Transactions are stably sorted by date ascending, then grouped by the
/// exact date string in first-seen order. Every active date emits exactly
/// two points, Essential then Discretionary, even when one bucket summed
/// to zero.
pub fn aggregate_daily_spending(transactions: &[Transaction]) -> Vec<ChartDataPoint> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (f64, f64)> = HashMap::new();
    for t in sorted {
        let entry = totals.entry(t.date.clone()).or_insert_with(|| {
            order.push(t.date.clone());
            (0.0, 0.0)
        });
        if t.is_discretionary {
            entry.1 += t.amount;
        } else {
            entry.0 += t.amount;
        }
    }

    let mut points = Vec::with_capacity(order.len() * 2);
    for date in order {
        let (essential, discretionary) = totals[&date];
        points.push(ChartDataPoint {
            date: date.clone(),
            amount: essential,
            spend_type: SpendType::Essential,
        });
        points.push(ChartDataPoint {
            date,
            amount: discretionary,
            spend_type: SpendType::Discretionary,
        });
    }
    points
}

/// Per-category spend totals, descending, truncated to [`TOP_CATEGORIES`].
/// Ties keep the order in which the categories were first encountered.
pub fn aggregate_categories(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for t in transactions {
        let entry = totals.entry(t.category.clone()).or_insert_with(|| {
            order.push(t.category.clone());
            0.0
        });
        *entry += t.amount;
    }

    let mut summaries: Vec<CategorySummary> = order
        .into_iter()
        .map(|name| {
            let value = totals[&name];
            CategorySummary { name, value }
        })
        .collect();
    summaries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap());
    summaries.truncate(TOP_CATEGORIES);
    summaries
}

/// Distinct categories present in a batch, sorted for presentation.
pub fn unique_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for t in transactions {
        if !categories.contains(&t.category) {
            categories.push(t.category.clone());
        }
    }
    categories.sort();
    categories
}
