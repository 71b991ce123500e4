//! Plain-text rendering of aggregates and the analysis narrative.

use spendlens_core::{
    AnalysisResult, SpendType, Transaction, aggregate_categories, aggregate_daily_spending,
    unique_categories,
};

pub fn print_aggregates(transactions: &[Transaction]) {
    let total: f64 = transactions.iter().map(|t| t.amount).sum();
    let discretionary: f64 = transactions
        .iter()
        .filter(|t| t.is_discretionary)
        .map(|t| t.amount)
        .sum();
    let essential = total - discretionary;
    let ratio = if total > 0.0 { discretionary / total * 100.0 } else { 0.0 };

    println!("## Totals\n");
    println!("- Total spent: ₹{total:.2}");
    println!("- Essential: ₹{essential:.2}");
    println!("- Discretionary: ₹{discretionary:.2} ({ratio:.1}%)");
    println!("- Categories: {}\n", unique_categories(transactions).join(", "));

    println!("## Daily spending\n");
    for point in aggregate_daily_spending(transactions) {
        let label = match point.spend_type {
            SpendType::Essential => "essential",
            SpendType::Discretionary => "discretionary",
        };
        println!("- {} {:>13}: ₹{:.2}", point.date, label, point.amount);
    }

    println!("\n## Top categories\n");
    for (i, summary) in aggregate_categories(transactions).iter().enumerate() {
        println!("{}. {}: ₹{:.2}", i + 1, summary.name, summary.value);
    }
    println!();
}

pub fn print_analysis(result: &AnalysisResult) {
    println!("## Stress analysis\n");
    println!("Score: {:.0} ({:?})\n", result.score, result.level);

    println!("Observations:");
    for obs in &result.observations {
        println!("- {obs}");
    }

    println!("\nRecent changes: {}", result.recent_changes);
    println!("Key habit: {}", result.importance);

    println!("\nRecommendations:");
    for rec in &result.recommendations {
        println!("- {rec}");
    }
}
