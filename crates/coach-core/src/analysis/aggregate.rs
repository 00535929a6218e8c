//! Monthly aggregation

use std::collections::BTreeMap;

use crate::models::{CategoryTotal, MonthlySummary, Transaction};
use crate::month::YearMonth;

/// Sum expense magnitudes per category
///
/// Income and zero amounts are ignored. The result is sorted by spend,
/// largest first, with ties broken by category name.
pub fn category_totals<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.into_iter().filter(|t| t.is_expense()) {
        *by_category.entry(tx.category.as_str()).or_insert(0.0) += tx.spent();
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(name, total)| CategoryTotal {
            category_name: name.to_string(),
            total_spent: total,
        })
        .collect();

    // Stable sort keeps the BTreeMap name order for equal totals
    totals.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    totals
}

/// Summarize one calendar month
///
/// Transactions outside the month are skipped, so callers may pass a wider
/// slice. An empty month yields zero totals rather than an error.
pub fn monthly_summary(month: YearMonth, transactions: &[Transaction]) -> MonthlySummary {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .collect();

    let by_category = category_totals(in_month.iter().copied());
    let total_spent = by_category.iter().map(|c| c.total_spent).sum();
    let total_income = in_month
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();

    MonthlySummary {
        year: month.year(),
        month: month.month(),
        total_spent,
        total_income,
        by_category,
    }
}
