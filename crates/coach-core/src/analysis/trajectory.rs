//! Spending trajectory across months

use std::collections::BTreeMap;

use crate::analysis::aggregate::category_totals;
use crate::models::{BiggestJump, CategoryJump, MonthTotal, Transaction, Trajectory};
use crate::month::YearMonth;

/// Group transactions into one total per month present in the data
///
/// Months are returned in chronological order. A month with only income
/// still appears, with zero spend.
pub fn month_totals(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut by_month: BTreeMap<YearMonth, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_month.entry(YearMonth::of(tx.date)).or_default().push(tx);
    }

    by_month
        .into_iter()
        .map(|(month, txs)| {
            let by_category = category_totals(txs);
            MonthTotal {
                year: month.year(),
                month: month.month(),
                total_spent: by_category.iter().map(|c| c.total_spent).sum(),
                by_category,
            }
        })
        .collect()
}

/// Build the trajectory over the last `window` months (0 = all)
pub fn build_trajectory(transactions: &[Transaction], window: usize) -> Trajectory {
    let mut months = month_totals(transactions);
    if window > 0 && months.len() > window {
        months.drain(..months.len() - window);
    }

    Trajectory {
        biggest_jump: biggest_jump(&months),
        category_jump: category_jump(&months),
        months,
    }
}

/// Largest signed change in total spend between adjacent entries
///
/// Adjacent means neighbours in the list, not calendar neighbours. The
/// delta is `later - earlier`, so when spend only fell the result is the
/// smallest drop and `delta` is negative. Ties go to the earliest pair.
/// `None` with fewer than two months.
pub fn biggest_jump(months: &[MonthTotal]) -> Option<BiggestJump> {
    let mut best: Option<BiggestJump> = None;

    for pair in months.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let delta = to.total_spent - from.total_spent;
        if best.as_ref().map_or(true, |b| delta > b.delta) {
            best = Some(BiggestJump {
                from_year: from.year,
                from_month: from.month,
                to_year: to.year,
                to_month: to.month,
                delta,
            });
        }
    }

    best
}

/// Largest month-over-month change within one category
///
/// Each category is compared across the consecutive months in which it has
/// spending. Categories are scanned in name order and the first largest
/// absolute change wins. A category whose spend never changes yields `None`.
pub fn category_jump(months: &[MonthTotal]) -> Option<CategoryJump> {
    let mut series: BTreeMap<&str, Vec<(i32, u32, f64)>> = BTreeMap::new();
    for month in months {
        for cat in &month.by_category {
            if cat.total_spent > 0.0 {
                series
                    .entry(cat.category_name.as_str())
                    .or_default()
                    .push((month.year, month.month, cat.total_spent));
            }
        }
    }

    let mut best: Option<CategoryJump> = None;
    for (name, points) in series {
        for pair in points.windows(2) {
            let (from_year, from_month, before) = pair[0];
            let (to_year, to_month, after) = pair[1];
            let change = after - before;

            if change.abs() > best.as_ref().map_or(0.0, |b| b.absolute_change.abs()) {
                best = Some(CategoryJump {
                    category_name: name.to_string(),
                    from_year,
                    from_month,
                    to_year,
                    to_month,
                    absolute_change: change,
                    percentage_change: (before != 0.0).then(|| change / before * 100.0),
                });
            }
        }
    }

    best
}
