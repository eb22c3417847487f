//! Aggregate reporting over a user's expenses.
//!
//! Like the listing pipeline, aggregation is pure over a slice of expenses.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::{Category, Expense, MoneyCents};
use crate::query::{ExpenseFilter, apply_filter};

/// Per-category slice of a breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: MoneyCents,
    pub count: u64,
}

/// Category breakdown over a (possibly date-filtered) expense set.
///
/// `breakdown` is ordered by total descending; equal totals fall back to
/// category name so the order is deterministic.
#[derive(Clone, Debug)]
pub struct CategoryBreakdown {
    pub total: MoneyCents,
    pub breakdown: Vec<CategoryTotal>,
}

/// One month of a yearly trend. Months without expenses are omitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// Calendar month, 1-12.
    pub month: u32,
    pub total: MoneyCents,
    pub count: u64,
}

pub(crate) fn category_breakdown(
    expenses: &[Expense],
    filter: &ExpenseFilter,
) -> CategoryBreakdown {
    let matched = apply_filter(expenses, filter);

    let mut total = MoneyCents::ZERO;
    let mut groups: HashMap<Category, (MoneyCents, u64)> = HashMap::new();
    for expense in &matched {
        total += expense.amount;
        let entry = groups.entry(expense.category).or_insert((MoneyCents::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    CategoryBreakdown { total, breakdown }
}

pub(crate) fn monthly_trend(expenses: &[Expense], year: i32) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<u32, (MoneyCents, u64)> = BTreeMap::new();
    for expense in expenses {
        if expense.date.year() != year {
            continue;
        }
        let entry = months
            .entry(expense.date.month())
            .or_insert((MoneyCents::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|(month, (total, count))| MonthlyTotal {
            month,
            total,
            count,
        })
        .collect()
}
