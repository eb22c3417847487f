//! Expense listing: filtering, ordering, pagination.
//!
//! Everything here is a pure function over a slice of expenses; storage
//! never leaks in, so a durable backend only has to produce the same slice.

use chrono::NaiveDate;

use crate::{Category, Expense};

/// Filters for listing expenses.
///
/// The date range is inclusive on both ends and only applies when **both**
/// bounds are present; a single bound is ignored. That mirrors the
/// long-standing listing behavior and is locked by a test rather than
/// silently changed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One page of a filtered listing.
#[derive(Clone, Debug)]
pub struct ExpensePage {
    pub items: Vec<Expense>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_count: u64,
}

/// Applies `filter` to `expenses`, keeping input order.
pub(crate) fn apply_filter(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| matches_filter(expense, filter))
        .cloned()
        .collect()
}

fn matches_filter(expense: &Expense, filter: &ExpenseFilter) -> bool {
    if let Some(category) = filter.category
        && expense.category != category
    {
        return false;
    }
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date)
        && !(start <= expense.date && expense.date <= end)
    {
        return false;
    }
    true
}

/// Runs the full listing pipeline over one owner's expenses.
///
/// `page` and `limit` are 1-based; zero values are clamped to 1 so the page
/// arithmetic can never divide by zero. Out-of-range pages yield an empty
/// item list, not an error.
pub(crate) fn run_query(
    expenses: &[Expense],
    filter: &ExpenseFilter,
    page: u64,
    limit: u64,
) -> ExpensePage {
    let page = page.max(1);
    let limit = limit.max(1);

    let mut filtered = apply_filter(expenses, filter);
    // Newest first; `sort_by` is stable, so same-date records keep their
    // insertion (id) order.
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    let total_count = filtered.len() as u64;
    let total_pages = total_count.div_ceil(limit);

    let offset = (page - 1).saturating_mul(limit);
    let items = if offset >= total_count {
        Vec::new()
    } else {
        let end = offset.saturating_add(limit).min(total_count);
        filtered[offset as usize..end as usize].to_vec()
    };

    ExpensePage {
        items,
        total_pages,
        current_page: page,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoneyCents;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn expense(id: u64, day: &str, category: Category) -> Expense {
        let now = Utc::now();
        Expense {
            id,
            user_id: 1,
            amount: MoneyCents::new(100),
            category,
            date: date(day),
            description: format!("expense {id}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "2024-01-05", Category::Food),
            expense(2, "2024-01-20", Category::Food),
            expense(3, "2024-02-01", Category::Bills),
            expense(4, "2024-02-01", Category::Shopping),
        ]
    }

    #[test]
    fn sorts_newest_first_with_stable_ties() {
        let page = run_query(&sample(), &ExpenseFilter::default(), 1, 10);
        let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
        // 3 and 4 share a date and keep insertion order.
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn category_filter_keeps_exact_matches() {
        let filter = ExpenseFilter {
            category: Some(Category::Food),
            ..Default::default()
        };
        let page = run_query(&sample(), &filter, 1, 10);
        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|e| e.category == Category::Food));
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ExpenseFilter {
            start_date: Some(date("2024-01-20")),
            end_date: Some(date("2024-02-01")),
            ..Default::default()
        };
        let page = run_query(&sample(), &filter, 1, 10);
        let ids: Vec<u64> = page.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 4, 2]);
    }

    #[test]
    fn single_bound_is_ignored() {
        // Only one bound given: the range filter does not apply at all.
        let filter = ExpenseFilter {
            start_date: Some(date("2024-02-01")),
            ..Default::default()
        };
        let page = run_query(&sample(), &filter, 1, 10);
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn pagination_envelope_and_slices() {
        let page = run_query(&sample(), &ExpenseFilter::default(), 2, 3);
        assert_eq!(page.total_count, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = run_query(&sample(), &ExpenseFilter::default(), 9, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn zero_limit_and_page_are_clamped() {
        let page = run_query(&sample(), &ExpenseFilter::default(), 0, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn empty_set_has_zero_pages() {
        let page = run_query(&[], &ExpenseFilter::default(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
    }
}
