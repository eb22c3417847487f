//! In-memory expense collection, scoped per owner.
//!
//! Every read and mutation takes the owning user id; a record is only ever
//! visible to its owner, an id match alone is not enough.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Category, EngineError, MoneyCents, ResultEngine};

/// A single expense record.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: u64,
    pub user_id: u64,
    pub amount: MoneyCents,
    pub category: Category,
    /// Calendar date of the expense, distinct from the audit timestamps.
    pub date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial field replacement for [`ExpenseStore::update`].
///
/// Absent fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct ExpenseChanges {
    pub amount: Option<MoneyCents>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Owns the expense collection and assigns ids.
///
/// Records keep insertion order; ids grow monotonically starting at 1 and
/// are never reused after deletion.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: u64,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a new expense for `user_id`.
    ///
    /// `date` defaults to the current UTC date when absent. The description
    /// is trimmed and must not end up empty; the amount must not be
    /// negative.
    pub fn create(
        &mut self,
        user_id: u64,
        amount: MoneyCents,
        category: Category,
        date: Option<NaiveDate>,
        description: &str,
    ) -> ResultEngine<Expense> {
        validate_amount(amount)?;
        let description = validate_description(description)?;

        let now = Utc::now();
        let expense = Expense {
            id: self.next_id,
            user_id,
            amount,
            category,
            date: date.unwrap_or_else(|| now.date_naive()),
            description,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// All expenses owned by `user_id`, in insertion order.
    pub fn find_all_by_user(&self, user_id: u64) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Returns the record only when both id and owner match.
    pub fn find_owned(&self, id: u64, user_id: u64) -> Option<&Expense> {
        self.expenses
            .iter()
            .find(|expense| expense.id == id && expense.user_id == user_id)
    }

    /// Replaces the supplied fields of an owned record, bumping
    /// `updated_at`. Fails with `NotFound` when the record is absent or
    /// owned by someone else.
    pub fn update(
        &mut self,
        id: u64,
        user_id: u64,
        changes: ExpenseChanges,
    ) -> ResultEngine<Expense> {
        if let Some(amount) = changes.amount {
            validate_amount(amount)?;
        }
        let description = match &changes.description {
            Some(description) => Some(validate_description(description)?),
            None => None,
        };

        let Some(expense) = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == id && expense.user_id == user_id)
        else {
            return Err(EngineError::NotFound("expense".to_string()));
        };

        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category) = changes.category {
            expense.category = category;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(description) = description {
            expense.description = description;
        }
        expense.updated_at = Utc::now();
        Ok(expense.clone())
    }

    /// Removes an owned record. Fails with `NotFound` when the record is
    /// absent or owned by someone else; the id is not reused afterwards.
    pub fn delete(&mut self, id: u64, user_id: u64) -> ResultEngine<()> {
        match self
            .expenses
            .iter()
            .position(|expense| expense.id == id && expense.user_id == user_id)
        {
            Some(index) => {
                self.expenses.remove(index);
                Ok(())
            }
            None => Err(EngineError::NotFound("expense".to_string())),
        }
    }
}

fn validate_amount(amount: MoneyCents) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> ResultEngine<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn store_with_expense() -> (ExpenseStore, Expense) {
        let mut store = ExpenseStore::new();
        let expense = store
            .create(
                1,
                MoneyCents::new(1000),
                Category::Food,
                Some(date("2024-01-05")),
                "groceries",
            )
            .unwrap();
        (store, expense)
    }

    #[test]
    fn create_trims_description_and_defaults_date() {
        let mut store = ExpenseStore::new();
        let expense = store
            .create(1, MoneyCents::new(100), Category::Other, None, "  coffee  ")
            .unwrap();
        assert_eq!(expense.description, "coffee");
        assert_eq!(expense.date, Utc::now().date_naive());
    }

    #[test]
    fn create_rejects_negative_amount() {
        let mut store = ExpenseStore::new();
        let err = store
            .create(1, MoneyCents::new(-1), Category::Food, None, "refund?")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn create_rejects_blank_description() {
        let mut store = ExpenseStore::new();
        let err = store
            .create(1, MoneyCents::new(100), Category::Food, None, "   ")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn find_owned_requires_matching_owner() {
        let (store, expense) = store_with_expense();
        assert!(store.find_owned(expense.id, 1).is_some());
        assert!(store.find_owned(expense.id, 2).is_none());
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let (mut store, expense) = store_with_expense();
        let updated = store
            .update(
                expense.id,
                1,
                ExpenseChanges {
                    amount: Some(MoneyCents::new(1250)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, MoneyCents::new(1250));
        assert_eq!(updated.category, Category::Food);
        assert_eq!(updated.description, "groceries");
        assert!(updated.updated_at >= expense.updated_at);
    }

    #[test]
    fn update_misses_foreign_records() {
        let (mut store, expense) = store_with_expense();
        let err = store
            .update(expense.id, 2, ExpenseChanges::default())
            .unwrap_err();
        assert_eq!(err, EngineError::NotFound("expense".to_string()));
    }

    #[test]
    fn delete_misses_foreign_records_and_keeps_them() {
        let (mut store, expense) = store_with_expense();
        assert!(store.delete(expense.id, 2).is_err());
        assert!(store.find_owned(expense.id, 1).is_some());
        store.delete(expense.id, 1).unwrap();
        assert!(store.find_owned(expense.id, 1).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (mut store, expense) = store_with_expense();
        store.delete(expense.id, 1).unwrap();
        let next = store
            .create(1, MoneyCents::new(100), Category::Bills, None, "rent")
            .unwrap();
        assert!(next.id > expense.id);
    }
}
