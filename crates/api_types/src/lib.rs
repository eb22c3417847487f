use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Expense categories accepted over the API.
///
/// Serialized with the exact labels clients send ("Food", "Bills", ...).
/// The engine owns its own copy of this enum; the server maps between the
/// two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Bills,
    Shopping,
    Healthcare,
    Education,
    Other,
}

/// Plain confirmation body (logout, delete).
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod user {
    use super::*;

    /// Request body for `POST /api/auth/register`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterNew {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    /// Request body for `POST /api/auth/login`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    /// Public view of an account; never carries the password hash.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: u64,
        pub username: String,
        pub email: String,
    }

    /// Response body for register and login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub message: String,
        pub user: UserView,
    }
}

pub mod expense {
    use super::*;

    /// Request body for `POST /api/expenses`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Amount in integer cents; must be >= 0.
        pub amount_cents: i64,
        pub category: Category,
        /// ISO-8601 calendar date; defaults to today when absent.
        pub date: Option<NaiveDate>,
        pub description: String,
    }

    /// Request body for `PUT /api/expenses/{id}`.
    ///
    /// Absent fields keep their stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub amount_cents: Option<i64>,
        pub category: Option<Category>,
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
    }

    /// A stored expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: u64,
        pub user_id: u64,
        pub amount_cents: i64,
        pub category: Category,
        pub date: NaiveDate,
        pub description: String,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
        /// RFC3339 timestamp (UTC).
        pub updated_at: DateTime<Utc>,
    }

    /// Query string for `GET /api/expenses`.
    ///
    /// The date range only applies when both bounds are present.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseListQuery {
        /// 1-based page number; defaults to 1.
        pub page: Option<u64>,
        /// Page size; defaults to 10.
        pub limit: Option<u64>,
        pub category: Option<Category>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Response envelope for `GET /api/expenses`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
        pub total_pages: u64,
        pub current_page: u64,
        pub total_count: u64,
    }
}

pub mod stats {
    use super::*;

    /// Query string for `GET /api/expenses/stats`; the range only applies
    /// when both bounds are present.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatsQuery {
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// One category slice of the breakdown.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: Category,
        pub total_cents: i64,
        pub count: u64,
    }

    /// Response body for `GET /api/expenses/stats`, ordered by total
    /// descending.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BreakdownResponse {
        pub total_cents: i64,
        pub breakdown: Vec<CategoryTotalView>,
    }

    /// Query string for `GET /api/expenses/trends`; `year` defaults to the
    /// current year.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TrendQuery {
        pub year: Option<i32>,
    }

    /// One month of `GET /api/expenses/trends`; months without expenses
    /// are omitted.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TrendPoint {
        pub month: u32,
        pub total_cents: i64,
        pub count: u64,
    }
}
