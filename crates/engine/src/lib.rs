use chrono::NaiveDate;
use tokio::sync::RwLock;

pub use category::Category;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseChanges, ExpenseStore};
pub use money::MoneyCents;
pub use query::{ExpenseFilter, ExpensePage};
pub use sessions::{Claims, SESSION_VALIDITY_DAYS, SessionIssuer};
pub use stats::{CategoryBreakdown, CategoryTotal, MonthlyTotal};
pub use users::{BCRYPT_COST, User, UserStore};

mod category;
mod error;
mod expenses;
mod money;
mod query;
mod sessions;
mod stats;
mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// Core façade: owns the stores and the session issuer.
///
/// Each store sits behind its own lock. Mutations hold the write lock for
/// the whole operation, so identifier assignment never interleaves and two
/// concurrent writes to the same collection cannot lose updates. Password
/// hashing runs on the blocking pool with no lock held.
#[derive(Debug)]
pub struct Engine {
    users: RwLock<UserStore>,
    expenses: RwLock<ExpenseStore>,
    sessions: SessionIssuer,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The session issuer bound to this engine's signing secret.
    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Registers a new account.
    ///
    /// The username is trimmed and the email trimmed and lowercased before
    /// the uniqueness check; either field colliding with an existing record
    /// fails with [`EngineError::DuplicateIdentity`]. Only a bcrypt hash of
    /// the password is stored.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<User> {
        let username = users::normalize_username(username).to_string();
        let email = users::normalize_email(email);
        if username.is_empty() || email.is_empty() {
            return Err(EngineError::InvalidInput(
                "username and email must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        // Fail fast before paying for a hash; the store re-checks under the
        // write lock so a racing duplicate still loses.
        {
            let store = self.users.read().await;
            if store.contains_identity(&username, &email) {
                return Err(EngineError::DuplicateIdentity);
            }
        }

        let raw = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || users::hash_password(&raw))
            .await
            .map_err(|err| EngineError::Internal(format!("hashing task failed: {err}")))??;

        let mut store = self.users.write().await;
        store.insert(username, email, password_hash)
    }

    /// Checks credentials and returns the matching account.
    ///
    /// An unknown email and a wrong password return the same
    /// [`EngineError::InvalidCredentials`]; callers cannot tell which check
    /// failed.
    pub async fn verify(&self, email: &str, password: &str) -> ResultEngine<User> {
        let user = {
            let store = self.users.read().await;
            store.find_by_email(email).cloned()
        };
        let Some(user) = user else {
            return Err(EngineError::InvalidCredentials);
        };

        let raw = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || users::verify_password(&raw, &hash))
            .await
            .map_err(|err| EngineError::Internal(format!("hashing task failed: {err}")))??;

        if matches {
            Ok(user)
        } else {
            Err(EngineError::InvalidCredentials)
        }
    }

    pub async fn user_by_id(&self, id: u64) -> Option<User> {
        let store = self.users.read().await;
        store.find_by_id(id).cloned()
    }

    /// Add a new expense for `user_id`.
    pub async fn add_expense(
        &self,
        user_id: u64,
        amount: MoneyCents,
        category: Category,
        date: Option<NaiveDate>,
        description: &str,
    ) -> ResultEngine<Expense> {
        let mut store = self.expenses.write().await;
        store.create(user_id, amount, category, date, description)
    }

    /// Return an expense owned by `user_id`.
    pub async fn expense(&self, id: u64, user_id: u64) -> ResultEngine<Expense> {
        let store = self.expenses.read().await;
        store
            .find_owned(id, user_id)
            .cloned()
            .ok_or(EngineError::NotFound("expense".to_string()))
    }

    /// Update an expense owned by `user_id`, replacing only the supplied
    /// fields.
    pub async fn update_expense(
        &self,
        id: u64,
        user_id: u64,
        changes: ExpenseChanges,
    ) -> ResultEngine<Expense> {
        let mut store = self.expenses.write().await;
        store.update(id, user_id, changes)
    }

    /// Delete an expense owned by `user_id`.
    pub async fn delete_expense(&self, id: u64, user_id: u64) -> ResultEngine<()> {
        let mut store = self.expenses.write().await;
        store.delete(id, user_id)
    }

    /// List a user's expenses: filtered, newest first, paginated.
    pub async fn list_expenses(
        &self,
        user_id: u64,
        filter: &ExpenseFilter,
        page: u64,
        limit: u64,
    ) -> ExpensePage {
        let expenses = {
            let store = self.expenses.read().await;
            store.find_all_by_user(user_id)
        };
        query::run_query(&expenses, filter, page, limit)
    }

    /// Per-category totals over a user's (optionally date-filtered)
    /// expenses.
    pub async fn category_breakdown(
        &self,
        user_id: u64,
        filter: &ExpenseFilter,
    ) -> CategoryBreakdown {
        let expenses = {
            let store = self.expenses.read().await;
            store.find_all_by_user(user_id)
        };
        stats::category_breakdown(&expenses, filter)
    }

    /// Per-month totals for one calendar year of a user's expenses.
    pub async fn monthly_trend(&self, user_id: u64, year: i32) -> Vec<MonthlyTotal> {
        let expenses = {
            let store = self.expenses.read().await;
            store.find_all_by_user(user_id)
        };
        stats::monthly_trend(&expenses, year)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    secret: Option<String>,
}

impl EngineBuilder {
    /// Pass the required token signing secret.
    pub fn secret(mut self, secret: &str) -> EngineBuilder {
        self.secret = Some(secret.to_string());
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let secret = self
            .secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                EngineError::InvalidInput("token signing secret is required".to_string())
            })?;

        Ok(Engine {
            users: RwLock::new(UserStore::new()),
            expenses: RwLock::new(ExpenseStore::new()),
            sessions: SessionIssuer::new(secret.as_bytes()),
        })
    }
}
