//! Storage contract for subscriptions
//!
//! HTTP handlers depend on [`SubscriptionRepository`] only, so the
//! PostgreSQL implementation can be swapped for the in-memory one in tests.

use crate::subscriptions::models::Subscription;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Result alias for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by subscription storage
#[derive(Error, Debug)]
pub enum RepoError {
    /// No row matched the given ID
    #[error("Subscription not found: {0}")]
    NotFound(Uuid),

    /// A row with this ID already exists
    #[error("Subscription already exists: {0}")]
    Conflict(Uuid),

    /// Driver, connection or constraint failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be represented in the domain types
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Filters for the aggregate cost query
///
/// Every field is optional; `None` places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostFilter {
    /// Exact owner match
    pub user_id: Option<Uuid>,
    /// Case-insensitive substring of the service name
    pub service_name: Option<String>,
    /// Lower bound on `start_date` (inclusive)
    pub from: Option<NaiveDate>,
    /// Upper bound on `finish_date` (inclusive); open-ended rows always pass
    pub to: Option<NaiveDate>,
}

impl CostFilter {
    /// Whether a record passes every supplied filter
    pub fn matches(&self, sub: &Subscription) -> bool {
        if self.user_id.is_some_and(|user_id| sub.user_id != user_id) {
            return false;
        }

        if let Some(needle) = &self.service_name {
            if !sub
                .service_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        if self.from.is_some_and(|from| sub.start_date < from) {
            return false;
        }

        match (self.to, sub.finish_date) {
            (Some(to), Some(finish)) => finish <= to,
            _ => true,
        }
    }
}

/// Subscription storage operations
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetch one record, or [`RepoError::NotFound`]
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Subscription>;

    /// Insert a record as-is and return what was stored
    async fn create(&self, sub: &Subscription) -> RepoResult<Subscription>;

    /// Overwrite name, price and dates of the record with `sub.id`
    ///
    /// `user_id` is never changed. Returns the stored record.
    async fn update(&self, sub: &Subscription) -> RepoResult<Subscription>;

    /// Hard-delete a record
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// All records, in no particular order
    async fn list(&self) -> RepoResult<Vec<Subscription>>;

    /// Sum of `price` over records matching `filter`; zero when none match
    async fn total_cost(&self, filter: &CostFilter) -> RepoResult<u32>;

    /// Check that storage is reachable
    async fn ping(&self) -> RepoResult<()>;
}
