//! In-memory subscription storage
//!
//! Applies the same filter and not-found rules as the PostgreSQL
//! repository. Used by the HTTP tests and for running without a database.

use crate::subscriptions::models::Subscription;
use crate::subscriptions::repository::{CostFilter, RepoError, RepoResult, SubscriptionRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Subscription repository holding rows in a map
#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepository {
    rows: RwLock<HashMap<Uuid, Subscription>>,
}

impl InMemorySubscriptionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Subscription> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    async fn create(&self, sub: &Subscription) -> RepoResult<Subscription> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&sub.id) {
            return Err(RepoError::Conflict(sub.id));
        }
        rows.insert(sub.id, sub.clone());
        Ok(sub.clone())
    }

    async fn update(&self, sub: &Subscription) -> RepoResult<Subscription> {
        let mut rows = self.rows.write().await;
        let stored = rows.get_mut(&sub.id).ok_or(RepoError::NotFound(sub.id))?;

        stored.service_name = sub.service_name.clone();
        stored.price = sub.price;
        stored.start_date = sub.start_date;
        stored.finish_date = sub.finish_date;

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }

    async fn list(&self) -> RepoResult<Vec<Subscription>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn total_cost(&self, filter: &CostFilter) -> RepoResult<u32> {
        let total: i64 = self
            .rows
            .read()
            .await
            .values()
            .filter(|sub| filter.matches(sub))
            .map(|sub| i64::from(sub.price))
            .sum();

        u32::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("total cost {} out of range", total)))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
