//! PostgreSQL subscription storage
//!
//! Each operation is a single statement against the `subscription` table.

use crate::subscriptions::models::Subscription;
use crate::subscriptions::repository::{CostFilter, RepoError, RepoResult, SubscriptionRepository};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = "id, service_name, price, user_id, start_date, finish_date";

/// Subscription repository backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and verify the database answers
    ///
    /// # Arguments
    /// * `options` - Host, credentials and database to connect to
    /// * `max_connections` - Pool size limit
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self::new(pool);
        repo.ping().await?;
        Ok(repo)
    }

    /// Apply the bundled schema
    ///
    /// Statements are idempotent, so running this against an existing
    /// database is a no-op.
    pub async fn run_migrations(&self) -> RepoResult<()> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_subscription.sql");
        sqlx::raw_sql(migration_sql).execute(&self.pool).await?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Subscription> {
        sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscription WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    async fn create(&self, sub: &Subscription) -> RepoResult<Subscription> {
        let created = sqlx::query_as::<_, Subscription>(&format!(
            "INSERT INTO subscription (id, user_id, service_name, price, start_date, finish_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(sub.id)
        .bind(sub.user_id)
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.start_date)
        .bind(sub.finish_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Conflict(sub.id),
            other => RepoError::Database(other),
        })?;

        debug!("Created subscription: {}", created.id);
        Ok(created)
    }

    async fn update(&self, sub: &Subscription) -> RepoResult<Subscription> {
        let updated = sqlx::query_as::<_, Subscription>(&format!(
            "UPDATE subscription
             SET service_name = $1, price = $2, start_date = $3, finish_date = $4
             WHERE id = $5
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.start_date)
        .bind(sub.finish_date)
        .bind(sub.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound(sub.id))?;

        debug!("Updated subscription: {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM subscription WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("Deleted subscription: {}", id);
        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<Subscription>> {
        let subs = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscription"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(subs)
    }

    async fn total_cost(&self, filter: &CostFilter) -> RepoResult<u32> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price), 0)::BIGINT
             FROM subscription
             WHERE ($1::uuid IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR strpos(lower(service_name), lower($2)) > 0)
               AND ($3::date IS NULL OR start_date >= $3)
               AND ($4::date IS NULL OR finish_date <= $4 OR finish_date IS NULL)",
        )
        .bind(filter.user_id)
        .bind(filter.service_name.as_deref())
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.pool)
        .await?;

        u32::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("total cost {} out of range", total)))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
