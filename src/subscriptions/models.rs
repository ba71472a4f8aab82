//! Subscription data model
//!
//! Mirrors one row of the `subscription` table.

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// A user's paid access to a named service over a date range
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Subscription {
    /// Unique identifier, assigned on creation
    pub id: Uuid,
    /// Free-text service label (e.g. "Netflix")
    pub service_name: String,
    /// Price in minor currency units
    pub price: i32,
    /// Owning user; not checked against any users table
    pub user_id: Uuid,
    /// First day of the subscription
    pub start_date: NaiveDate,
    /// Last day of the subscription, `None` while open-ended
    pub finish_date: Option<NaiveDate>,
}

impl Subscription {
    /// Create a new subscription with a freshly generated ID
    pub fn new(
        service_name: impl Into<String>,
        price: i32,
        user_id: Uuid,
        start_date: NaiveDate,
        finish_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Self::generate_id(),
            service_name: service_name.into(),
            price,
            user_id,
            start_date,
            finish_date,
        }
    }

    /// Generate a new unique ID
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    /// Whether the subscription has no finish date
    pub fn is_open_ended(&self) -> bool {
        self.finish_date.is_none()
    }
}
