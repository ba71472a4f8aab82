//! Subscriptions module
//!
//! Domain model, request/response mapping and storage for subscription
//! records. Storage is reached only through [`SubscriptionRepository`].

pub mod dto;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use dto::{DtoError, SubscriptionDto};
pub use memory::InMemorySubscriptionRepository;
pub use models::Subscription;
pub use postgres::PgSubscriptionRepository;
pub use repository::{CostFilter, RepoError, RepoResult, SubscriptionRepository};
