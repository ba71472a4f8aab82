//! Subscription Service Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Shared request state
pub mod state;
pub mod subscriptions;

pub use api::router;
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
