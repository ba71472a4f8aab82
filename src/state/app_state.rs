//! Application state shared across handlers

use crate::subscriptions::SubscriptionRepository;
use std::sync::Arc;

/// Shared application state
///
/// Holds the storage behind the repository trait; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn SubscriptionRepository>,
}

impl AppState {
    /// Build state around any repository implementation
    pub fn new(repo: impl SubscriptionRepository + 'static) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    /// Storage used by the handlers
    pub fn repo(&self) -> &dyn SubscriptionRepository {
        self.repo.as_ref()
    }
}
