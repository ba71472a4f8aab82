//! Health check handler

use crate::error::AppError;
use crate::state::AppState;
use crate::subscriptions::SubscriptionRepository;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" when storage answered
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET /health - Report liveness and database reachability
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.repo().ping().await.map_err(AppError::Unavailable)?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
