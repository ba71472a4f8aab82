//! Subscription API handlers
//!
//! Contains HTTP request handlers for subscription CRUD operations and the
//! total cost query.

use crate::error::AppError;
use crate::state::AppState;
use crate::subscriptions::dto::parse_date;
use crate::subscriptions::{CostFilter, SubscriptionDto, SubscriptionRepository};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Query parameters of the total cost endpoint
///
/// Absent and empty parameters both mean "no constraint".
#[derive(Debug, Default, Deserialize)]
pub struct TotalCostParams {
    /// Owner to restrict to
    pub user_id: Option<String>,
    /// Case-insensitive service name fragment
    pub service_name: Option<String>,
    /// Earliest start date, `YYYY-MM-DD`
    pub from: Option<String>,
    /// Latest finish date, `YYYY-MM-DD`
    pub to: Option<String>,
}

impl TotalCostParams {
    /// Parse the raw parameters into a typed filter
    pub fn into_filter(self) -> Result<CostFilter, AppError> {
        let user_id = present(self.user_id)
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|_| AppError::Validation("invalid user_id format".to_string()))?;
        let from = present(self.from)
            .map(|d| parse_date(&d))
            .transpose()
            .map_err(|_| AppError::Validation("invalid from date".to_string()))?;
        let to = present(self.to)
            .map(|d| parse_date(&d))
            .transpose()
            .map_err(|_| AppError::Validation("invalid to date".to_string()))?;

        Ok(CostFilter {
            user_id,
            service_name: present(self.service_name),
            from,
            to,
        })
    }
}

/// Total cost response
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalCostResponse {
    /// Sum of matching prices
    pub total: u32,
}

/// GET /subscriptions/list - List all subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionDto>>, AppError> {
    let subs = state.repo().list().await?;
    Ok(Json(subs.into_iter().map(SubscriptionDto::from).collect()))
}

/// POST /subscriptions/create - Create a new subscription
pub async fn create_subscription(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubscriptionDto>), AppError> {
    let sub = decode_body(&body)?.into_subscription()?;
    let created = state.repo().create(&sub).await?;

    info!(subscription_id = %created.id, user_id = %created.user_id, "Subscription created");
    Ok((StatusCode::CREATED, Json(SubscriptionDto::from(created))))
}

/// GET /subscriptions/get/:id - Get a specific subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionDto>, AppError> {
    let id = parse_id(&id)?;
    let sub = state.repo().get_by_id(id).await?;
    Ok(Json(SubscriptionDto::from(sub)))
}

/// PUT /subscriptions/update/:id - Update a subscription
///
/// The path ID replaces any ID in the body. A missing record is reported
/// as a storage error (500), not 404.
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SubscriptionDto>, AppError> {
    let id = parse_id(&id)?;
    let mut sub = decode_body(&body)?.into_subscription()?;
    sub.id = id;

    let updated = state.repo().update(&sub).await.map_err(AppError::storage)?;

    info!(subscription_id = %updated.id, "Subscription updated");
    Ok(Json(SubscriptionDto::from(updated)))
}

/// DELETE /subscriptions/delete/:id - Delete a subscription
///
/// A missing record is reported as a storage error (500), not 404.
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.repo().delete(id).await.map_err(AppError::storage)?;

    info!(subscription_id = %id, "Subscription deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /subscriptions/total - Sum of prices over matching subscriptions
pub async fn total_cost(
    State(state): State<AppState>,
    Query(params): Query<TotalCostParams>,
) -> Result<Json<TotalCostResponse>, AppError> {
    let filter = params.into_filter()?;
    let total = state.repo().total_cost(&filter).await?;
    Ok(Json(TotalCostResponse { total }))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("invalid id format".to_string()))
}

fn decode_body(body: &[u8]) -> Result<SubscriptionDto, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::Validation("invalid JSON".to_string()))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
