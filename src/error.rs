//! Error types and error handling for the application
//!
//! This module defines the HTTP-facing error type. Responses carry a
//! plain-text body with the error message.

use crate::subscriptions::{DtoError, RepoError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error types
///
/// Each variant maps to one HTTP status via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed JSON, identifier, date or filter
    #[error("{0}")]
    Validation(String),

    /// No subscription matched the requested ID
    #[error("not found")]
    NotFound,

    /// Any other storage failure
    #[error("{0}")]
    Storage(RepoError),

    /// Storage is unreachable
    #[error("service unavailable: {0}")]
    Unavailable(RepoError),
}

impl AppError {
    /// Report every repository failure, including not-found, as a storage error
    pub fn storage(err: RepoError) -> Self {
        AppError::Storage(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(_) => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

impl From<DtoError> for AppError {
    fn from(err: DtoError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unavailable(e) => {
                tracing::warn!("Health check failed: {}", e);
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (status, self.to_string()).into_response()
    }
}
