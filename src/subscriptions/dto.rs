//! Wire representation of a subscription
//!
//! Every field travels as text on the wire. Dates use `YYYY-MM-DD` and IDs
//! use canonical hyphenated UUIDs. Parsing into [`Subscription`] is where
//! request validation happens.

use crate::subscriptions::models::Subscription;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Calendar date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors produced while turning a request body into a [`Subscription`]
#[derive(Error, Debug)]
pub enum DtoError {
    /// `id` was supplied but is not a UUID
    #[error("invalid id: {0}")]
    InvalidId(#[source] uuid::Error),

    /// `user_id` is not a UUID
    #[error("invalid user_id: {0}")]
    InvalidUserId(#[source] uuid::Error),

    /// `start_date` is not `YYYY-MM-DD`
    #[error("invalid start_date: {0}")]
    InvalidStartDate(#[source] chrono::ParseError),

    /// `finish_date` was supplied but is not `YYYY-MM-DD`
    #[error("invalid finish_date: {0}")]
    InvalidFinishDate(#[source] chrono::ParseError),

    /// `price` is below zero
    #[error("invalid price: {0} is negative")]
    NegativePrice(i32),
}

/// Subscription as sent and received over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDto {
    /// Optional on input; generated when absent or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Service label
    pub service_name: String,
    /// Price in minor currency units
    pub price: i32,
    /// Owning user
    pub user_id: String,
    /// First day, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`; omitted when open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<String>,
}

impl SubscriptionDto {
    /// Validate and convert into a domain record
    ///
    /// A missing or blank `id` is replaced by a fresh one, and a blank
    /// `finish_date` means open-ended.
    pub fn into_subscription(self) -> Result<Subscription, DtoError> {
        let id = match non_blank(self.id) {
            Some(id) => Uuid::parse_str(&id).map_err(DtoError::InvalidId)?,
            None => Subscription::generate_id(),
        };

        let user_id = Uuid::parse_str(self.user_id.trim()).map_err(DtoError::InvalidUserId)?;
        let start_date = parse_date(&self.start_date).map_err(DtoError::InvalidStartDate)?;
        let finish_date = non_blank(self.finish_date)
            .map(|d| parse_date(&d))
            .transpose()
            .map_err(DtoError::InvalidFinishDate)?;

        if self.price < 0 {
            return Err(DtoError::NegativePrice(self.price));
        }

        Ok(Subscription {
            id,
            service_name: self.service_name,
            price: self.price,
            user_id,
            start_date,
            finish_date,
        })
    }
}

impl From<&Subscription> for SubscriptionDto {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: Some(sub.id.to_string()),
            service_name: sub.service_name.clone(),
            price: sub.price,
            user_id: sub.user_id.to_string(),
            start_date: format_date(sub.start_date),
            finish_date: sub.finish_date.map(format_date),
        }
    }
}

impl From<Subscription> for SubscriptionDto {
    fn from(sub: Subscription) -> Self {
        Self::from(&sub)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
