use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::shared::validation::parse_flexible_datetime;

/// Envelope for error and message-only responses.
///
/// Resource endpoints return their DTOs directly; this wrapper carries the
/// `message` field clients display for failures and confirmations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(None, Some(message.into()))
    }
}

/// Deserializes an optional timestamp that may be sent either as RFC 3339 or
/// as a bare `YYYY-MM-DD` date (HTML date inputs). Bare dates resolve to
/// midnight UTC.
pub mod flexible_datetime {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_flexible_datetime(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", value))),
        }
    }
}
