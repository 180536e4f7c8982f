// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::assistant::{AssistantError, NO_SOURCES_MESSAGE};
use crate::search::SearchError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    RateLimitExceeded { retry_after: u64 },
    NoUsableSources { reason: String },
    ModelUnavailable { models: usize },
    ServiceUnavailable(String),
    UpstreamError(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::RateLimitExceeded { retry_after } => {
                let mut details = HashMap::new();
                details.insert(
                    "retry_after".to_string(),
                    serde_json::Value::Number((*retry_after).into()),
                );
                (
                    "rate_limit_exceeded",
                    "Rate limit exceeded".to_string(),
                    Some(details),
                )
            }
            ApiError::NoUsableSources { reason } => {
                let mut details = HashMap::new();
                details.insert(
                    "reason".to_string(),
                    serde_json::Value::String(reason.clone()),
                );
                ("no_usable_sources", NO_SOURCES_MESSAGE.to_string(), Some(details))
            }
            ApiError::ModelUnavailable { models } => {
                let mut details = HashMap::new();
                details.insert(
                    "models_tried".to_string(),
                    serde_json::Value::Number((*models).into()),
                );
                (
                    "model_unavailable",
                    "No model produced an answer".to_string(),
                    Some(details),
                )
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone(), None),
            ApiError::UpstreamError(msg) => ("upstream_error", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::RateLimitExceeded { .. } => 429,
            ApiError::NoUsableSources { .. } => 422,
            ApiError::ModelUnavailable { .. } | ApiError::ServiceUnavailable(_) => 503,
            ApiError::UpstreamError(_) => 502,
            ApiError::InternalError(_) => 500,
        }
    }

    /// Attach the caller's request id for the error body
    pub fn with_request_id(self, request_id: Option<String>) -> ApiErrorResponse {
        ApiErrorResponse {
            error: self,
            request_id,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::RateLimitExceeded { retry_after } => write!(
                f,
                "Rate limit exceeded, retry after {} seconds",
                retry_after
            ),
            ApiError::NoUsableSources { reason } => {
                write!(f, "{} ({})", NO_SOURCES_MESSAGE, reason)
            }
            ApiError::ModelUnavailable { models } => {
                write!(f, "No model produced an answer (tried {})", models)
            }
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::RateLimited { retry_after_secs } => ApiError::RateLimitExceeded {
                retry_after: retry_after_secs,
            },
            SearchError::InvalidQuery { reason } => ApiError::InvalidRequest(reason),
            SearchError::SearchDisabled => {
                ApiError::ServiceUnavailable("Web search is disabled".to_string())
            }
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::InvalidQuery(msg) => ApiError::InvalidRequest(msg),
            AssistantError::NoUsableSources { reason } => ApiError::NoUsableSources { reason },
            AssistantError::Search(e) => e.into(),
            AssistantError::ModelUnavailable { models } => ApiError::ModelUnavailable { models },
            AssistantError::Configuration(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Error plus request id, rendered as JSON with the matching status code
#[derive(Debug)]
pub struct ApiErrorResponse {
    pub error: ApiError,
    pub request_id: Option<String>,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.error.to_response(self.request_id);

        (status, Json(body)).into_response()
    }
}
