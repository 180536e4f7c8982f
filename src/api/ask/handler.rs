// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::AskApiRequest;
use super::response::AskApiResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;

/// POST /v1/ask - Search, scrape the results, and answer from their content
///
/// # Errors
/// - 400 Bad Request: Invalid query or parameters
/// - 422 Unprocessable Entity: No source yielded usable text
/// - 503 Service Unavailable: Every model in the fallback list failed
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskApiRequest>,
) -> Result<Json<AskApiResponse>, ApiErrorResponse> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!("[{}] Ask request: {:?}", request_id, request.query);

    if let Err(e) = request.validate() {
        warn!("[{}] Ask validation failed: {}", request_id, e);
        return Err(ApiError::InvalidRequest(e).with_request_id(Some(request_id)));
    }

    let response = state
        .assistant
        .ask(request.to_options())
        .await
        .map_err(|e| {
            warn!("[{}] Ask failed for '{}': {}", request_id, request.query, e);
            ApiError::from(e).with_request_id(Some(request_id.clone()))
        })?;

    info!(
        "[{}] Ask complete: model={}, sources={}/{}",
        request_id,
        response.model,
        response.used_sources,
        response.sources.len()
    );

    Ok(Json(AskApiResponse {
        request_id,
        response,
    }))
}
