// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::SearchApiRequest;
use super::response::SearchApiResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;

/// POST /v1/search - Perform web search without scraping or answering
///
/// # Request
/// - `query`: Search query string (required, max 500 chars)
/// - `numResults`: Number of results (1-20, server default when omitted)
/// - `requestId`: Optional request ID for tracking
///
/// # Errors
/// - 400 Bad Request: Invalid query or parameters
/// - 429 Too Many Requests: Rate limited
/// - 502 Bad Gateway: Every provider failed
/// - 503 Service Unavailable: Search disabled
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchApiRequest>,
) -> Result<Json<SearchApiResponse>, ApiErrorResponse> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!("[{}] Search request: {:?}", request_id, request.query);

    if let Err(e) = request.validate() {
        warn!("[{}] Search validation failed: {}", request_id, e);
        return Err(ApiError::InvalidRequest(e).with_request_id(Some(request_id)));
    }

    let result = state
        .assistant
        .search(&request.query, request.num_results)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(Some(request_id.clone())))?;

    info!(
        "[{}] Search complete: {} results for '{}' in {}ms",
        request_id, result.result_count, request.query, result.search_time_ms
    );

    Ok(Json(SearchApiResponse::new(result, request_id)))
}
