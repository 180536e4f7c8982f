// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::ask::ask_handler;
use super::search::search_handler;
use crate::assistant::SearchAssistant;
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<SearchAssistant>,
}

impl AppState {
    pub fn new(assistant: SearchAssistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Search only
        .route("/v1/search", post(search_handler))
        // Search, scrape, answer
        .route("/v1/ask", post(ask_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    assistant: SearchAssistant,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(AppState::new(assistant));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": version::get_version_info(),
        "searchEnabled": state.assistant.search_enabled(),
        "models": state.assistant.models(),
    }))
}
