// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API response types

use serde::{Deserialize, Serialize};

use crate::search::{SearchResponse, SearchResult};

/// Response body for POST /v1/search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiResponse {
    /// The search query as sent to the provider
    pub query: String,

    /// Results in provider rank order
    pub results: Vec<SearchResult>,

    pub result_count: usize,

    /// Time taken for the search in milliseconds
    pub search_time_ms: u64,

    /// Search provider that served the results
    pub provider: String,

    /// Caller-supplied or generated request ID
    pub request_id: String,
}

impl SearchApiResponse {
    pub fn new(response: SearchResponse, request_id: String) -> Self {
        Self {
            query: response.query,
            result_count: response.results.len(),
            results: response.results,
            search_time_ms: response.search_time_ms,
            provider: response.provider,
            request_id,
        }
    }
}
