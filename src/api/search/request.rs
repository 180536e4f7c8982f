// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::{Deserialize, Serialize};

use crate::assistant::MAX_QUERY_CHARS;
use crate::search::MAX_NUM_RESULTS;

/// Request body for POST /v1/search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiRequest {
    /// Search query string (required, max 500 chars)
    pub query: String,

    /// Number of results to return (1-20, server default when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<usize>,

    /// Optional request ID for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl SearchApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if self.query.chars().count() > MAX_QUERY_CHARS {
            return Err("Query too long (max 500 characters)".to_string());
        }
        match self.num_results {
            Some(0) => Err("numResults must be at least 1".to_string()),
            Some(n) if n > MAX_NUM_RESULTS => Err("numResults cannot exceed 20".to_string()),
            _ => Ok(()),
        }
    }
}
