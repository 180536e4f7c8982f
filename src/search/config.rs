// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

/// Hard cap on results per query, shared by the API and CLI validation
pub const MAX_NUM_RESULTS: usize = 20;

/// Browser-like User-Agent used for DuckDuckGo's HTML endpoint
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for web search functionality
#[derive(Clone)]
pub struct SearchConfig {
    /// Whether web search is enabled
    pub enabled: bool,
    /// Brave Search API key (Brave is skipped when unset)
    pub brave_api_key: Option<String>,
    /// Default number of results per search
    pub default_num_results: usize,
    /// Rate limit (requests per minute)
    pub rate_limit_per_minute: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env::var("WEB_SEARCH_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(defaults.enabled),
            brave_api_key: env::var("BRAVE_API_KEY").ok().filter(|k| !k.is_empty()),
            default_num_results: env::var("SEARCH_DEFAULT_NUM_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_num_results),
            rate_limit_per_minute: env::var("SEARCH_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout_ms: env::var("SEARCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_num_results == 0 || self.default_num_results > MAX_NUM_RESULTS {
            return Err(format!(
                "default_num_results must be between 1 and {}",
                MAX_NUM_RESULTS
            ));
        }
        if self.rate_limit_per_minute == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Search timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

// Keep the API key out of logs
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("enabled", &self.enabled)
            .field("brave_api_key", &self.brave_api_key.as_ref().map(|_| "<redacted>"))
            .field("default_num_results", &self.default_num_results)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            brave_api_key: None,
            default_num_results: 5,
            rate_limit_per_minute: 60,
            request_timeout_ms: 10_000,
        }
    }
}
