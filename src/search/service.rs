// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Coordinates search providers and rate limiting. Provider failures are
//! returned to the caller once every provider has been tried.

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::brave::BraveSearchProvider;
use super::config::{SearchConfig, BROWSER_USER_AGENT};
use super::duckduckgo::DuckDuckGoProvider;
use super::provider::SearchProvider;
use super::rate_limiter::SearchRateLimiter;
use super::types::{SearchError, SearchResponse};

/// Search service that orchestrates providers with failover
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    rate_limiter: SearchRateLimiter,
    config: SearchConfig,
}

impl SearchService {
    /// Create a search service with the built-in providers
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| SearchError::ApiError {
                status: 0,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();

        if let Some(api_key) = config.brave_api_key.clone() {
            providers.push(Box::new(BraveSearchProvider::new(
                api_key,
                client.clone(),
                config.request_timeout_ms,
            )));
            debug!("Brave Search provider enabled");
        }

        providers.push(Box::new(DuckDuckGoProvider::new(
            client,
            config.request_timeout_ms,
        )));
        debug!("DuckDuckGo provider enabled");

        Ok(Self::with_providers(config, providers))
    }

    /// Create a search service over an explicit provider list
    pub fn with_providers(config: SearchConfig, mut providers: Vec<Box<dyn SearchProvider>>) -> Self {
        // Lower priority value = preferred
        providers.sort_by_key(|p| p.priority());
        let rate_limiter = SearchRateLimiter::new(config.rate_limit_per_minute);

        let service = Self {
            providers,
            rate_limiter,
            config,
        };
        info!(
            "Search service ready: providers={:?}, rate_limit={}/min",
            service.available_providers(),
            service.rate_limiter.requests_per_minute()
        );
        service
    }

    /// Perform a search
    ///
    /// Results keep provider rank order and are capped at `num_results`
    /// (the configured default when `None`).
    pub async fn search(
        &self,
        query: &str,
        num_results: Option<usize>,
    ) -> Result<SearchResponse, SearchError> {
        if !self.config.enabled {
            return Err(SearchError::SearchDisabled);
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "query is empty".to_string(),
            });
        }

        let num_results = num_results.unwrap_or(self.config.default_num_results);

        self.rate_limiter.check()?;

        let start = Instant::now();
        let mut last_error = None;

        for provider in self.providers.iter().filter(|p| p.is_available()) {
            debug!("Trying search provider: {}", provider.name());

            match provider.search(query, num_results).await {
                Ok(mut results) => {
                    results.truncate(num_results);
                    let elapsed_ms = start.elapsed().as_millis() as u64;

                    info!(
                        "Search complete: {} results from {} in {}ms",
                        results.len(),
                        provider.name(),
                        elapsed_ms
                    );

                    return Ok(SearchResponse {
                        query: query.to_string(),
                        result_count: results.len(),
                        results,
                        search_time_ms: elapsed_ms,
                        provider: provider.name().to_string(),
                    });
                }
                Err(e) => {
                    warn!("Search provider {} failed: {}, trying next", provider.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SearchError::ProviderUnavailable {
            provider: "all".to_string(),
        }))
    }

    /// Check if search is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Names of the providers that can currently serve requests, in try order
    pub fn available_providers(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}
