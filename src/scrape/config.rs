// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for page scraping
//!
//! Defines settings for HTTP fetching, excerpt limits, and the worker pool.

use std::env;

use super::extractor::ExtractionPolicy;

/// Upper bound on concurrent scrape workers
pub const MAX_WORKERS_CAP: usize = 8;

/// Default cap on bytes read from one page body (2 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Default User-Agent sent to target websites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for page scraping
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Maximum concurrent scrape workers (default: 5, capped at 8)
    pub max_workers: usize,
    /// Maximum characters kept per source (default: 2000)
    pub max_chars_per_source: usize,
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header sent with every page fetch
    pub user_agent: String,
    /// Which extraction policy turns HTML into an excerpt
    pub extraction_policy: ExtractionPolicy,
    /// Allow fetching localhost/private network hosts (default: false)
    pub allow_private_hosts: bool,
    /// Bytes read from a page body before the rest is dropped
    pub max_body_bytes: usize,
}

impl ScrapeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_workers: env::var("SCRAPE_MAX_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_workers)
                .min(MAX_WORKERS_CAP),
            max_chars_per_source: env::var("SCRAPE_MAX_CHARS_PER_SOURCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_chars_per_source),
            timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("SCRAPE_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            extraction_policy: env::var("SCRAPE_EXTRACTION_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.extraction_policy),
            allow_private_hosts: env::var("SCRAPE_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.allow_private_hosts),
            max_body_bytes: env::var("SCRAPE_MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_workers == 0 {
            return Err("max_workers must be at least 1".to_string());
        }
        if self.max_workers > MAX_WORKERS_CAP {
            return Err(format!("max_workers cannot exceed {}", MAX_WORKERS_CAP));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("max_body_bytes must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            max_chars_per_source: 2000,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extraction_policy: ExtractionPolicy::ContentRoot,
            allow_private_hosts: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
