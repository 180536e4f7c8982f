// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search module
//!
//! Turns a user query into a ranked list of `(title, url)` results:
//! - Multiple search providers (Brave when keyed, DuckDuckGo always)
//! - Priority-ordered failover across providers
//! - Rate limiting of outbound provider calls

pub mod brave;
pub mod config;
pub mod duckduckgo;
pub mod provider;
pub mod rate_limiter;
pub mod service;
pub mod types;

pub use config::{SearchConfig, MAX_NUM_RESULTS};
pub use provider::SearchProvider;
pub use service::SearchService;
pub use types::{SearchError, SearchResponse, SearchResult};
