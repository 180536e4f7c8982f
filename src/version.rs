// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir Search Assistant

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-search-summarize-2026-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "web-search",
    "brave-search",
    "duckduckgo-search",
    "parallel-scrape",
    "bounded-worker-pool",
    "content-extraction",
    "model-fallback",
    "http-api",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Search Assistant {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
