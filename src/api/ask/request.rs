// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API request types

use serde::{Deserialize, Serialize};

use crate::assistant::AskOptions;

/// Request body for POST /v1/ask
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskApiRequest {
    /// Question to research and answer (required, max 500 chars)
    pub query: String,

    /// Search results to scrape (1-20)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<usize>,

    /// Excerpt budget per source, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars_per_source: Option<usize>,

    /// Include the rendered context blob in the response
    #[serde(default)]
    pub show_context: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AskApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        self.to_options().validate().map_err(|e| e.to_string())
    }

    pub fn to_options(&self) -> AskOptions {
        AskOptions {
            query: self.query.clone(),
            num_results: self.num_results,
            max_chars_per_source: self.max_chars_per_source,
            show_context: self.show_context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "query": "how do tokio tasks work",
            "numResults": 3,
            "maxCharsPerSource": 800,
            "showContext": true
        }"#;

        let request: AskApiRequest = serde_json::from_str(json).unwrap();
        let options = request.to_options();
        assert_eq!(options.query, "how do tokio tasks work");
        assert_eq!(options.num_results, Some(3));
        assert_eq!(options.max_chars_per_source, Some(800));
        assert!(options.show_context);
    }

    #[test]
    fn test_request_defaults() {
        let request: AskApiRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert_eq!(request.num_results, None);
        assert_eq!(request.max_chars_per_source, None);
        assert!(!request.show_context);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let request: AskApiRequest =
            serde_json::from_str(r#"{"query": "q", "numResults": 50}"#).unwrap();
        assert!(request.validate().is_err());

        let request: AskApiRequest = serde_json::from_str(r#"{"query": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
