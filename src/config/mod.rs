// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Top-level configuration, loaded once at start-up

use std::env;
use std::net::SocketAddr;

use crate::answer::AnswerConfig;
use crate::scrape::ScrapeConfig;
use crate::search::SearchConfig;

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub search: SearchConfig,
    pub scrape: ScrapeConfig,
    pub answer: AnswerConfig,
    pub api_host: String,
    pub api_port: u16,
}

impl AssistantConfig {
    /// Load every section from environment variables
    pub fn from_env() -> Self {
        Self {
            search: SearchConfig::from_env(),
            scrape: ScrapeConfig::from_env(),
            answer: AnswerConfig::from_env(),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.search.validate().map_err(|e| format!("search: {}", e))?;
        self.scrape.validate().map_err(|e| format!("scrape: {}", e))?;
        self.answer.validate().map_err(|e| format!("answer: {}", e))?;
        self.listen_addr()?;
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.api_host, self.api_port)
            .parse()
            .map_err(|e| format!("invalid API_HOST/API_PORT: {}", e))
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            scrape: ScrapeConfig::default(),
            answer: AnswerConfig::default(),
            api_host: "127.0.0.1".to_string(),
            api_port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AssistantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_debug_redacts_every_secret() {
        let mut config = AssistantConfig::default();
        config.search.brave_api_key = Some("BSA_SECRET_123".to_string());
        config.answer.api_token = Some("hf_secret_456".to_string());

        let printed = format!("{:?}", config);
        assert!(!printed.contains("BSA_SECRET_123"));
        assert!(!printed.contains("hf_secret_456"));
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = AssistantConfig {
            api_host: "not a host".to_string(),
            ..AssistantConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_section_errors_are_prefixed() {
        let mut config = AssistantConfig::default();
        config.answer.models.clear();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("answer: "));
    }
}
