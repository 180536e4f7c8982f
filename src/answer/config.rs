// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the hosted inference endpoint

use std::env;

/// Default OpenAI-compatible endpoint (Hugging Face inference router)
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co";

/// Primary model first, fallbacks after
pub const DEFAULT_MODELS: &[&str] = &[
    "mistralai/Mistral-7B-Instruct-v0.2",
    "HuggingFaceH4/zephyr-7b-beta",
    "google/gemma-7b-it",
];

/// Configuration for answer generation
#[derive(Clone)]
pub struct AnswerConfig {
    /// Bearer token for the inference endpoint (HF_TOKEN)
    pub api_token: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Ordered model list, tried until one answers
    pub models: Vec<String>,
    /// Token budget per model call
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Timeout per model call in seconds
    pub timeout_secs: u64,
}

impl AnswerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_token: env::var("HF_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            models: env::var("LLM_MODELS")
                .ok()
                .map(|v| parse_model_list(&v))
                .filter(|m| !m.is_empty())
                .unwrap_or(defaults.models),
            max_tokens: env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.models.is_empty() {
            return Err("At least one model must be configured".to_string());
        }
        if self.max_tokens == 0 || self.max_tokens > 4096 {
            return Err("max_tokens must be between 1 and 4096".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            max_tokens: 512,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

// Keep the token out of logs
impl std::fmt::Debug for AnswerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Split a comma-separated model list, dropping blanks
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
