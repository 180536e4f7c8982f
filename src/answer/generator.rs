// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer generation with an ordered model fallback list

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::client::{ChatClient, ChatMessage};
use super::prompt::PromptRequest;
use crate::scrape::AggregatedContext;

/// Outcome of one answer attempt across the model list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAnswer {
    /// First model in the list that produced non-empty text
    Answered { text: String, model: String },
    /// Every model failed
    Unavailable,
}

/// Reachability of one configured model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProbe {
    pub model: String,
    pub available: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Tries each model in order until one answers
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn ChatClient>,
    models: Vec<String>,
    max_tokens: u32,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn ChatClient>, models: Vec<String>, max_tokens: u32) -> Self {
        Self {
            client,
            models,
            max_tokens,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Answer `question` from `context`
    pub async fn answer(&self, context: &AggregatedContext, question: &str) -> ModelAnswer {
        self.generate(&PromptRequest::new(context, question)).await
    }

    /// Send the prompt to each model in order, stopping at the first success
    ///
    /// A failed model is not retried. Empty text counts as a failure.
    pub async fn generate(&self, prompt: &PromptRequest) -> ModelAnswer {
        let messages = prompt.messages();

        for model in &self.models {
            match self.client.chat(model, &messages, self.max_tokens).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!("Answer generated by {}", model);
                    return ModelAnswer::Answered {
                        text,
                        model: model.clone(),
                    };
                }
                Ok(_) => warn!("Model {} returned an empty answer", model),
                Err(e) => warn!("Model {} failed: {}", model, e),
            }
        }

        warn!("All {} models failed", self.models.len());
        ModelAnswer::Unavailable
    }

    /// Send a trivial prompt to every configured model and report which respond
    pub async fn probe_models(&self) -> Vec<ModelProbe> {
        let messages = [ChatMessage::user("Hello")];
        let mut probes = Vec::with_capacity(self.models.len());

        for model in &self.models {
            let start = Instant::now();
            let result = self.client.chat(model, &messages, 16).await;
            let latency_ms = start.elapsed().as_millis() as u64;

            let probe = match result {
                Ok(_) => ModelProbe {
                    model: model.clone(),
                    available: true,
                    latency_ms,
                    error: None,
                },
                Err(e) => ModelProbe {
                    model: model.clone(),
                    available: false,
                    latency_ms,
                    error: Some(e.to_string()),
                },
            };
            info!("Probe {}: available={}", probe.model, probe.available);
            probes.push(probe);
        }

        probes
    }
}
