// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query pipeline: search, scrape, answer
//!
//! One `ask` call runs the three stages in sequence. Nothing derived from a
//! query outlives the call.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::answer::{AnswerGenerator, HfInferenceClient, ModelAnswer, ModelProbe};
use crate::config::AssistantConfig;
use crate::scrape::{HttpPageFetcher, ParallelAggregator, ScrapeConfig, ScrapeWorker};
use crate::search::{SearchError, SearchResponse, SearchResult, SearchService, MAX_NUM_RESULTS};

/// Longest accepted query, in characters
pub const MAX_QUERY_CHARS: usize = 500;

/// User-visible message for the no-sources terminal path
pub const NO_SOURCES_MESSAGE: &str = "Could not find enough relevant data. Try a different query.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Search failed, returned nothing, or no page yielded text
    #[error("{}", NO_SOURCES_MESSAGE)]
    NoUsableSources { reason: String },

    /// Search-only requests surface the provider error as-is
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("No model produced an answer (tried {models} models)")]
    ModelUnavailable { models: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Per-request options; `None` falls back to the configured defaults
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    pub query: String,
    pub num_results: Option<usize>,
    pub max_chars_per_source: Option<usize>,
    pub show_context: bool,
}

impl AskOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AssistantError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(AssistantError::InvalidQuery("query cannot be empty".to_string()));
        }
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(AssistantError::InvalidQuery(format!(
                "query too long (max {} characters)",
                MAX_QUERY_CHARS
            )));
        }
        if let Some(n) = self.num_results {
            if n == 0 || n > MAX_NUM_RESULTS {
                return Err(AssistantError::InvalidQuery(format!(
                    "numResults must be between 1 and {}",
                    MAX_NUM_RESULTS
                )));
            }
        }
        if self.max_chars_per_source == Some(0) {
            return Err(AssistantError::InvalidQuery(
                "maxCharsPerSource must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A source that was searched but contributed nothing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedSource {
    pub title: String,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTimings {
    pub search_ms: u64,
    pub scrape_ms: u64,
    pub answer_ms: u64,
    pub total_ms: u64,
}

/// Answer plus the full source list it was drawn from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub query: String,
    pub answer: String,
    pub model: String,
    /// Every search result, in provider rank order
    pub sources: Vec<SearchResult>,
    /// Number of sources that made it into the context
    pub used_sources: usize,
    pub failed_sources: Vec<FailedSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub timings: StageTimings,
}

/// Search-then-summarize assistant
pub struct SearchAssistant {
    search: SearchService,
    aggregator: ParallelAggregator,
    generator: AnswerGenerator,
    scrape: ScrapeConfig,
}

impl SearchAssistant {
    pub fn new(
        search: SearchService,
        aggregator: ParallelAggregator,
        generator: AnswerGenerator,
        scrape: ScrapeConfig,
    ) -> Self {
        Self {
            search,
            aggregator,
            generator,
            scrape,
        }
    }

    /// Build every component from configuration
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        config.validate().map_err(AssistantError::Configuration)?;

        if config.answer.api_token.is_none() {
            warn!("HF_TOKEN not set; model calls will be unauthenticated");
        }

        let search = SearchService::new(config.search.clone())
            .map_err(|e| AssistantError::Configuration(e.to_string()))?;
        let fetcher = HttpPageFetcher::new(&config.scrape)
            .map_err(|e| AssistantError::Configuration(e.to_string()))?;
        let client = HfInferenceClient::new(&config.answer)
            .map_err(|e| AssistantError::Configuration(e.to_string()))?;

        let aggregator = ParallelAggregator::new(ScrapeWorker::new(
            Arc::new(fetcher),
            config.scrape.extraction_policy,
        ));
        let generator = AnswerGenerator::new(
            Arc::new(client),
            config.answer.models.clone(),
            config.answer.max_tokens,
        );

        Ok(Self::new(search, aggregator, generator, config.scrape.clone()))
    }

    /// Search only, no scraping or model call
    pub async fn search(
        &self,
        query: &str,
        num_results: Option<usize>,
    ) -> Result<SearchResponse, AssistantError> {
        AskOptions {
            query: query.to_string(),
            num_results,
            ..AskOptions::default()
        }
        .validate()?;

        Ok(self.search.search(query, num_results).await?)
    }

    /// Answer one query
    pub async fn ask(&self, options: AskOptions) -> Result<AskResponse, AssistantError> {
        options.validate()?;
        let query = options.query.trim().to_string();
        let max_chars = options
            .max_chars_per_source
            .unwrap_or(self.scrape.max_chars_per_source);

        let started = Instant::now();
        let mut timings = StageTimings::default();

        let sources = match self.search.search(&query, options.num_results).await {
            Ok(response) if !response.results.is_empty() => response.results,
            Ok(_) => {
                return Err(AssistantError::NoUsableSources {
                    reason: "search returned no results".to_string(),
                })
            }
            Err(e) => {
                warn!("Search failed for '{}': {}", query, e);
                return Err(AssistantError::NoUsableSources {
                    reason: e.to_string(),
                });
            }
        };
        timings.search_ms = started.elapsed().as_millis() as u64;

        let scrape_start = Instant::now();
        let context = self
            .aggregator
            .aggregate(&sources, self.scrape.max_workers, max_chars)
            .await;
        timings.scrape_ms = scrape_start.elapsed().as_millis() as u64;

        if context.is_empty() {
            return Err(AssistantError::NoUsableSources {
                reason: format!("none of {} sources yielded text", sources.len()),
            });
        }

        let answer_start = Instant::now();
        let answer = self.generator.answer(&context, &query).await;
        timings.answer_ms = answer_start.elapsed().as_millis() as u64;
        timings.total_ms = started.elapsed().as_millis() as u64;

        let (text, model) = match answer {
            ModelAnswer::Answered { text, model } => (text, model),
            ModelAnswer::Unavailable => {
                return Err(AssistantError::ModelUnavailable {
                    models: self.generator.models().len(),
                })
            }
        };

        info!(
            "Answered '{}' with {} from {}/{} sources in {}ms",
            query,
            model,
            context.blocks().len(),
            sources.len(),
            timings.total_ms
        );

        let failed_sources = context
            .failed()
            .iter()
            .map(|outcome| FailedSource {
                title: outcome.source.title.clone(),
                url: outcome.source.url.clone(),
                reason: outcome
                    .result
                    .as_ref()
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(AskResponse {
            query,
            answer: text,
            model,
            used_sources: context.blocks().len(),
            failed_sources,
            context: options.show_context.then(|| context.render()),
            sources,
            timings,
        })
    }

    /// Check which configured models respond
    pub async fn probe_models(&self) -> Vec<ModelProbe> {
        self.generator.probe_models().await
    }

    pub fn search_enabled(&self) -> bool {
        self.search.is_enabled()
    }

    pub fn models(&self) -> &[String] {
        self.generator.models()
    }
}
