// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod answer;
pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod scrape;
pub mod search;
pub mod version;

pub use answer::{AnswerConfig, AnswerGenerator, ChatClient, ModelAnswer};
pub use assistant::{AskOptions, AskResponse, AssistantError, SearchAssistant};
pub use config::AssistantConfig;
pub use scrape::{AggregatedContext, ParallelAggregator, ScrapeConfig, ScrapeWorker};
pub use search::{SearchConfig, SearchResult, SearchService};
