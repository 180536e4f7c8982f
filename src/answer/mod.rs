// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer generation over scraped context
//!
//! Builds a grounded prompt from the aggregated context and sends it to a
//! hosted chat model, falling back through the configured model list.

pub mod client;
pub mod config;
pub mod generator;
pub mod prompt;

pub use client::{ChatClient, ChatError, ChatMessage, HfInferenceClient};
pub use config::AnswerConfig;
pub use generator::{AnswerGenerator, ModelAnswer, ModelProbe};
pub use prompt::{PromptRequest, SYSTEM_INSTRUCTION};
