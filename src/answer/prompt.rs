// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt assembly for context-grounded answers

use super::client::ChatMessage;
use crate::scrape::AggregatedContext;

/// Instruction sent as the system message on every answer request
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant. Answer the user's question using only the provided context. If the context does not contain enough information, say so.";

/// Prompt sent to every model in the fallback list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub context: String,
    pub question: String,
}

impl PromptRequest {
    pub fn new(context: &AggregatedContext, question: impl Into<String>) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            context: context.render(),
            question: question.into(),
        }
    }

    /// User turn: context blob followed by the question
    pub fn user_message(&self) -> String {
        format!("Context:\n{}\n\nQuestion: {}", self.context, self.question)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_instruction.clone()),
            ChatMessage::user(self.user_message()),
        ]
    }
}
