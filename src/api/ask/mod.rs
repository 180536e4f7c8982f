// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search-then-summarize API endpoint
//!
//! Provides the `/v1/ask` HTTP endpoint: search, scrape, answer.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::ask_handler;
pub use request::AskApiRequest;
pub use response::AskApiResponse;
