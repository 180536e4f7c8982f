// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API response types

use serde::Serialize;

use crate::assistant::AskResponse;

/// Response body for POST /v1/ask
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskApiResponse {
    /// Caller-supplied or generated request ID
    pub request_id: String,

    #[serde(flatten)]
    pub response: AskResponse,
}
