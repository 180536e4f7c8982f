// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod ask;
pub mod errors;
pub mod http_server;
pub mod search;

pub use ask::AskApiRequest;
pub use errors::{ApiError, ApiErrorResponse, ErrorResponse};
pub use http_server::{build_router, start_server, AppState};
pub use search::{SearchApiRequest, SearchApiResponse};
