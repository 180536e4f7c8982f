// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page scraping for search results
//!
//! Fetches the pages behind search results and reduces each to a bounded
//! excerpt the model can read.
//!
//! ## Architecture
//!
//! ```text
//! Search Results (URLs) → ParallelAggregator ─┬→ ScrapeWorker → PageFetcher → HTML → extract → excerpt
//!                                             ├→ ScrapeWorker → ...
//!                                             └→ (bounded pool, completion order)
//!                                                         ↓
//!                                               AggregatedContext
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = ScrapeConfig::from_env();
//! let fetcher = Arc::new(HttpPageFetcher::new(&config)?);
//! let aggregator = ParallelAggregator::new(ScrapeWorker::new(fetcher, config.extraction_policy));
//!
//! let context = aggregator
//!     .aggregate(&results, config.max_workers, config.max_chars_per_source)
//!     .await;
//! ```

pub mod aggregator;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod worker;

pub use aggregator::{AggregatedContext, ParallelAggregator};
pub use config::ScrapeConfig;
pub use extractor::{extract, ExtractionPolicy};
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher};
pub use worker::{ScrapeError, ScrapeOutcome, ScrapeWorker};
