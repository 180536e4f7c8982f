// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parallel scrape aggregation
//!
//! Runs one scrape worker per search result on a bounded pool and folds
//! the completed excerpts into a single prompt context.

use futures::stream::{self, StreamExt};
use std::fmt;
use tracing::{debug, info};

use super::worker::{ScrapeOutcome, ScrapeWorker};
use crate::search::SearchResult;

/// Successful excerpts in completion order, plus the sources that failed
#[derive(Debug, Clone, Default)]
pub struct AggregatedContext {
    blocks: Vec<ScrapeOutcome>,
    failed: Vec<ScrapeOutcome>,
}

impl AggregatedContext {
    /// True when no source produced any text
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sources included in the context, in completion order
    pub fn blocks(&self) -> &[ScrapeOutcome] {
        &self.blocks
    }

    /// Sources that were dropped, with their failure causes
    pub fn failed(&self) -> &[ScrapeOutcome] {
        &self.failed
    }

    /// Render the context blob sent to the model
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AggregatedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            write!(
                f,
                "Source: {}\nURL: {}\nContent: {}\n\n",
                block.source.title,
                block.source.url,
                block.excerpt()
            )?;
        }
        Ok(())
    }
}

impl FromIterator<ScrapeOutcome> for AggregatedContext {
    fn from_iter<I: IntoIterator<Item = ScrapeOutcome>>(iter: I) -> Self {
        let (blocks, failed) = iter
            .into_iter()
            .partition(|outcome| !outcome.excerpt().is_empty());
        Self { blocks, failed }
    }
}

/// Fixed-size pool of scrape workers
#[derive(Clone)]
pub struct ParallelAggregator {
    worker: ScrapeWorker,
}

impl ParallelAggregator {
    pub fn new(worker: ScrapeWorker) -> Self {
        Self { worker }
    }

    /// Scrape every result concurrently and collect the excerpts
    ///
    /// Pool size is `min(max_workers, results.len())`. Completions are
    /// consumed as they arrive, so block order follows completion order,
    /// not search rank. Returns once the slowest worker has finished.
    pub async fn aggregate(
        &self,
        results: &[SearchResult],
        max_workers: usize,
        max_chars_per_source: usize,
    ) -> AggregatedContext {
        let pool_size = max_workers.min(results.len());
        if pool_size == 0 {
            debug!("Nothing to scrape (results={}, max_workers={})", results.len(), max_workers);
            return AggregatedContext::default();
        }

        let context: AggregatedContext = stream::iter(results.iter().cloned())
            .map(|source| self.worker.scrape(source, max_chars_per_source))
            .buffer_unordered(pool_size)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect();

        info!(
            "Aggregated {}/{} sources ({} failed) with {} workers",
            context.blocks.len(),
            results.len(),
            context.failed.len(),
            pool_size
        );

        context
    }
}
