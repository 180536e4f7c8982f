// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Hand-written doubles for the three external seams: search, fetch, chat

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fabstir_search_assistant::answer::{AnswerGenerator, ChatClient, ChatError, ChatMessage};
use fabstir_search_assistant::scrape::{
    ExtractionPolicy, FetchError, PageFetcher, ParallelAggregator, ScrapeConfig, ScrapeWorker,
};
use fabstir_search_assistant::search::{
    SearchConfig, SearchError, SearchProvider, SearchResult, SearchService,
};
use fabstir_search_assistant::SearchAssistant;

pub struct StubSearch {
    pub response: Mutex<Option<Result<Vec<SearchResult>, SearchError>>>,
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(
        &self,
        _query: &str,
        _num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct StubFetcher {
    pub pages: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::HttpError(format!("no page for {}", url)))
    }
}

/// Replies per model; models without a reply fail
#[derive(Default)]
pub struct StubChat {
    pub replies: HashMap<String, String>,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl StubChat {
    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), text.to_string());
        self
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, messages)| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for StubChat {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        _max_tokens: u32,
    ) -> Result<String, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.replies
            .get(model)
            .cloned()
            .ok_or_else(|| ChatError::Status {
                status: 503,
                body: format!("{} is loading", model),
            })
    }
}

pub const MODELS: &[&str] = &["org/primary", "org/fallback"];

pub fn article(text: &str) -> String {
    format!(
        "<html><head><title>t</title></head><body><nav>Home | About</nav><article><p>{}</p></article></body></html>",
        text
    )
}

pub fn build(
    search: Result<Vec<SearchResult>, SearchError>,
    fetcher: Arc<StubFetcher>,
    chat: Arc<StubChat>,
) -> SearchAssistant {
    let provider = StubSearch {
        response: Mutex::new(Some(search)),
    };
    let service = SearchService::with_providers(SearchConfig::default(), vec![Box::new(provider)]);
    let aggregator =
        ParallelAggregator::new(ScrapeWorker::new(fetcher, ExtractionPolicy::ContentRoot));
    let generator = AnswerGenerator::new(
        chat,
        MODELS.iter().map(|m| m.to_string()).collect(),
        256,
    );

    SearchAssistant::new(service, aggregator, generator, ScrapeConfig::default())
}
