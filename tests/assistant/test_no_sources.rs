// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::assistant::support::{build, StubChat, StubFetcher, MODELS};
    use fabstir_search_assistant::search::{SearchError, SearchResult};
    use fabstir_search_assistant::{AskOptions, AssistantError};

    fn chat() -> Arc<StubChat> {
        Arc::new(StubChat::default().reply(MODELS[0], "should never be asked"))
    }

    #[tokio::test]
    async fn test_zero_results_skip_scrape_and_model() {
        let fetcher = Arc::new(StubFetcher::default());
        let chat = chat();
        let assistant = build(Ok(Vec::new()), fetcher.clone(), chat.clone());

        let err = assistant.ask(AskOptions::new("obscure")).await.unwrap_err();

        assert!(matches!(err, AssistantError::NoUsableSources { .. }));
        assert_eq!(
            err.to_string(),
            "Could not find enough relevant data. Try a different query."
        );
        assert_eq!(fetcher.calls(), 0);
        assert!(chat.models_called().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_takes_no_sources_path() {
        let fetcher = Arc::new(StubFetcher::default());
        let chat = chat();
        let assistant = build(
            Err(SearchError::ApiError {
                status: 500,
                message: "provider down".to_string(),
            }),
            fetcher.clone(),
            chat.clone(),
        );

        let err = assistant.ask(AskOptions::new("anything")).await.unwrap_err();

        match err {
            AssistantError::NoUsableSources { reason } => assert!(reason.contains("provider down")),
            other => panic!("expected NoUsableSources, got {:?}", other),
        }
        assert_eq!(fetcher.calls(), 0);
        assert!(chat.models_called().is_empty());
    }

    #[tokio::test]
    async fn test_every_scrape_failing_skips_model() {
        // Neither URL has a page, so every fetch fails
        let fetcher = Arc::new(StubFetcher::default());
        let chat = chat();
        let assistant = build(
            Ok(vec![
                SearchResult::new("A", "https://a.example"),
                SearchResult::new("B", "https://b.example"),
            ]),
            fetcher.clone(),
            chat.clone(),
        );

        let err = assistant.ask(AskOptions::new("q")).await.unwrap_err();

        assert!(matches!(err, AssistantError::NoUsableSources { .. }));
        assert_eq!(fetcher.calls(), 2);
        assert!(chat.models_called().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_rejected_before_search() {
        let fetcher = Arc::new(StubFetcher::default());
        let chat = chat();
        let assistant = build(Ok(Vec::new()), fetcher.clone(), chat.clone());

        let err = assistant.ask(AskOptions::new("   ")).await.unwrap_err();
        assert!(matches!(err, AssistantError::InvalidQuery(_)));
    }
}
