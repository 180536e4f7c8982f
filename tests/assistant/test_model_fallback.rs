// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::assistant::support::{article, build, StubChat, StubFetcher, MODELS};
    use fabstir_search_assistant::search::SearchResult;
    use fabstir_search_assistant::{AskOptions, AssistantError};

    fn fetcher() -> Arc<StubFetcher> {
        Arc::new(StubFetcher::default().page(
            "https://docs.example",
            &article("The documentation explains the feature in plenty of detail."),
        ))
    }

    fn results() -> Vec<SearchResult> {
        vec![SearchResult::new("Docs", "https://docs.example")]
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let chat = Arc::new(StubChat::default().reply(MODELS[1], "fallback answer"));
        let assistant = build(Ok(results()), fetcher(), chat.clone());

        let response = assistant.ask(AskOptions::new("q")).await.unwrap();

        assert_eq!(response.model, MODELS[1]);
        assert_eq!(response.answer, "fallback answer");
        assert_eq!(
            chat.models_called(),
            vec![MODELS[0].to_string(), MODELS[1].to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_models_failing_is_model_unavailable() {
        let chat = Arc::new(StubChat::default());
        let assistant = build(Ok(results()), fetcher(), chat.clone());

        let err = assistant.ask(AskOptions::new("q")).await.unwrap_err();

        assert!(matches!(err, AssistantError::ModelUnavailable { models: 2 }));
        // Each model is tried exactly once
        assert_eq!(chat.models_called().len(), 2);
    }

    #[tokio::test]
    async fn test_probe_models_reports_each() {
        let chat = Arc::new(StubChat::default().reply(MODELS[0], "hi"));
        let assistant = build(Ok(results()), fetcher(), chat);

        let probes = assistant.probe_models().await;
        assert_eq!(probes.len(), 2);
        assert!(probes[0].available);
        assert!(!probes[1].available);
    }
}
