// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::assistant::support::{article, build, StubChat, StubFetcher, MODELS};
    use fabstir_search_assistant::answer::SYSTEM_INSTRUCTION;
    use fabstir_search_assistant::search::SearchResult;
    use fabstir_search_assistant::AskOptions;

    fn two_results() -> Vec<SearchResult> {
        vec![
            SearchResult::new("Empty page", "https://empty.example"),
            SearchResult::new("Long page", "https://long.example"),
        ]
    }

    #[tokio::test]
    async fn test_one_usable_source_is_answered_by_primary_model() {
        let body = "Tokio schedules lightweight tasks across a pool of worker threads. ".repeat(40);
        let fetcher = Arc::new(
            StubFetcher::default()
                .page("https://empty.example", "<html><body><nav>menu</nav></body></html>")
                .page("https://long.example", &article(&body)),
        );
        let chat = Arc::new(
            StubChat::default()
                .reply(MODELS[0], "Tokio uses a work-stealing scheduler.")
                .reply(MODELS[1], "unused"),
        );
        let assistant = build(Ok(two_results()), fetcher.clone(), chat.clone());

        let response = assistant
            .ask(AskOptions {
                query: "test query".to_string(),
                num_results: Some(2),
                max_chars_per_source: Some(1000),
                show_context: true,
            })
            .await
            .unwrap();

        assert_eq!(response.answer, "Tokio uses a work-stealing scheduler.");
        assert_eq!(response.model, MODELS[0]);
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.used_sources, 1);
        assert_eq!(response.failed_sources.len(), 1);
        assert_eq!(response.failed_sources[0].url, "https://empty.example");
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(chat.models_called(), vec![MODELS[0].to_string()]);

        let context = response.context.unwrap();
        assert_eq!(context.matches("Source: ").count(), 1);
        assert!(context.starts_with("Source: Long page\nURL: https://long.example\nContent: Tokio"));

        let messages = chat.last_messages();
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(
            messages[1].content,
            format!("Context:\n{}\n\nQuestion: test query", context)
        );
    }

    #[tokio::test]
    async fn test_context_hidden_unless_requested() {
        let body = "A page with more than enough readable text to pass the noise filter.";
        let fetcher = Arc::new(StubFetcher::default().page("https://long.example", &article(body)));
        let chat = Arc::new(StubChat::default().reply(MODELS[0], "answer"));
        let assistant = build(
            Ok(vec![SearchResult::new("Long page", "https://long.example")]),
            fetcher,
            chat,
        );

        let response = assistant.ask(AskOptions::new("q")).await.unwrap();
        assert!(response.context.is_none());
        assert_eq!(response.used_sources, 1);
    }

    #[tokio::test]
    async fn test_excerpt_budget_reaches_prompt() {
        let body = "x".repeat(5000);
        let fetcher = Arc::new(StubFetcher::default().page("https://long.example", &article(&body)));
        let chat = Arc::new(StubChat::default().reply(MODELS[0], "answer"));
        let assistant = build(
            Ok(vec![SearchResult::new("Long page", "https://long.example")]),
            fetcher,
            chat,
        );

        let response = assistant
            .ask(AskOptions {
                max_chars_per_source: Some(250),
                show_context: true,
                ..AskOptions::new("q")
            })
            .await
            .unwrap();

        let context = response.context.unwrap();
        let excerpt = context
            .lines()
            .find_map(|line| line.strip_prefix("Content: "))
            .unwrap();
        assert_eq!(excerpt.chars().count(), 250);
    }
}
