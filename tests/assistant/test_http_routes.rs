// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::assistant::support::{article, build, StubChat, StubFetcher, MODELS};
    use fabstir_search_assistant::api::{build_router, AppState};
    use fabstir_search_assistant::search::SearchResult;
    use fabstir_search_assistant::{version, SearchAssistant};

    async fn call(assistant: SearchAssistant, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = build_router(AppState::new(assistant));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn docs() -> Vec<SearchResult> {
        vec![SearchResult::new("Docs", "https://docs.example")]
    }

    fn docs_fetcher() -> Arc<StubFetcher> {
        Arc::new(StubFetcher::default().page(
            "https://docs.example",
            &article("Readable documentation text that survives extraction."),
        ))
    }

    #[tokio::test]
    async fn test_ask_returns_answer_and_sources() {
        let chat = Arc::new(StubChat::default().reply(MODELS[0], "It works."));
        let assistant = build(Ok(docs()), docs_fetcher(), chat);

        let (status, body) = call(
            assistant,
            "POST",
            "/v1/ask",
            json!({ "query": "does it work", "numResults": 1, "showContext": true }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "It works.");
        assert_eq!(body["model"], MODELS[0]);
        assert_eq!(body["usedSources"], 1);
        assert_eq!(body["sources"][0]["url"], "https://docs.example");
        assert!(body["context"].as_str().unwrap().starts_with("Source: Docs\n"));
    }

    #[tokio::test]
    async fn test_ask_without_sources_is_422() {
        let chat = Arc::new(StubChat::default());
        let assistant = build(Ok(Vec::new()), Arc::new(StubFetcher::default()), chat);

        let (status, body) = call(
            assistant,
            "POST",
            "/v1/ask",
            json!({ "query": "nothing", "requestId": "req-9" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errorType"], "no_usable_sources");
        assert_eq!(
            body["message"],
            "Could not find enough relevant data. Try a different query."
        );
        assert_eq!(body["requestId"], "req-9");
    }

    #[tokio::test]
    async fn test_ask_with_failing_models_is_503() {
        let chat = Arc::new(StubChat::default());
        let assistant = build(Ok(docs()), docs_fetcher(), chat);

        let (status, body) = call(assistant, "POST", "/v1/ask", json!({ "query": "q" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["errorType"], "model_unavailable");
    }

    #[tokio::test]
    async fn test_invalid_request_is_400() {
        let chat = Arc::new(StubChat::default());
        let assistant = build(Ok(docs()), docs_fetcher(), chat);

        let (status, body) = call(
            assistant,
            "POST",
            "/v1/ask",
            json!({ "query": "q", "numResults": 0 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorType"], "invalid_request");
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let chat = Arc::new(StubChat::default());
        let assistant = build(Ok(docs()), docs_fetcher(), chat.clone());

        let (status, body) = call(
            assistant,
            "POST",
            "/v1/search",
            json!({ "query": "docs", "numResults": 3 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resultCount"], 1);
        assert_eq!(body["provider"], "stub");
        assert_eq!(body["results"][0]["title"], "Docs");
        assert!(chat.models_called().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let assistant = build(Ok(docs()), docs_fetcher(), Arc::new(StubChat::default()));

        let app = build_router(AppState::new(assistant));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"]["version"], version::VERSION_NUMBER);
        assert!(body["version"]["features"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f == "model-fallback"));
        assert_eq!(body["searchEnabled"], true);
        assert_eq!(body["models"][1], MODELS[1]);
    }
}
