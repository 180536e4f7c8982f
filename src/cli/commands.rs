// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use tracing::info;

use crate::assistant::{AskOptions, AskResponse, SearchAssistant};
use crate::config::AssistantConfig;
use crate::search::SearchResponse;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to research and answer
    pub query: String,

    /// Number of search results to scrape (1-20)
    #[arg(long, short = 'n')]
    pub num_results: Option<usize>,

    /// Excerpt budget per source, in characters
    #[arg(long = "max-chars")]
    pub max_chars: Option<usize>,

    /// Print the context blob that was sent to the model
    #[arg(long)]
    pub show_context: bool,

    /// Print the raw JSON response instead of formatted text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Number of results (1-20)
    #[arg(long, short = 'n')]
    pub num_results: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

fn load_assistant() -> Result<SearchAssistant> {
    let config = AssistantConfig::from_env();
    info!("Loaded configuration: {:?}", config);
    SearchAssistant::from_config(&config).map_err(|e| anyhow!(e))
}

pub async fn ask(args: AskArgs) -> Result<()> {
    let assistant = load_assistant()?;

    let response = assistant
        .ask(AskOptions {
            query: args.query,
            num_results: args.num_results,
            max_chars_per_source: args.max_chars,
            show_context: args.show_context,
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_answer(&response));
    }
    Ok(())
}

pub async fn search(args: SearchArgs) -> Result<()> {
    let assistant = load_assistant()?;
    let response = assistant.search(&args.query, args.num_results).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_search(&response));
    }
    Ok(())
}

pub async fn probe_models() -> Result<()> {
    let assistant = load_assistant()?;
    let probes = assistant.probe_models().await;

    for probe in &probes {
        match &probe.error {
            None => println!("✅ {} ({}ms)", probe.model, probe.latency_ms),
            Some(e) => println!("❌ {} ({}ms): {}", probe.model, probe.latency_ms, e),
        }
    }

    if probes.iter().any(|p| p.available) {
        Ok(())
    } else {
        Err(anyhow!("none of the {} configured models responded", probes.len()))
    }
}

/// Answer text followed by the source list and per-source status
pub fn format_answer(response: &AskResponse) -> String {
    let mut out = String::new();

    if let Some(context) = &response.context {
        out.push_str("=== Context ===\n");
        out.push_str(context);
        out.push('\n');
    }

    out.push_str(&response.answer);
    out.push_str(&format!("\n\n(answered by {})\n\nSources:\n", response.model));

    for (i, source) in response.sources.iter().enumerate() {
        out.push_str(&format!("{}. {} - {}\n", i + 1, source.title, source.url));
    }

    for failed in &response.failed_sources {
        out.push_str(&format!("   skipped {}: {}\n", failed.url, failed.reason));
    }

    out
}

pub fn format_search(response: &SearchResponse) -> String {
    let mut out = format!(
        "{} results from {} in {}ms\n\n",
        response.result_count, response.provider, response.search_time_ms
    );
    for (i, result) in response.results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   {}\n", i + 1, result.title, result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("   {}\n", result.snippet));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{FailedSource, StageTimings};
    use crate::search::SearchResult;

    fn response(context: Option<&str>) -> AskResponse {
        AskResponse {
            query: "q".to_string(),
            answer: "Tokio is an async runtime.".to_string(),
            model: "m/one".to_string(),
            sources: vec![
                SearchResult::new("Tokio", "https://tokio.rs"),
                SearchResult::new("Empty", "https://empty.example"),
            ],
            used_sources: 1,
            failed_sources: vec![FailedSource {
                title: "Empty".to_string(),
                url: "https://empty.example".to_string(),
                reason: "No content extracted".to_string(),
            }],
            context: context.map(str::to_string),
            timings: StageTimings::default(),
        }
    }

    #[test]
    fn test_format_answer_lists_every_source() {
        let text = format_answer(&response(None));
        assert!(text.starts_with("Tokio is an async runtime."));
        assert!(text.contains("(answered by m/one)"));
        assert!(text.contains("1. Tokio - https://tokio.rs"));
        assert!(text.contains("2. Empty - https://empty.example"));
        assert!(text.contains("skipped https://empty.example: No content extracted"));
        assert!(!text.contains("=== Context ==="));
    }

    #[test]
    fn test_format_answer_with_context() {
        let text = format_answer(&response(Some("Source: Tokio\n")));
        assert!(text.starts_with("=== Context ===\nSource: Tokio\n"));
    }
}
