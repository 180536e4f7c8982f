// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use fabstir_search_assistant::{
    api::start_server, assistant::SearchAssistant, config::AssistantConfig, version,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Fabstir Search Assistant...\n");
    println!("📦 {}", version::get_version_string());
    println!("🏷️  BUILD VERSION: {}", version::VERSION);
    println!();

    let config = AssistantConfig::from_env();
    let addr = config.listen_addr().map_err(|e| anyhow!(e))?;

    println!("🔍 Web search enabled: {}", config.search.enabled);
    println!("🧵 Scrape workers: {}", config.scrape.max_workers);
    println!("🧠 Models: {}", config.answer.models.join(", "));
    if config.answer.api_token.is_none() {
        println!("⚠️  HF_TOKEN not set");
    }

    let assistant = SearchAssistant::from_config(&config)?;
    println!("✅ Assistant initialized");
    println!("🌐 API server starting on http://{}", addr);

    start_server(assistant, addr)
        .await
        .map_err(|e| anyhow!("API server failed: {}", e))?;

    Ok(())
}
