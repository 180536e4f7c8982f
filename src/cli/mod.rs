// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Fabstir Search Assistant CLI
#[derive(Parser, Debug)]
#[command(name = "ask-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Search the web and answer questions from the results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, scrape the results, and answer from their content
    Ask(commands::AskArgs),

    /// Run the search step only
    Search(commands::SearchArgs),

    /// Check which configured models respond
    ProbeModels,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask(args) => commands::ask(args).await,
        Commands::Search(args) => commands::search(args).await,
        Commands::ProbeModels => commands::probe_models().await,
    }
}
