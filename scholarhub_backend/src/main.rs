use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use scholarhub_backend::cli;
use scholarhub_backend::config::ScholarhubConfig;
use scholarhub_backend::store::RecordStore;
use scholarhub_backend::telemetry;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Scholarhub academic feed, forum and search")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive shell (default)
    Cli,
    /// Run one federated search and print the results
    Search {
        query: String,
        /// all, articles, forum or users
        #[arg(long, default_value = "all")]
        tab: String,
    },
    /// Print completions for a partial query
    Suggest { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let config = ScholarhubConfig::from_env();
    let store = Arc::new(RecordStore::load(&config, Utc::now())?);
    tracing::info!(
        articles = store.articles.len(),
        threads = store.threads.len(),
        "record store ready"
    );

    match args.command.unwrap_or(Command::Cli) {
        Command::Cli => cli::run_cli(store, config).await,
        Command::Search { query, tab } => cli::run_search(store, config, &query, &tab).await,
        Command::Suggest { query } => cli::run_suggest(store, config, &query),
    }
}
