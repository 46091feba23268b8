//! # CurioDaily
//!
//! A multi-topic newsletter pipeline. For every active topic it fetches
//! recent articles from a news-search API, deduplicates and ranks them,
//! enriches the top stories through an LLM (dynamic title, overview,
//! highlights), renders web and email HTML from templates, and stores the
//! newsletter row together with the active subscriber snapshot for the
//! email-dispatch worker to fan out.
//!
//! ## Usage
//!
//! ```sh
//! curiodaily                # daily topics
//! curiodaily --weekly       # weekly topics
//! ```
//!
//! ## Architecture
//!
//! One job per active topic, run concurrently under a bounded worker
//! pool:
//! 1. **Fetch**: query shards fanned out against the search API (≤5 at a time)
//! 2. **Dedupe + rank**: fingerprint dedupe, keyword-weighted stable sort
//! 3. **Enrich**: one JSON-mode LLM call, with a deterministic fallback
//! 4. **Render**: literal placeholder substitution into the HTML templates
//! 5. **Store**: one newsletter row per topic per run

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod dedupe;
mod enrich;
mod job;
mod models;
mod news;
mod openai;
mod profiles;
mod rank;
mod render;
mod store;
mod utils;

use cli::Cli;
use config::AppConfig;
use job::Pipeline;
use news::NewsClient;
use openai::OpenAiChat;
use profiles::Cadence;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("curiodaily starting up");

    let args = Cli::parse();
    let cadence = if args.weekly { Cadence::Weekly } else { Cadence::Daily };
    info!(?cadence, templates_dir = %args.templates_dir, "Parsed CLI arguments");

    // Configuration problems are fatal before any job runs.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error");
            return Err(Box::new(e) as Box<dyn Error>);
        }
    };

    let news_api_key = match cadence {
        Cadence::Daily => config.news_api_key.clone(),
        Cadence::Weekly => config.require_weekly_key()?.to_string(),
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database pool ready");

    let pipeline = Pipeline {
        news: NewsClient::new(news_api_key),
        chat: OpenAiChat::new(config.openai_api_key.clone(), config.openai_model.clone()),
        pool,
        base_url: config.base_url.clone(),
        templates_dir: PathBuf::from(&args.templates_dir),
    };

    pipeline.run_all(cadence).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
