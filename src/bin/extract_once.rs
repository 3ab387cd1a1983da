use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use scraper::Html;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_odds_board::api::{FilePageSource, HttpPageSource, PageSource, ReadyMarker};
use live_odds_board::config::Config;
use live_odds_board::detection::fingerprint;
use live_odds_board::extraction::{MarkupProfile, RecordExtractor};

/// Scrape one page and print its records as JSON.
///
/// Usage: `extract_once [--file saved.html] [--url https://...]`
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extract_once=info,live_odds_board=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let file = parse_flag(&args, "--file").map(Into::into).or(config.page_file.clone());
    let url = parse_flag(&args, "--url").unwrap_or_else(|| config.target_url.clone());

    let ready = ReadyMarker::parse(&config.ready_selector)?;
    let mut source: Box<dyn PageSource> = match file {
        Some(path) => {
            info!("Reading saved page {}", path.display());
            Box::new(FilePageSource::new(path))
        }
        None => {
            info!("Fetching {}", url);
            Box::new(HttpPageSource::new(&url, &config.user_agent)?)
        }
    };

    let result = scrape(source.as_mut(), config.ready_timeout()).await;

    if let Err(e) = source.close().await {
        warn!("Failed to close page source: {}", e);
    }

    let page = result?;
    let extractor = RecordExtractor::new(&MarkupProfile::default())?;
    let document = Html::parse_document(&page);
    if let Err(e) = ready.check(&document) {
        // Still dump whatever is there; handy when the ready marker moved
        warn!("{}", e);
    }
    let records = extractor.extract(&document);

    info!(
        "Extracted {} records (fingerprint {})",
        records.len(),
        fingerprint(&records)
    );
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}

async fn scrape(source: &mut dyn PageSource, timeout: Duration) -> Result<String> {
    if let Err(e) = source.wait_until_ready(timeout).await {
        warn!("Page not ready: {}", e);
    }
    source
        .page_source()
        .await
        .context("Failed to read page source")
}

/// Value following `flag`, if any
fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
