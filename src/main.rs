use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_odds_board::api::{FilePageSource, HttpPageSource, PageSource, ReadyMarker};
use live_odds_board::config::{Config, RendererKind};
use live_odds_board::extraction::{MarkupProfile, RecordExtractor};
use live_odds_board::render::{LogRenderer, Renderer, TerminalRenderer};
use live_odds_board::shutdown::shutdown_signal;
use live_odds_board::workers::PollLoop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    init_logging(&config)?;
    info!("Starting live-odds-board");
    info!("Configuration loaded");

    let extractor = RecordExtractor::new(&MarkupProfile::default())?;
    let ready = ReadyMarker::parse(&config.ready_selector)?;

    match &config.page_file {
        Some(path) => {
            info!("Replaying saved page {}", path.display());
            let source = FilePageSource::new(path);
            run_with_source(&config, source, ready, extractor).await
        }
        None => {
            info!("Polling {}", config.target_url);
            let source = HttpPageSource::new(&config.target_url, &config.user_agent)
                .context("Failed to build HTTP client")?;
            run_with_source(&config, source, ready, extractor).await
        }
    }
}

async fn run_with_source<S: PageSource>(
    config: &Config,
    source: S,
    ready: ReadyMarker,
    extractor: RecordExtractor,
) -> Result<()> {
    match config.renderer {
        RendererKind::Terminal => {
            let renderer = TerminalRenderer::stdout().context("Failed to set up terminal")?;
            run_loop(config, source, renderer, ready, extractor).await
        }
        RendererKind::Log => run_loop(config, source, LogRenderer::new(), ready, extractor).await,
    }
}

async fn run_loop<S: PageSource, R: Renderer>(
    config: &Config,
    source: S,
    renderer: R,
    ready: ReadyMarker,
    extractor: RecordExtractor,
) -> Result<()> {
    let shutdown = shutdown_signal().context("Failed to install signal handlers")?;

    let poll_loop = PollLoop::new(
        source,
        renderer,
        ready,
        extractor,
        config.poll_interval(),
        config.ready_timeout(),
    );

    // The loop closes the source and renderer on the way out
    poll_loop
        .run(async {
            let signal = shutdown.await;
            info!("Received {}", signal);
        })
        .await;

    info!("Shutting down live-odds-board");
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "live_odds_board=info,warn".into());

    match config.log_destination() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
