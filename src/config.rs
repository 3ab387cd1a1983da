use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_TARGET_URL: &str = "https://sports.williamhill.com/betting/en-gb/in-play/all";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Log file used by the terminal renderer when `LOG_FILE` is unset
pub const DEFAULT_TERMINAL_LOG_FILE: &str = "live-odds-board.log";

/// How updates are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Full-screen table in the terminal
    Terminal,
    /// Rows written to the log
    Log,
}

impl FromStr for RendererKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "tui" => Ok(RendererKind::Terminal),
            "log" | "plain" => Ok(RendererKind::Log),
            other => bail!("Unknown renderer `{}` (expected `terminal` or `log`)", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Page polled for live events
    pub target_url: String,

    /// Interval in seconds between polling cycles
    pub poll_interval: u64,

    /// Upper bound on the page readiness wait, in milliseconds
    pub ready_timeout_ms: u64,

    /// Selector that must be present before a page is scraped
    pub ready_selector: String,

    /// User agent sent with page requests
    pub user_agent: String,

    /// Saved page to replay instead of fetching `target_url`
    pub page_file: Option<PathBuf>,

    /// Dashboard output
    pub renderer: RendererKind,

    /// Log destination, see [`Config::log_destination`]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            target_url: lookup("TARGET_URL").unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),

            poll_interval: lookup("POLL_INTERVAL")
                .unwrap_or_else(|| "1".to_string())
                .parse()
                .context("POLL_INTERVAL must be a valid number")?,

            ready_timeout_ms: lookup("READY_TIMEOUT_MS")
                .unwrap_or_else(|| "1000".to_string())
                .parse()
                .context("READY_TIMEOUT_MS must be a valid number")?,

            ready_selector: lookup("READY_SELECTOR")
                .unwrap_or_else(|| "div.sport-events-container".to_string()),

            user_agent: lookup("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),

            page_file: lookup("PAGE_FILE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),

            renderer: lookup("RENDERER")
                .unwrap_or_else(|| "terminal".to_string())
                .parse()
                .context("RENDERER must be `terminal` or `log`")?,

            log_file: lookup("LOG_FILE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    /// File the logs go to, or `None` for stderr.
    ///
    /// The terminal renderer owns the screen, so it always logs to a file.
    pub fn log_destination(&self) -> Option<PathBuf> {
        match (&self.log_file, self.renderer) {
            (Some(path), _) => Some(path.clone()),
            (None, RendererKind::Terminal) => Some(PathBuf::from(DEFAULT_TERMINAL_LOG_FILE)),
            (None, RendererKind::Log) => None,
        }
    }
}
