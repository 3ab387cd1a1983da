use std::future::Future;
use std::time::Duration;

use scraper::Html;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::{PageSource, ReadyMarker};
use crate::detection::{diff, fingerprint, Fingerprint};
use crate::error::CycleError;
use crate::extraction::RecordExtractor;
use crate::models::{DisplayState, MatchRecord};
use crate::render::{Dashboard, Renderer};

/// What a single polling cycle did
#[derive(Debug)]
pub enum CycleOutcome {
    /// Records changed and a new dashboard was drawn
    Updated {
        fixtures: usize,
        changed_cells: usize,
    },

    /// Records hash the same as the last drawn cycle
    Unchanged,

    /// The cycle was abandoned; nothing was drawn
    Failed(CycleError),
}

/// Counters returned when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub cycles: u64,
    pub updates: u64,
    pub unchanged: u64,
    pub failures: u64,
}

impl PollStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Updated { .. } => self.updates += 1,
            CycleOutcome::Unchanged => self.unchanged += 1,
            CycleOutcome::Failed(_) => self.failures += 1,
        }
    }
}

/// Worker that polls the page, detects changes and redraws the dashboard
///
/// The loop has a single steady state (polling). It leaves it only when the
/// stop future passed to [`PollLoop::run`] resolves, after which the page
/// source and renderer are always closed.
pub struct PollLoop<S, R> {
    source: S,
    renderer: R,
    ready: ReadyMarker,
    extractor: RecordExtractor,
    poll_interval: Duration,
    ready_timeout: Duration,
    state: DisplayState,
    last_fingerprint: Option<Fingerprint>,
}

impl<S: PageSource, R: Renderer> PollLoop<S, R> {
    /// Create a new poll loop
    pub fn new(
        source: S,
        renderer: R,
        ready: ReadyMarker,
        extractor: RecordExtractor,
        poll_interval: Duration,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            source,
            renderer,
            ready,
            extractor,
            poll_interval,
            ready_timeout,
            state: DisplayState::new(),
            last_fingerprint: None,
        }
    }

    /// Snapshot of the last drawn record per fixture
    pub fn display_state(&self) -> &DisplayState {
        &self.state
    }

    /// Poll until `stop` resolves, then release the source and renderer
    pub async fn run<F>(mut self, stop: F) -> PollStats
    where
        F: Future<Output = ()>,
    {
        info!("Poll loop started (interval: {:?})", self.poll_interval);

        let mut stats = PollStats::default();
        tokio::pin!(stop);

        loop {
            let cycle = async {
                let outcome = self.run_cycle().await;
                stats.record(&outcome);
                time::sleep(self.poll_interval).await;
            };

            tokio::select! {
                biased;
                _ = &mut stop => {
                    info!("Stop signal received");
                    break;
                }
                _ = cycle => {}
            }
        }

        self.shutdown().await;
        info!(
            "Poll loop stopped after {} cycles ({} updates, {} unchanged, {} failed)",
            stats.cycles, stats.updates, stats.unchanged, stats.failures
        );
        stats
    }

    /// Perform a single poll cycle
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.scrape().await {
            Ok(records) => self.publish(records),
            Err(e) => CycleOutcome::Failed(e),
        };

        match &outcome {
            CycleOutcome::Updated {
                fixtures,
                changed_cells,
            } => info!(
                "🔄 UI updated ({} fixtures, {} changed cells)",
                fixtures, changed_cells
            ),
            CycleOutcome::Unchanged => {
                info!("⏳ No changes.");
                self.tick_renderer();
            }
            CycleOutcome::Failed(e) => {
                warn!("⚠️ Scrape error: {}", e);
                if let Err(render_err) = self.renderer.report_warning(&e.to_string()) {
                    debug!("Could not show warning on dashboard: {}", render_err);
                }
                self.tick_renderer();
            }
        }

        outcome
    }

    /// Fetch the page, check it is loaded and extract its records.
    ///
    /// The page is parsed once; the readiness check and the extractor read
    /// the same document.
    async fn scrape(&mut self) -> Result<Vec<MatchRecord>, CycleError> {
        self.source.wait_until_ready(self.ready_timeout).await?;
        let page = self.source.page_source().await?;

        let document = Html::parse_document(&page);
        self.ready.check(&document)?;
        Ok(self.extractor.extract(&document))
    }

    /// Let the renderer expire highlights on cycles that draw nothing new
    fn tick_renderer(&mut self) {
        if let Err(e) = self.renderer.tick() {
            debug!("Renderer tick failed: {}", e);
        }
    }

    /// Diff and draw `records` unless they match the last drawn cycle.
    ///
    /// Display state and fingerprint are only committed once the renderer
    /// has accepted the dashboard.
    fn publish(&mut self, records: Vec<MatchRecord>) -> CycleOutcome {
        let current = fingerprint(&records);
        if self.last_fingerprint == Some(current) {
            return CycleOutcome::Unchanged;
        }

        debug!("Fingerprint changed to {}", current);

        let result = diff(self.state.clone(), &records);
        let dashboard = Dashboard::build(&records, &result.changes);

        if let Err(e) = self.renderer.render(&dashboard) {
            return CycleOutcome::Failed(e.into());
        }

        self.state = result.state;
        self.last_fingerprint = Some(current);

        CycleOutcome::Updated {
            fixtures: dashboard.fixture_count(),
            changed_cells: dashboard.emphasized_count(),
        }
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.source.close().await {
            error!("Failed to close page source: {}", e);
        }
        if let Err(e) = self.renderer.close() {
            error!("Failed to restore renderer: {}", e);
        }
    }
}
