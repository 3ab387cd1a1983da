use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::page_source::PageSource;
use crate::error::SourceError;

/// Replays a saved page from disk, re-reading it on every cycle
pub struct FilePageSource {
    path: PathBuf,
    /// Body read by the last readiness wait
    latest: Option<String>,
    closed: bool,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latest: None,
            closed: false,
        }
    }

    async fn read(&self) -> Result<String, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        debug!("Reading page from {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn wait_until_ready(&mut self, timeout: Duration) -> Result<(), SourceError> {
        self.latest = None;

        let body = tokio::time::timeout(timeout, self.read())
            .await
            .map_err(|_| SourceError::Timeout(timeout))??;

        self.latest = Some(body);
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, SourceError> {
        match self.latest.take() {
            Some(body) => Ok(body),
            None => self.read().await,
        }
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        if !self.closed {
            info!("Closed file page source {}", self.path.display());
        }
        self.closed = true;
        self.latest = None;
        Ok(())
    }
}
