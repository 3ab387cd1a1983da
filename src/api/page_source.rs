use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::error::SourceError;

/// Provider of rendered page markup
#[async_trait]
pub trait PageSource: Send {
    /// Wait, at most `timeout`, for the current page to load
    async fn wait_until_ready(&mut self, timeout: Duration) -> Result<(), SourceError>;

    /// Current markup of the page
    async fn page_source(&mut self) -> Result<String, SourceError>;

    /// Release the underlying session
    async fn close(&mut self) -> Result<(), SourceError>;
}

/// Element that must be on a loaded page before it is scraped.
///
/// Checked against the same parsed document the extractor reads, so each
/// page is parsed once per cycle.
#[derive(Debug, Clone)]
pub struct ReadyMarker {
    raw: String,
    selector: Selector,
}

impl ReadyMarker {
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let selector = Selector::parse(raw).map_err(|e| SourceError::InvalidMarker {
            selector: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            selector,
        })
    }

    /// Check that `document` contains the marker
    pub fn check(&self, document: &Html) -> Result<(), SourceError> {
        if document.select(&self.selector).next().is_some() {
            Ok(())
        } else {
            Err(SourceError::NotReady(self.raw.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_marker() {
        let marker = ReadyMarker::parse("div.sport-events-container").unwrap();

        let loaded = Html::parse_document(r#"<div class="sport-events-container"></div>"#);
        assert!(marker.check(&loaded).is_ok());

        let loading = Html::parse_document("<p>Loading…</p>");
        assert!(matches!(
            marker.check(&loading),
            Err(SourceError::NotReady(_))
        ));
    }

    #[test]
    fn test_invalid_marker_is_rejected() {
        let err = ReadyMarker::parse("div[").unwrap_err();

        assert!(matches!(
            err,
            SourceError::InvalidMarker { ref selector, .. } if selector == "div["
        ));
    }
}
