use std::time::Duration;

/// Errors raised by a page source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Page request returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page not ready after {0:?}")]
    Timeout(Duration),

    #[error("Readiness marker `{0}` not found on page")]
    NotReady(String),

    #[error("Invalid readiness selector `{selector}`: {reason}")]
    InvalidMarker { selector: String, reason: String },

    #[error("Page source is closed")]
    Closed,
}

/// Errors raised while building the record extractor
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },
}

/// Errors raised by a renderer
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a whole polling cycle. The loop logs it and carries on.
///
/// Extraction itself cannot fail once the extractor is built; missing
/// fragments degrade to sentinels instead.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
