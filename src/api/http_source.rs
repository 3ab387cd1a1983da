use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::page_source::PageSource;
use crate::error::SourceError;

/// Polls a live page over HTTP
pub struct HttpPageSource {
    client: Option<Client>,
    url: String,
    /// Body fetched by the last successful readiness wait
    latest: Option<String>,
}

impl HttpPageSource {
    /// Create a new source for `url`
    pub fn new(url: &str, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client: Some(client),
            url: url.to_string(),
            latest: None,
        })
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        let client = self.client.as_ref().ok_or(SourceError::Closed)?;

        debug!("Fetching page from {}", self.url);

        let response = client
            .get(&self.url)
            .header("Accept", "text/html")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn wait_until_ready(&mut self, timeout: Duration) -> Result<(), SourceError> {
        self.latest = None;

        let body = tokio::time::timeout(timeout, self.fetch())
            .await
            .map_err(|_| SourceError::Timeout(timeout))??;

        self.latest = Some(body);
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, SourceError> {
        match self.latest.take() {
            Some(body) => Ok(body),
            None => self.fetch().await,
        }
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        if self.client.take().is_some() {
            info!("Closed HTTP page source for {}", self.url);
        }
        self.latest = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpPageSource {
        HttpPageSource::new("http://127.0.0.1:9/in-play", "test-agent").unwrap()
    }

    #[tokio::test]
    async fn test_closed_source_refuses_requests() {
        let mut source = source();
        source.close().await.unwrap();

        assert!(matches!(
            source.page_source().await,
            Err(SourceError::Closed)
        ));
        assert!(matches!(
            source.wait_until_ready(Duration::from_millis(50)).await,
            Err(SourceError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut source = source();

        assert!(source.close().await.is_ok());
        assert!(source.close().await.is_ok());
    }
}
