//! HTTP fetcher for target bodies.

use crate::types::{BanditError, HttpConfig, Result};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Source of document bodies.
///
/// Any failure (transport, timeout, non-200 status) is an error; the scanner
/// records its message as the target's outcome.
pub trait Fetch {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Perform the actual HTTP fetch.
    async fn do_fetch(&self, target: &str) -> Result<String> {
        let url = url::Url::parse(target)?;
        trace!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BanditError::Status(status.as_u16()));
        }

        let content = response.text().await?;
        debug!("Fetched {} ({} bytes)", target, content.len());
        Ok(content)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<String>> + Send {
        self.do_fetch(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, BanditError::UrlError(_)));
        assert!(err.to_string().starts_with("invalid URL"));
    }

    #[test]
    fn test_fetcher_creation() {
        let config = HttpConfig {
            timeout_secs: 1,
            user_agent: "test-agent".to_string(),
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }
}
