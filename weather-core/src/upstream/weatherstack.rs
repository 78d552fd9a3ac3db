use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{config::Config, error::TransportError, response::truncate_body};

use super::UpstreamClient;

/// Single-shot HTTP client for the weatherstack `current` endpoint.
///
/// `GET {base_url}?access_key={key}&query={city}`. The provider reports its
/// own failures in-band with HTTP 200, so a 2xx body is returned verbatim;
/// only network-level problems and non-2xx statuses become `TransportError`.
#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    base_url: String,
    access_key: String,
    http: Client,
}

impl WeatherstackClient {
    /// Build a client from configuration. The request timeout is bounded so
    /// a hung upstream cannot block a lookup forever.
    pub fn new(config: &Config, access_key: String) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(TransportError::Send)?;

        Ok(Self { base_url: config.base_url.clone(), access_key, http })
    }
}

#[async_trait]
impl UpstreamClient for WeatherstackClient {
    async fn fetch(&self, city: &str) -> Result<String, TransportError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("access_key", self.access_key.as_str()), ("query", city)])
            .send()
            .await
            .map_err(TransportError::Send)?;

        let status = res.status();
        let body = res.text().await.map_err(TransportError::Body)?;

        if !status.is_success() {
            return Err(TransportError::Status { status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}
