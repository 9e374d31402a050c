//! Wire-level page fetch client
//!
//! Posts a [`FetchRequest`] as a JSON body and classifies the response
//! envelope:
//! - 2xx with `success: true` carries a markup fragment
//! - 2xx with `success: false` is the server's end-of-data signal
//! - any other status (or an unparseable body) is a transport failure

use crate::error::{Error, Result};
use crate::pagination::PageFetcher;
use crate::types::{Envelope, FetchRequest, FetchResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the fetch client
#[derive(Debug, Clone)]
pub struct FetchClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("loadmore/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP implementation of [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    endpoint: Url,
}

impl FetchClient {
    /// Create a client posting to the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, FetchClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(endpoint: &str, config: FetchClientConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one fetch request and classify the response
    pub async fn send(&self, request: &FetchRequest) -> Result<FetchResult> {
        debug!(action = %request.action, page = %request.page, "dispatching page fetch");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify(status, &body)
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn fetch(&self, request: FetchRequest) -> FetchResult {
        match self.send(&request).await {
            Ok(result) => result,
            Err(err) => {
                debug!(error = %err, "page fetch failed");
                FetchResult::Failure {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Classify a response into a settled fetch result
fn classify(status: StatusCode, body: &str) -> Result<FetchResult> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| Error::malformed_envelope(format!("status {status}: {e}")))?;

    if envelope.success {
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), body));
        }
        match envelope.data.html {
            Some(html) => Ok(FetchResult::Success { html }),
            None => Err(Error::malformed_envelope(
                "success envelope without an html fragment",
            )),
        }
    } else {
        let message = envelope
            .data
            .message
            .unwrap_or_else(|| format!("request rejected with status {status}"));

        if status.is_success() {
            // An error envelope on 200 is the end-of-data signal
            Ok(FetchResult::Empty { message })
        } else {
            Ok(FetchResult::Failure { reason: message })
        }
    }
}
