//! Resilient request dispatch.
//!
//! A dispatch is one logical write. Transport failures (refused connection,
//! timeout, DNS, truncated body) are retried with a fixed delay up to a bounded
//! number of attempts. Any reply from the server, whatever its status, ends the
//! loop: judging the reply belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::error::SeedError;
use crate::routes::Endpoint;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as `T`, rejecting non-2xx replies and bodies missing
    /// the fields `T` needs.
    pub fn parse<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, SeedError> {
        if !self.is_success() {
            return Err(SeedError::invalid_response(
                endpoint.path(),
                format!("status {}: {}", self.status, truncate(&self.body, 200)),
            ));
        }

        serde_json::from_str(&self.body)
            .map_err(|e| SeedError::invalid_response(endpoint.path(), e.to_string()))
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// One network attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, SeedError>;
}

/// Wait between attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, SeedError> {
        let transport_error = |e: reqwest::Error| SeedError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpReply { status, body })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

pub struct Dispatcher {
    base_url: String,
    transport: Box<dyn Transport>,
    delay: Box<dyn Delay>,
    policy: RetryPolicy,
}

impl Dispatcher {
    pub fn new(
        base_url: impl Into<String>,
        transport: Box<dyn Transport>,
        delay: Box<dyn Delay>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            delay,
            policy,
        }
    }

    /// Submit with the dispatcher's own retry policy.
    pub async fn submit<P>(&self, endpoint: Endpoint, payload: &P) -> Option<HttpReply>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.submit_with(endpoint, payload, self.policy).await
    }

    /// Submit `payload` to `endpoint`, retrying transport failures.
    ///
    /// Sleeps after every failed attempt but the last: `k` failures followed by
    /// a reply cost `k` sleeps, total exhaustion costs `max_attempts - 1`.
    /// Returns `None` once every attempt has failed.
    pub async fn submit_with<P>(
        &self,
        endpoint: Endpoint,
        payload: &P,
        policy: RetryPolicy,
    ) -> Option<HttpReply>
    where
        P: Serialize + ?Sized + Sync,
    {
        let url = endpoint.url(&self.base_url);
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, url = %url, "Failed to encode request body");
                return None;
            }
        };

        let max_attempts = policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.transport.post_json(&url, &body).await {
                Ok(reply) => return Some(reply),
                Err(e) if attempt < max_attempts => {
                    warn!(error = %e, attempt, max_attempts, url = %url, "Request failed, retrying");
                    self.delay.wait(policy.delay).await;
                }
                Err(e) => {
                    warn!(error = %e, attempt, max_attempts, url = %url, "Request failed, no attempts left");
                }
            }
        }

        error!(url = %url, attempts = max_attempts, "Request failed on every attempt");
        None
    }
}
