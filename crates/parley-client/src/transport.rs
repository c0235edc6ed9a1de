use anyhow::{Context, Result};
use async_trait::async_trait;

use parley_types::{AskRequest, ReplyEnvelope};

/// A single best-effort request/response exchange with a reply service.
///
/// Implementors encapsulate transport and serialization details, so the
/// chat client stays decoupled from any particular HTTP stack. No retry,
/// no timeout, no cancellation: one call, one result.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn exchange(&self, request: &AskRequest) -> Result<ReplyEnvelope>;
}

/// HTTP implementation of [`ReplyTransport`] speaking the `POST /get`
/// wire protocol of the reply service.
pub struct HttpReplyTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpReplyTransport {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/get", base_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ReplyTransport for HttpReplyTransport {
    async fn exchange(&self, request: &AskRequest) -> Result<ReplyEnvelope> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .with_context(|| format!("reply service unreachable at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("reply service returned {}: {}", status, error_text);
        }

        let body = response.text().await.context("failed to read reply body")?;
        let envelope: ReplyEnvelope =
            serde_json::from_str(&body).context("malformed reply body")?;

        Ok(envelope)
    }
}
