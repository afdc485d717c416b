use tracing::debug;

use crate::error::MontageError;
use crate::montage::request::Endpoint;
use crate::montage::types::MutationEnvelope;

/// Something that can deliver an envelope to Montage and hand back the raw
/// response body.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send `envelope` to `endpoint`.
    ///
    /// `context` prefixes network failures, e.g. "Problem starting session
    /// in Montage".
    ///
    /// # Errors
    ///
    /// `MontageError::Transport` or `MontageError::HttpStatus` when nothing
    /// usable came back, `MontageError::EmptyResponse` when the call worked
    /// but the body was empty.
    async fn send(
        &self,
        endpoint: &Endpoint,
        envelope: &MutationEnvelope,
        context: &str,
    ) -> Result<String, MontageError>;
}

/// HTTP transport backed by reqwest.
///
/// No timeout and no retries: a stuck server stalls the command until the
/// user interrupts it.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        envelope: &MutationEnvelope,
        context: &str,
    ) -> Result<String, MontageError> {
        debug!(%endpoint, query = %envelope.query, variables = %envelope.variables, "sending request");

        let transport_error = |source: reqwest::Error| MontageError::Transport {
            context: context.to_string(),
            source,
        };

        // `.json()` also sets `Content-Type: application/json`.
        let response = self
            .client
            .post(endpoint.url().clone())
            .json(envelope)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if body.trim().is_empty() {
            if status.is_success() {
                return Err(MontageError::EmptyResponse);
            }
            return Err(MontageError::HttpStatus {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }

        // A failure status is only worth interpreting when it carries a JSON
        // body, which is where GraphQL puts its `errors` list.
        if !status.is_success() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            return Err(MontageError::HttpStatus {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(body)
    }
}
