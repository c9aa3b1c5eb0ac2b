//! reqwest-backed transport.
//!
//! Network failures surface as `Done` with status 0, which is what a browser
//! request reports for them too.

use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::header::CONTENT_TYPE;

use super::{Connector, FormRequest, RawResponse, StateChange, StateSender, Transport};
use crate::config::Timeouts;
use crate::error::ModExecError;
use crate::form;

// =============================================================================
// CONNECTOR
// =============================================================================

/// Hands out transports that share one `reqwest::Client`.
///
/// A client that failed to build is remembered and reported on every
/// [`Connector::connect`], so callers still see the failure per request.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: Result<reqwest::Client, String>,
}

impl HttpConnector {
    #[must_use]
    pub fn new(timeouts: Timeouts) -> Self {
        let http = build_client(timeouts).map_err(|e| e.to_string());
        if let Err(e) = &http {
            tracing::warn!(error = %e, "HTTP client build failed; dispenser calls will not be sent");
        }
        Self { http }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(Timeouts::default())
    }
}

impl Connector for HttpConnector {
    fn connect(&self) -> Result<Box<dyn Transport>, ModExecError> {
        match &self.http {
            Ok(http) => Ok(Box::new(HttpTransport { http: http.clone() })),
            Err(e) => Err(ModExecError::TransportUnavailable(e.clone())),
        }
    }
}

fn build_client(timeouts: Timeouts) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
}

// =============================================================================
// TRANSPORT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`ModExecError::TransportUnavailable`] if the HTTP client
    /// cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, ModExecError> {
        let http = build_client(timeouts).map_err(|e| ModExecError::TransportUnavailable(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: FormRequest, events: StateSender) {
        let _ = events.send(StateChange::Opened);

        let response = match self
            .http
            .post(request.url.as_str())
            .header(CONTENT_TYPE, form::CONTENT_TYPE)
            .body(request.body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "dispenser request failed");
                let _ = events.send(StateChange::Done(RawResponse::no_status()));
                return;
            }
        };

        let status = response.status();
        let status_text = reason_phrase(&response);
        let _ = events.send(StateChange::HeadersReceived);
        let _ = events.send(StateChange::Loading);

        let done = match response.text().await {
            Ok(body) => RawResponse { status: status.as_u16(), status_text, body },
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "dispenser response body failed");
                RawResponse::no_status()
            }
        };
        let _ = events.send(StateChange::Done(done));
    }
}

/// Reason phrase the server sent, or the canonical one for the status.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
