//! Async transport seam for dispenser requests.
//!
//! A transport reports progress as a sequence of [`StateChange`]s on a
//! channel, the same shape as a browser request's ready-state callback. Only
//! the client decides which of those states mean anything.

pub mod http;

use tokio::sync::mpsc;

use crate::error::ModExecError;

pub use http::{HttpConnector, HttpTransport};

/// A fully encoded POST, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub url: String,
    pub body: String,
}

/// Terminal response as seen by the transport.
///
/// `status` is 0 when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    /// Response for a request that never got an HTTP status.
    #[must_use]
    pub fn no_status() -> Self {
        Self { status: 0, status_text: String::new(), body: String::new() }
    }
}

/// Progress of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Request opened and sent.
    Opened,
    /// Status line and headers received.
    HeadersReceived,
    /// Body is being received.
    Loading,
    /// Terminal state. Nothing follows it.
    Done(RawResponse),
}

/// Sender half handed to a transport.
pub type StateSender = mpsc::UnboundedSender<StateChange>;

/// One request's worth of transport.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, reporting every state change on `events`.
    ///
    /// A receiver that has gone away is not an error; the transport just
    /// stops reporting.
    async fn send(&self, request: FormRequest, events: StateSender);
}

/// Produces a fresh [`Transport`] for every request.
pub trait Connector: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModExecError::TransportUnavailable`] if no transport can be
    /// constructed.
    fn connect(&self) -> Result<Box<dyn Transport>, ModExecError>;
}
