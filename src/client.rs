//! Dispenser client.
//!
//! DESIGN
//! ======
//! One `ModExec` is bound to one dispenser (plain or secure), chosen at
//! construction. Every call gets its own transport from the connector and its
//! own [`Exchange`], so overlapping calls share nothing mutable.
//!
//! [`ModExec::call`] is the async form. [`ModExec::exec`] keeps the
//! success/failure callback form and drives `call` on the current tokio
//! runtime.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::ModExecConfig;
use crate::error::ModExecError;
use crate::form;
use crate::reply::{Failure, Reply, parse_reply};
use crate::transport::{Connector, FormRequest, HttpConnector, RawResponse, StateChange, Transport};

// =============================================================================
// EXCHANGE
// =============================================================================

/// Where a single request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Sent,
    Pending,
    Complete,
}

/// Per-request state machine. Turns transport state changes into at most one
/// reply.
#[derive(Debug)]
pub struct Exchange {
    phase: Phase,
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}

impl Exchange {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Created }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one state change. Returns the reply once the request resolves.
    pub fn on_state_change(&mut self, change: StateChange) -> Option<Reply> {
        if self.phase == Phase::Complete {
            return None;
        }
        match change {
            StateChange::Opened => {
                self.phase = Phase::Sent;
                None
            }
            StateChange::HeadersReceived | StateChange::Loading => {
                self.phase = Phase::Pending;
                None
            }
            StateChange::Done(raw) => {
                self.phase = Phase::Complete;
                resolve(raw)
            }
        }
    }
}

fn resolve(raw: RawResponse) -> Option<Reply> {
    match raw.status {
        200 => Some(parse_reply(&raw.body)),
        // Some environments report 0 for requests that never got a status.
        0 => {
            tracing::debug!("request completed with status 0; ignoring");
            None
        }
        status => {
            tracing::debug!(status, status_text = %raw.status_text, "dispenser returned error status");
            Some(Err(Failure::unknown(raw.status_text)))
        }
    }
}

async fn run(transport: Box<dyn Transport>, request: FormRequest) -> Option<Reply> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut exchange = Exchange::new();

    let send = transport.send(request, tx);
    let drain = async {
        while let Some(change) = rx.recv().await {
            if let Some(reply) = exchange.on_state_change(change) {
                return Some(reply);
            }
        }
        None
    };

    let ((), reply) = tokio::join!(send, drain);
    reply
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ModExec {
    config: Arc<ModExecConfig>,
    authenticated: bool,
    uri: String,
    connector: Arc<dyn Connector>,
}

impl ModExec {
    /// Client for the secure dispenser when `authenticated`, otherwise the
    /// primary one, over reqwest.
    pub fn new(config: impl Into<Arc<ModExecConfig>>, authenticated: bool) -> Self {
        let config = config.into();
        let connector = Arc::new(HttpConnector::new(config.timeouts));
        Self::with_connector(config, authenticated, connector)
    }

    pub fn with_connector(
        config: impl Into<Arc<ModExecConfig>>,
        authenticated: bool,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let config = config.into();
        if !config.endpoint_is_absolute(authenticated) {
            tracing::warn!(
                path = config.endpoint(authenticated),
                "dispenser path is not absolute; it will be joined straight onto the origin"
            );
        }
        let uri = config.endpoint_url(authenticated);
        Self { config, authenticated, uri, connector }
    }

    /// Full URL of the dispenser this client posts to.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn config(&self) -> &ModExecConfig {
        &self.config
    }

    /// Call `function` in `module` on the dispenser.
    ///
    /// Resolves to `Ok(Some(reply))` once the request completes with a usable
    /// status, or `Ok(None)` if the transport finished without one (status 0).
    ///
    /// # Errors
    ///
    /// Returns an error, without sending anything, if the URL is invalid, the
    /// body cannot be encoded, or no transport can be constructed.
    pub async fn call(
        &self,
        module: &str,
        function: &str,
        args: Option<&Value>,
    ) -> Result<Option<Reply>, ModExecError> {
        let (transport, request) = self.prepare(module, function, args)?;
        Ok(run(transport, request).await)
    }

    /// Callback form of [`call`](Self::call).
    ///
    /// Returns `false`, and never invokes either callback, if the request
    /// could not be handed to a transport (including when no tokio runtime
    /// is running). Otherwise returns `true`; exactly one callback then fires
    /// if the request resolves, and neither fires if it does not.
    pub fn exec<S, F>(
        &self,
        module: &str,
        function: &str,
        args: Option<&Value>,
        on_success: S,
        on_failure: F,
    ) -> bool
    where
        S: FnOnce(Value) + Send + 'static,
        F: FnOnce(Failure) + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(module, function, "no async runtime available for dispenser call");
            return false;
        };
        let (transport, request) = match self.prepare(module, function, args) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(module, function, error = %e, "dispenser call not sent");
                return false;
            }
        };

        runtime.spawn(async move {
            match run(transport, request).await {
                Some(Ok(payload)) => on_success(payload),
                Some(Err(failure)) => on_failure(failure),
                None => {}
            }
        });
        true
    }

    fn prepare(
        &self,
        module: &str,
        function: &str,
        args: Option<&Value>,
    ) -> Result<(Box<dyn Transport>, FormRequest), ModExecError> {
        url::Url::parse(&self.uri)
            .map_err(|e| ModExecError::InvalidUrl { url: self.uri.clone(), reason: e.to_string() })?;
        let body = form::encode_body(module, function, args, &self.config.request_params)?;
        let transport = self.connector.connect()?;

        tracing::debug!(module, function, uri = %self.uri, "dispatching dispenser call");
        Ok((transport, FormRequest { url: self.uri.clone(), body }))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
