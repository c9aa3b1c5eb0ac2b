//! Errors raised before a request reaches the dispenser.
//!
//! Anything the dispenser itself reports is a [`crate::reply::Failure`], not
//! a [`ModExecError`].

/// Stable machine-readable code for an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced by configuration and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ModExecError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// No async HTTP transport could be constructed for the request.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The dispenser URL does not parse.
    #[error("invalid dispenser URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ErrorCode for ModExecError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::TransportUnavailable(_) => "E_TRANSPORT_UNAVAILABLE",
            Self::InvalidUrl { .. } => "E_INVALID_URL",
            Self::Encode(_) => "E_ENCODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::TransportUnavailable(_))
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
