//! Dispenser configuration.
//!
//! Dispenser paths are absolute paths on `origin`, never full URLs on another
//! host. Nothing here enforces that; a cross-origin path simply is not a
//! supported setup. Query strings do not belong on the dispenser path either:
//! put per-deployment parameters in `request_params` instead.

use serde_json::{Map, Value};

use crate::error::ModExecError;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1";
pub const DEFAULT_MODEXEC_PATH: &str = "/jslib";
pub const DEFAULT_DISPENSER: &str = "/modexec/dispenser.pl";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModExecConfig {
    /// Scheme, host and port the absolute paths below are resolved against.
    pub origin: String,
    /// Absolute path of the supporting assets.
    pub modexec_path: String,
    /// Primary dispenser.
    pub dispenser: String,
    /// Dispenser for authenticated sessions.
    pub secure_dispenser: String,
    /// Extra parameters sent with every dispenser call.
    pub request_params: Map<String, Value>,
    pub timeouts: Timeouts,
}

impl Default for ModExecConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            modexec_path: DEFAULT_MODEXEC_PATH.to_string(),
            dispenser: DEFAULT_DISPENSER.to_string(),
            secure_dispenser: DEFAULT_DISPENSER.to_string(),
            request_params: Map::new(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ModExecConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `MODEXEC_ORIGIN`: default `http://127.0.0.1`
    /// - `MODEXEC_PATH`: default `/jslib`
    /// - `MODEXEC_DISPENSER`: default `/modexec/dispenser.pl`
    /// - `MODEXEC_SECURE_DISPENSER`: default `/modexec/dispenser.pl`
    /// - `MODEXEC_REQUEST_PARAMS`: JSON object, default `{}`
    /// - `MODEXEC_REQUEST_TIMEOUT_SECS`: default 120
    /// - `MODEXEC_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ModExecError::ConfigParse`] if `MODEXEC_REQUEST_PARAMS` is
    /// not a JSON object.
    pub fn from_env() -> Result<Self, ModExecError> {
        let origin = std::env::var("MODEXEC_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let modexec_path = std::env::var("MODEXEC_PATH").unwrap_or_else(|_| DEFAULT_MODEXEC_PATH.to_string());
        let dispenser = std::env::var("MODEXEC_DISPENSER").unwrap_or_else(|_| DEFAULT_DISPENSER.to_string());
        let secure_dispenser =
            std::env::var("MODEXEC_SECURE_DISPENSER").unwrap_or_else(|_| DEFAULT_DISPENSER.to_string());
        let request_params = parse_request_params(std::env::var("MODEXEC_REQUEST_PARAMS").ok().as_deref())?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("MODEXEC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("MODEXEC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { origin, modexec_path, dispenser, secure_dispenser, request_params, timeouts }.normalized())
    }

    /// Replace the origin, trimming any trailing `/`.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.origin.trim_end_matches('/').len();
        self.origin.truncate(trimmed);
        self
    }

    /// Dispenser path for the given session kind.
    #[must_use]
    pub fn endpoint(&self, authenticated: bool) -> &str {
        if authenticated { &self.secure_dispenser } else { &self.dispenser }
    }

    /// Whether the dispenser path follows the absolute-path convention.
    /// A path without a leading `/` runs into the host when joined to `origin`.
    #[must_use]
    pub fn endpoint_is_absolute(&self, authenticated: bool) -> bool {
        self.endpoint(authenticated).starts_with('/')
    }

    #[must_use]
    pub fn endpoint_url(&self, authenticated: bool) -> String {
        format!("{}{}", self.origin, self.endpoint(authenticated))
    }

    /// URL of a supporting asset under `modexec_path`.
    #[must_use]
    pub fn asset_url(&self, name: &str) -> String {
        format!("{}{}/{}", self.origin, self.modexec_path.trim_end_matches('/'), name.trim_start_matches('/'))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_request_params(raw: Option<&str>) -> Result<Map<String, Value>, ModExecError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ModExecError::ConfigParse(format!(
            "MODEXEC_REQUEST_PARAMS must be a JSON object, got {other}"
        ))),
        Err(e) => Err(ModExecError::ConfigParse(format!("MODEXEC_REQUEST_PARAMS: {e}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
