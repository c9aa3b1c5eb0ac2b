//! Dispenser replies, classified once into success or failure.

use serde_json::{Value, json};

/// Synthesized code for a terminal non-200 status.
pub const ERR_UNKNOWN: &str = "ERR_UNKNOWN";
/// Synthesized code for a 200 response whose body is not JSON.
pub const ERR_PARSE: &str = "ERR_PARSE";

const FIELD_ERRCODE: &str = "errcode";
const FIELD_ERRSTR: &str = "errstr";

/// Outcome of a dispenser call: the parsed payload, or a failure.
pub type Reply = Result<Value, Failure>;

/// A failed call, as reported by the dispenser or synthesized locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub errcode: String,
    pub errstr: Option<String>,
    /// The full response object (or the synthesized one).
    pub payload: Value,
}

impl Failure {
    /// Failure synthesized on the client side.
    #[must_use]
    pub fn synthesized(errcode: &str, errstr: impl Into<String>) -> Self {
        let errstr = errstr.into();
        let payload = json!({ FIELD_ERRCODE: errcode, FIELD_ERRSTR: &errstr });
        Self { errcode: errcode.to_string(), errstr: Some(errstr), payload }
    }

    /// Failure for a terminal HTTP status other than 200.
    #[must_use]
    pub fn unknown(status_text: impl Into<String>) -> Self {
        Self::synthesized(ERR_UNKNOWN, status_text)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.errstr {
            Some(errstr) => write!(f, "{}: {errstr}", self.errcode),
            None => f.write_str(&self.errcode),
        }
    }
}

impl std::error::Error for Failure {}

/// Truthiness of a JSON value under JavaScript rules.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Classify a parsed response.
#[must_use]
pub fn classify(payload: Value) -> Reply {
    let errcode = match payload.get(FIELD_ERRCODE) {
        Some(code) if is_truthy(code) => match code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => return Ok(payload),
    };
    let errstr = match payload.get(FIELD_ERRSTR) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };
    Err(Failure { errcode, errstr, payload })
}

/// Parse and classify the body of a 200 response.
#[must_use]
pub fn parse_reply(body: &str) -> Reply {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => classify(payload),
        Err(e) => {
            tracing::warn!(error = %e, "dispenser reply is not valid JSON");
            Err(Failure::synthesized(ERR_PARSE, e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "reply_test.rs"]
mod tests;
