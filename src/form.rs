//! Form body for a dispenser call.
//!
//! `use_module=<m>&call_function=<f>&args=<json>` followed by any configured
//! request params. `args` is left out when there are no arguments.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::ModExecError;

pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const FIELD_MODULE: &str = "use_module";
pub const FIELD_FUNCTION: &str = "call_function";
pub const FIELD_ARGS: &str = "args";

const RESERVED: [&str; 3] = [FIELD_MODULE, FIELD_FUNCTION, FIELD_ARGS];

/// Encode the POST body for one invocation.
///
/// # Errors
///
/// Returns [`ModExecError::Encode`] if the arguments cannot be serialized.
pub fn encode_body(
    module: &str,
    function: &str,
    args: Option<&Value>,
    params: &Map<String, Value>,
) -> Result<String, ModExecError> {
    let mut body = form_urlencoded::Serializer::new(String::new());
    body.append_pair(FIELD_MODULE, module);
    body.append_pair(FIELD_FUNCTION, function);

    if let Some(args) = args.filter(|v| !v.is_null()) {
        let json = serde_json::to_string(args).map_err(|e| ModExecError::Encode(e.to_string()))?;
        body.append_pair(FIELD_ARGS, &json);
    }

    for (key, value) in params {
        if RESERVED.contains(&key.as_str()) {
            tracing::warn!(%key, "request param collides with a reserved field; skipping");
            continue;
        }
        match value {
            Value::String(s) => body.append_pair(key, s),
            other => body.append_pair(key, &other.to_string()),
        };
    }

    Ok(body.finish())
}

/// Decode a form body back into its pairs, in wire order.
#[must_use]
pub fn decode_body(body: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
