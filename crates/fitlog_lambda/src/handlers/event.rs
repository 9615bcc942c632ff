//! Reading the request description out of an invocation event.
//!
//! Function URLs and HTTP APIs (payload v2) put the method under
//! `requestContext.http.method` and the path in `rawPath`; REST APIs and ALBs
//! use `httpMethod` and `path`. A direct invocation carries the workout fields
//! at the top level with no `body` at all.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

pub fn request_method(event: &Value) -> Option<&str> {
    event
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .filter(|method| !method.is_empty())
        .or_else(|| event.get("httpMethod").and_then(Value::as_str))
}

pub fn is_preflight(event: &Value) -> bool {
    request_method(event) == Some("OPTIONS")
}

pub fn targets_path(event: &Value, path: &str) -> bool {
    ["rawPath", "path"]
        .iter()
        .any(|field| event.get(*field).and_then(Value::as_str) == Some(path))
}

/// Extracts the JSON body, decoding string payloads.
pub fn decode_body(event: Value) -> Result<Value, String> {
    let Value::Object(mut object) = event else {
        return Err("invocation event must be a JSON object".to_string());
    };

    let base64_encoded = object
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    match object.remove("body") {
        None => Ok(Value::Object(object)),
        Some(Value::Null) => Ok(json!({})),
        Some(Value::String(text)) if base64_encoded => {
            let bytes = STANDARD
                .decode(text.as_bytes())
                .map_err(|error| format!("body is not valid base64: {error}"))?;
            serde_json::from_slice(&bytes).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        Some(Value::String(text)) => {
            serde_json::from_str(&text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        Some(structured) => Ok(structured),
    }
}
