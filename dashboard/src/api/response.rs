//! Response normalization.
//!
//! Every backend reply is reduced to a status plus a JSON body before the
//! caller sees it. Bodies that are not JSON become `{"message": text}`, and
//! non-2xx replies get `error` and `status` attached, so callers look for the
//! error instead of handling parse failures.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::{ClientError, ClientResult};

/// A parsed reply with its HTTP status
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub status: u16,
    pub body: Value,
}

/// Parse a body, falling back to `{"message": text}` for anything non-JSON
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Value {
    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if is_json {
        return serde_json::from_slice(bytes)
            .unwrap_or_else(|_| json!({ "error": "Failed to parse response body" }));
    }

    let text = String::from_utf8_lossy(bytes);
    serde_json::from_str(&text).unwrap_or_else(|_| json!({ "message": text }))
}

/// Build the normalized reply for a status, content type and raw body
pub fn normalize(status: u16, content_type: Option<&str>, bytes: &[u8]) -> Normalized {
    let mut body = parse_body(content_type, bytes);
    if !is_success(status) {
        if let Value::Object(map) = &mut body {
            attach_error(map, status);
        }
    }
    Normalized { status, body }
}

fn attach_error(map: &mut Map<String, Value>, status: u16) {
    if !map.contains_key("error") {
        map.insert("error".to_string(), Value::String(format!("HTTP {}", status)));
    }
    map.insert("status".to_string(), Value::from(status));
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl Normalized {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    /// The `error` value of the body, if it has one
    pub fn error_message(&self) -> Option<String> {
        match self.body.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Check for a backend-reported error without decoding the body
    pub fn check(self) -> ClientResult<Value> {
        if let Some(message) = self.error_message() {
            return Err(ClientError::Backend {
                status: self.status,
                message,
                body: self.body,
            });
        }
        if !self.is_success() {
            return Err(ClientError::Backend {
                status: self.status,
                message: format!("HTTP {}", self.status),
                body: self.body,
            });
        }
        Ok(self.body)
    }

    /// Decode a successful body into `T`
    pub fn into_result<T: DeserializeOwned>(self) -> ClientResult<T> {
        let body = self.check()?;
        serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
