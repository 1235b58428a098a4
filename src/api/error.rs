//! Backend failure taxonomy and HTTP response classification.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Message shown when the backend gives nothing more specific.
pub const GENERIC_FAILURE: &str = "Failed to update cell.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// 422-style rejection with per-field messages.
    #[error("Validation failed: {}", summarize(.message, .errors))]
    ValidationRejected {
        message: Option<String>,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// 401: the session is gone. Handled globally, only propagated here.
    #[error("Session expired")]
    AuthExpired,

    #[error("Server error (HTTP {status})")]
    Server { status: u16, message: Option<String> },

    /// Transport failures, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// The response did not carry the entity where the resource declares it.
    #[error("Unexpected response shape: {0}")]
    Envelope(String),
}

impl RemoteError {
    /// Text for the transient error notification.
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::ValidationRejected { message, errors } => summarize(message, errors),
            RemoteError::AuthExpired => "Session expired, please log in again.".to_string(),
            RemoteError::Server {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

fn summarize(message: &Option<String>, errors: &BTreeMap<String, Vec<String>>) -> String {
    if !errors.is_empty() {
        return errors
            .iter()
            .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
    }

    match message {
        Some(m) if !m.trim().is_empty() => m.clone(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Extract `{ message }` and `{ errors: { field: [msg, ...] } }` from an error body.
/// Field errors given as a single string are accepted too.
fn error_body(body: &str) -> (Option<String>, BTreeMap<String, Vec<String>>) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (None, BTreeMap::new());
    };

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut errors = BTreeMap::new();
    if let Some(map) = json.get("errors").and_then(Value::as_object) {
        for (field, v) in map {
            let msgs = match v {
                Value::Array(items) => items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                    .collect(),
                Value::String(s) => vec![s.clone()],
                other => vec![other.to_string()],
            };
            errors.insert(field.clone(), msgs);
        }
    }

    (message, errors)
}

/// Turn a raw HTTP status + body into the parsed JSON body or a `RemoteError`.
pub fn classify_response(status: u16, body: &str) -> Result<Value, RemoteError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|e| RemoteError::Envelope(format!("invalid JSON body: {e}")));
    }

    let (message, errors) = error_body(body);

    match status {
        401 => Err(RemoteError::AuthExpired),
        422 => Err(RemoteError::ValidationRejected { message, errors }),
        400..=499 if !errors.is_empty() => Err(RemoteError::ValidationRejected { message, errors }),
        _ => Err(RemoteError::Server { status, message }),
    }
}
