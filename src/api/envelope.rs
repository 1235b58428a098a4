//! Per-resource response envelopes.
//!
//! Every resource declares where its entity sits in a response body; callers
//! never guess between `body`, `body.data` and `body.quotation`.

use crate::api::error::RemoteError;
use crate::models::row::EditableRow;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body is the payload.
    Root,
    /// The payload sits under a top-level key.
    Key(&'static str),
}

impl Envelope {
    fn open(&self, body: Value) -> Result<Value, RemoteError> {
        match self {
            Envelope::Root => Ok(body),
            Envelope::Key(key) => match body {
                Value::Object(mut map) => map
                    .remove(*key)
                    .ok_or_else(|| RemoteError::Envelope(format!("missing '{key}' in response"))),
                _ => Err(RemoteError::Envelope(format!(
                    "expected an object with '{key}', got {}",
                    kind_of(&body)
                ))),
            },
        }
    }

    /// `unwrap(response) -> entity`
    pub fn unwrap_entity(&self, body: Value) -> Result<EditableRow, RemoteError> {
        EditableRow::from_json(self.open(body)?)
    }

    pub fn unwrap_list(&self, body: Value) -> Result<Vec<EditableRow>, RemoteError> {
        match self.open(body)? {
            Value::Array(items) => items.into_iter().map(EditableRow::from_json).collect(),
            other => Err(RemoteError::Envelope(format!(
                "expected a list, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
