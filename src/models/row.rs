use crate::api::error::RemoteError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Opaque row identifier, stable across refetches.
/// Backends send numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// One record as displayed in a grid.
///
/// `fields` holds the entity exactly as the backend returned it, `id`
/// included. The id is read once at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableRow {
    id: RowId,
    fields: Map<String, Value>,
}

static NULL: Value = Value::Null;

impl EditableRow {
    pub fn from_json(value: Value) -> Result<Self, RemoteError> {
        let Value::Object(fields) = value else {
            return Err(RemoteError::Envelope("entity is not a JSON object".into()));
        };

        let id = fields
            .get("id")
            .and_then(RowId::from_json)
            .ok_or_else(|| RemoteError::Envelope("entity has no usable 'id'".into()))?;

        Ok(Self { id, fields })
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Missing fields read as `null`.
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
