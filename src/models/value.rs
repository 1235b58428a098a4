//! Field kinds, value normalization and typed-input parsing.
//!
//! The same normalization is used by the interceptor's dirty check and by the
//! confirmation dialog, so "unchanged" means the same thing everywhere.

use crate::errors::{AppError, AppResult};
use crate::utils::formatting::Formatter;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Currency,
    Date,
    /// Nested `{ id, name }` object.
    Reference,
    /// Backend-computed badge (`in_progress`, `approved`, ...).
    Status,
}

/// A value reduced to what matters for equality.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// `null`, `""` and whitespace-only strings.
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Reference {
        id: Option<String>,
        name: Option<String>,
    },
}

impl Normalized {
    /// Equality used for dirty checks. References match by id when both
    /// sides carry one, by name otherwise.
    pub fn same_as(&self, other: &Normalized) -> bool {
        match (self, other) {
            (
                Normalized::Reference { id: Some(a), .. },
                Normalized::Reference { id: Some(b), .. },
            ) => a == b,
            (
                Normalized::Reference { name: a, .. },
                Normalized::Reference { name: b, .. },
            ) => a.is_some() && a == b,
            (a, b) => a == b,
        }
    }
}

/// Parse the date shapes backends and users hand us.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d-%m-%Y") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn parse_number_str(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub fn normalize(kind: FieldKind, value: &Value) -> Normalized {
    if is_blank(value) {
        return Normalized::Empty;
    }

    match kind {
        FieldKind::Text | FieldKind::Status => match value {
            Value::Object(map) => map
                .get("name")
                .and_then(scalar_to_string)
                .map(Normalized::Text)
                .unwrap_or_else(|| Normalized::Text(value.to_string())),
            other => Normalized::Text(scalar_to_string(other).unwrap_or_else(|| other.to_string())),
        },

        FieldKind::Number | FieldKind::Currency => match value {
            Value::Number(n) => n
                .as_f64()
                .map(Normalized::Number)
                .unwrap_or_else(|| Normalized::Text(n.to_string())),
            Value::String(s) => parse_number_str(s)
                .map(Normalized::Number)
                .unwrap_or_else(|| Normalized::Text(s.clone())),
            other => Normalized::Text(other.to_string()),
        },

        FieldKind::Date => match value {
            Value::String(s) => parse_date_str(s)
                .map(Normalized::Date)
                .unwrap_or_else(|| Normalized::Text(s.clone())),
            other => Normalized::Text(other.to_string()),
        },

        FieldKind::Reference => match value {
            Value::Object(map) => {
                let id = map.get("id").filter(|v| !is_blank(v)).and_then(scalar_to_string);
                let name = map.get("name").filter(|v| !is_blank(v)).and_then(scalar_to_string);
                if id.is_none() && name.is_none() {
                    Normalized::Empty
                } else {
                    Normalized::Reference { id, name }
                }
            }
            Value::Number(n) => Normalized::Reference {
                id: Some(n.to_string()),
                name: None,
            },
            Value::String(s) => Normalized::Reference {
                id: None,
                name: Some(s.clone()),
            },
            other => Normalized::Text(other.to_string()),
        },
    }
}

/// `true` when the two raw values mean the same thing for `kind`.
pub fn values_equal(kind: FieldKind, a: &Value, b: &Value) -> bool {
    normalize(kind, a).same_as(&normalize(kind, b))
}

/// Turn what the user typed into the JSON value that will be sent.
///
/// Whatever `formatter` displays for a cell can be typed back: dates in the
/// configured format, amounts with the currency symbol.
pub fn parse_input(kind: FieldKind, field: &str, raw: &str, formatter: &Formatter) -> AppResult<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    let invalid = |reason: String| AppError::InvalidValue {
        field: field.to_string(),
        reason,
    };

    match kind {
        FieldKind::Text | FieldKind::Status | FieldKind::Reference => {
            Ok(Value::String(raw.to_string()))
        }
        FieldKind::Number | FieldKind::Currency => {
            let symbol = formatter.currency_symbol().trim();
            let unmarked = if symbol.is_empty() {
                raw.to_string()
            } else {
                raw.replace(symbol, "")
            };
            let n = parse_number_str(&unmarked)
                .ok_or_else(|| invalid(format!("'{raw}' is not a number")))?;
            if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                Ok(Value::from(n as i64))
            } else {
                Ok(Value::from(n))
            }
        }
        FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), formatter.date_format())
            .ok()
            .or_else(|| parse_date_str(raw))
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .ok_or_else(|| {
                invalid(format!(
                    "'{raw}' is not a date ({}, YYYY-MM-DD or DD-MM-YYYY)",
                    formatter.date_format()
                ))
            }),
    }
}
