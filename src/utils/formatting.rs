//! Formatting utilities used for grid cells, dialogs and exports.
//!
//! The grid and the confirmation dialog both go through `Formatter::display`,
//! so a value never reads differently in the two places.

use crate::config::Config;
use crate::models::value::{FieldKind, Normalized, normalize};
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde_json::Value;
use std::fmt::Write;

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone)]
pub struct Formatter {
    date_format: String,
    currency_symbol: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            date_format: "%d-%m-%Y".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// `d` rendered with `fmt`, or `None` when `fmt` needs more than a date
/// (`%H`, `%z`, ...) or does not parse.
fn render_date(d: NaiveDate, fmt: &str) -> Option<String> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", d.format(fmt)).ok()?;
    Some(out)
}

/// `true` if chrono can render a calendar date with `fmt`.
pub fn is_valid_date_format(fmt: &str) -> bool {
    NaiveDate::from_ymd_opt(2000, 1, 1).is_some_and(|d| render_date(d, fmt).is_some())
}

impl Formatter {
    pub fn new(date_format: &str, currency_symbol: &str) -> Self {
        Self {
            date_format: date_format.to_string(),
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.date_format, &cfg.currency_symbol)
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn display(&self, kind: FieldKind, value: &Value) -> String {
        match normalize(kind, value) {
            Normalized::Empty => EMPTY_CELL.to_string(),
            Normalized::Text(s) if kind == FieldKind::Status => status_label(&s),
            Normalized::Text(s) => s,
            Normalized::Number(n) if kind == FieldKind::Currency => {
                format_currency(n, &self.currency_symbol)
            }
            Normalized::Number(n) => format!("{n}"),
            Normalized::Date(d) => render_date(d, &self.date_format)
                .unwrap_or_else(|| d.format("%Y-%m-%d").to_string()),
            Normalized::Reference { name: Some(name), .. } => name,
            Normalized::Reference { id: Some(id), .. } => format!("#{id}"),
            Normalized::Reference { .. } => EMPTY_CELL.to_string(),
        }
    }
}

/// `in_progress` → `IN PROGRESS`
fn status_label(s: &str) -> String {
    s.replace(['_', '-'], " ").to_uppercase()
}

/// `1234567.5` → `$1,234,567.50`
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{symbol}{grouped}.{frac_part}")
}

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}
