//! Unified application error type.
//! All modules (api, core, grid, db, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::api::error::RemoteError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Audit database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Backend
    // ---------------------------
    #[error("{0}")]
    Remote(#[from] RemoteError),

    // ---------------------------
    // Grid / lookup errors
    // ---------------------------
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Row {0} not found")]
    UnknownRow(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' is read-only")]
    NotEditable(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    // ---------------------------
    // Edit cycle errors
    // ---------------------------
    #[error("Another edit is waiting for confirmation (row {0})")]
    EditInProgress(String),

    #[error("Row {0} has an update in flight")]
    RowBusy(String),

    #[error("No pending change to confirm")]
    NoPendingChange,

    #[error("Unknown or already settled update ticket #{0}")]
    UnknownTicket(u64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
