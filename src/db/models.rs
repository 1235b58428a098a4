//! Database row models for the internal log.

/// One row of the `log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub resource: String,
    pub target: String,
    pub message: String,
}
