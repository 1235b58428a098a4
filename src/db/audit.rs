//! Audit trail of grid edits, fed from the session's event bus.

use crate::core::events::GridEvent;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::change::PendingChange;
use crate::ui::messages::warning;
use serde_json::Value;

pub struct AuditLog {
    pool: DbPool,
}

fn show(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

fn target(change: &PendingChange) -> String {
    format!("#{}.{}", change.row_id, change.field)
}

fn diff(change: &PendingChange) -> String {
    format!("{} → {}", show(&change.old_value), show(&change.new_value))
}

impl AuditLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Captured edits are not logged; only how they ended.
    pub fn record(&self, event: &GridEvent) -> AppResult<()> {
        let conn = &self.pool.conn;

        match event {
            GridEvent::EditCaptured { .. } | GridEvent::Refreshed { .. } => Ok(()),
            GridEvent::EditCancelled { resource, change } => {
                write_log(conn, "cancel", resource.name(), &target(change), &diff(change))
            }
            GridEvent::EditCommitted {
                resource, change, ..
            } => write_log(conn, "edit", resource.name(), &target(change), &diff(change)),
            GridEvent::EditFailed {
                resource,
                change,
                message,
            } => write_log(
                conn,
                "edit_failed",
                resource.name(),
                &target(change),
                &format!("{} ({message})", diff(change)),
            ),
            GridEvent::FormSubmitted {
                resource,
                row_id,
                fields,
            } => write_log(
                conn,
                "submit",
                resource.name(),
                &format!("#{row_id}"),
                &format!("fields: {}", fields.join(", ")),
            ),
            GridEvent::FormFailed {
                resource,
                row_id,
                message,
            } => write_log(conn, "submit_failed", resource.name(), &format!("#{row_id}"), message),
        }
    }

    /// Bus handler: audit failures are reported, never fatal.
    pub fn handle(&self, event: &GridEvent) {
        if let Err(e) = self.record(event) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }
}
