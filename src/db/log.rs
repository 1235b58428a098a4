use crate::db::models::LogEntry;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn write_log(
    conn: &Connection,
    operation: &str,
    resource: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    // local time, RFC 3339
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, resource, target, message)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![now, operation, resource, target, message])?;

    Ok(())
}

/// All log rows, oldest first, optionally for one resource only.
pub fn load_log(conn: &Connection, resource: Option<&str>) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, resource, target, message FROM log
         WHERE ?1 IS NULL OR resource = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![resource], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            resource: row.get(3)?,
            target: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            message: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
