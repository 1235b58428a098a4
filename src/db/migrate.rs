use rusqlite::{Connection, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Add the `resource` column (0.2 → 0.3) so entries can be filtered per grid.
fn migrate_add_resource_to_log(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("PRAGMA table_info('log')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "resource" {
            return Ok(());
        }
    }

    conn.execute_batch(
        r#"
        ALTER TABLE log ADD COLUMN resource TEXT NOT NULL DEFAULT '';
        CREATE INDEX IF NOT EXISTS idx_log_resource ON log(resource);
        "#,
    )?;
    Ok(())
}

pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_add_resource_to_log(conn)?;
    Ok(())
}
