use rusqlite::{Connection, Result};

/// Current journal schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the `log` table.
fn create_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);
        "#,
    )?;
    Ok(())
}

fn user_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Apply every migration newer than the stored schema version.
/// Returns the number of migrations applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    let version = user_version(conn)?;
    let mut applied = 0;

    if version < 1 {
        create_log_table(conn)?;
        applied += 1;
    }

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(applied)
}
