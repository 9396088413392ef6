use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;
use std::path::Path;

/// One row of the `log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    // Timestamp locale, formattato in ISO 8601
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// All log rows, oldest first.
pub fn load_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Best-effort activity journal. Failures are reported as warnings and
/// never abort the operation being journaled.
pub struct Journal {
    pool: Option<DbPool>,
}

impl Journal {
    /// Open the journal at `path`; on failure the journal is disabled.
    pub fn open(path: &Path) -> Self {
        match open_db(path) {
            Ok(pool) => Self { pool: Some(pool) },
            Err(e) => {
                warning(format!("Activity log disabled: {}", e));
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { pool: None }
    }

    #[cfg(test)]
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn record(&mut self, operation: &str, target: &str, message: &str) {
        if let Some(pool) = &self.pool
            && let Err(e) = ttlog(&pool.conn, operation, target, message)
        {
            warning(format!("Failed to write internal log: {}", e));
        }
    }

    pub fn entries(&self) -> AppResult<Vec<LogEntry>> {
        match &self.pool {
            Some(pool) => load_entries(&pool.conn),
            None => Ok(Vec::new()),
        }
    }
}
