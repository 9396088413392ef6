use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::fs;
use std::path::Path;

/// Open (creating if needed) the journal database and bring its schema
/// up to date. All schema is owned by the migration engine.
pub fn open_db(path: &Path) -> AppResult<DbPool> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }

    let pool = DbPool::new(path)?;
    run_pending_migrations(&pool.conn)?;
    Ok(pool)
}
