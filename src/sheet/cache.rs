//! Two-column roster cache (`id`, `name`).
//!
//! Attendance is never written here, so a reload always starts with
//! everyone absent.

use crate::core::import::roster_from_table;
use crate::sheet::reader::read_xlsx;
use crate::errors::AppResult;
use crate::models::Roster;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::Path;

pub const CACHE_HEADERS: [&str; 2] = ["id", "name"];

/// Overwrite the cache with the (id, name) projection of `roster`.
/// An empty roster leaves the previous cache untouched.
pub fn save_cache(path: &Path, roster: &Roster) -> AppResult<()> {
    if roster.is_empty() {
        return Ok(());
    }

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in CACHE_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, rec) in roster.iter().enumerate() {
        let row = (i + 1) as u32;
        // ids stay text so leading zeros survive
        worksheet.write_string(row, 0, rec.id.trim())?;
        worksheet.write_string(row, 1, rec.name.trim())?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Load the cached roster, if any. `Ok(None)` when the file does not exist.
///
/// The cache is always an xlsx workbook, so it is read as one even when the
/// configured file name carries another extension (or none).
pub fn load_cache(path: &Path) -> AppResult<Option<Roster>> {
    if !path.exists() {
        return Ok(None);
    }
    let table = read_xlsx(path)?;
    roster_from_table(&table, &path.display().to_string()).map(Some)
}
