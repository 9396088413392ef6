//! Builds a roster out of an imported sheet.

use crate::core::columns::resolve_columns;
use crate::errors::{AppError, AppResult};
use crate::models::{Roster, StudentRecord};
use crate::sheet::reader::{Table, is_blank_row, read_table};
use std::path::Path;

/// Read `path` and turn it into a fresh roster (everyone absent).
pub fn load_roster(path: &Path) -> AppResult<Roster> {
    let table = read_table(path)?;
    roster_from_table(&table, &path.display().to_string())
}

/// Resolve the id/name columns, drop blank rows, trim the two fields.
///
/// `source` only labels the error when the table has no content.
pub fn roster_from_table(table: &Table, source: &str) -> AppResult<Roster> {
    if table.headers.is_empty() || table.is_blank() {
        return Err(AppError::EmptyFile(source.to_string()));
    }

    let cols = resolve_columns(table.headers.as_slice())?;

    let records = table
        .rows
        .iter()
        .filter(|row| !is_blank_row(row))
        .map(|row| {
            let id = row.get(cols.id).map(String::as_str).unwrap_or("");
            let name = row.get(cols.name).map(String::as_str).unwrap_or("");
            StudentRecord::new(id, name)
        })
        .collect();

    Ok(Roster::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn import_trims_and_drops_blank_rows() {
        let t = table(
            &["学号", "姓名", "班级"],
            &[
                &[" 1 ", " Anna ", "3A"],
                &["", "", ""],
                &["2", "Bruno", ""],
                &["", "", "3B"],
            ],
        );
        let roster = roster_from_table(&t, "t").unwrap();

        // the last row is not fully empty: extra columns count
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(0).unwrap().id, "1");
        assert_eq!(roster.get(0).unwrap().name, "Anna");
        assert_eq!(roster.get(2).unwrap().id, "");
        assert!(roster.iter().all(|r| !r.present && r.signed_at.is_none()));
    }

    #[test]
    fn empty_sheet_is_rejected() {
        let t = table(&["id", "name"], &[]);
        assert!(matches!(
            roster_from_table(&t, "empty.xlsx"),
            Err(AppError::EmptyFile(_))
        ));
        assert!(matches!(
            roster_from_table(&Table::default(), "none.xlsx"),
            Err(AppError::EmptyFile(_))
        ));
    }

    #[test]
    fn unresolvable_columns_are_rejected() {
        let t = table(&["code", "who"], &[&["1", "A"]]);
        assert!(matches!(
            roster_from_table(&t, "t"),
            Err(AppError::MissingColumn(..))
        ));
    }

    #[test]
    fn importing_twice_gives_same_roster() {
        let t = table(&["ID", "Name"], &[&["1", "A"], &["2", "B"]]);
        let a = roster_from_table(&t, "t").unwrap();
        let b = roster_from_table(&t, "t").unwrap();
        assert_eq!(a, b);
    }
}
