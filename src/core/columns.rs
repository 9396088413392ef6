//! Maps the headers of an imported sheet to the canonical `id` / `name`
//! fields through a fixed alias table.

use crate::errors::{AppError, AppResult};

/// Accepted headers for the student id, in lookup order.
pub const ID_ALIASES: &[&str] = &["学号", "学员编号", "学生编号", "学籍号", "student_id", "id"];

/// Accepted headers for the student name, in lookup order.
pub const NAME_ALIASES: &[&str] = &["姓名", "学生姓名", "name", "student_name"];

/// Column positions of the canonical fields inside a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: usize,
    pub name: usize,
}

/// Resolve both canonical fields, or fail naming the first one missing.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> AppResult<ColumnMap> {
    let id = find_column(headers, ID_ALIASES)
        .ok_or_else(|| AppError::MissingColumn("id", ID_ALIASES.join(", ")))?;
    let name = find_column(headers, NAME_ALIASES)
        .ok_or_else(|| AppError::MissingColumn("name", NAME_ALIASES.join(", ")))?;

    Ok(ColumnMap { id, name })
}

/// For each alias: exact header match first, then a case-insensitive one.
fn find_column<S: AsRef<str>>(headers: &[S], aliases: &[&str]) -> Option<usize> {
    let trimmed: Vec<&str> = headers.iter().map(|h| h.as_ref().trim()).collect();

    aliases.iter().find_map(|alias| {
        trimmed.iter().position(|h| h == alias).or_else(|| {
            let lower = alias.to_lowercase();
            trimmed.iter().position(|h| h.to_lowercase() == lower)
        })
    })
}
