//! Tabular input: reads the first worksheet of a workbook (or a CSV file)
//! into a header row plus text rows.

use crate::errors::{AppError, AppResult};
use calamine::{Data, Range, Reader, Xlsx, open_workbook, open_workbook_auto};
use std::path::Path;

/// A sheet flattened to text cells. Every row has `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width.max(r.len()), String::new());
                r
            })
            .collect();
        Self { headers, rows }
    }

    /// True when no row carries a non-blank cell.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| is_blank_row(r))
    }
}

pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Read a spreadsheet or CSV file, dispatching on its extension.
pub fn read_table(path: &Path) -> AppResult<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path),
        "csv" => read_csv(path),
        _ => Err(AppError::UnsupportedFile(path.display().to_string())),
    }
}

fn read_workbook(path: &Path) -> AppResult<Table> {
    let mut workbook = open_workbook_auto(path)?;

    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(table_from_range(&range?)),
        None => Ok(Table::default()),
    }
}

/// Read the first worksheet of an `.xlsx` file whatever its name says.
pub fn read_xlsx(path: &Path) -> AppResult<Table> {
    let mut workbook = open_workbook::<Xlsx<_>, _>(path).map_err(calamine::Error::Xlsx)?;

    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(table_from_range(&range.map_err(calamine::Error::Xlsx)?)),
        None => Ok(Table::default()),
    }
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(h) => h.iter().map(cell_to_string).collect(),
        None => return Table::default(),
    };
    let body = rows
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();

    Table::new(headers, body)
}

fn read_csv(path: &Path) -> AppResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)?;

    let headers = rdr
        .headers()?
        .iter()
        // a UTF-8 BOM sticks to the first header when the file comes from Excel
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut body = Vec::new();
    for record in rdr.records() {
        body.push(record?.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, body))
}

/// Render a cell as text. Integral floats lose the `.0` so numeric ids
/// survive the trip through the cache.
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
