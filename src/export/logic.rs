// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::xlsx::export_xlsx;
use crate::models::Roster;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Dump the whole roster, attendance included.
    ///
    /// `file = None` writes `attendance_<timestamp>.<ext>` in the current
    /// directory. Overwrite confirmation is the caller's job.
    pub fn export(roster: &Roster, format: ExportFormat, file: Option<&Path>) -> AppResult<PathBuf> {
        if roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }

        let path = match file {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(default_file_name(format, Local::now().naive_local())),
        };

        if path.is_dir() {
            return Err(AppError::Export(format!(
                "output path is a directory: {}",
                path.display()
            )));
        }

        let rows: Vec<AttendanceExport> = roster.iter().map(AttendanceExport::from).collect();

        match format {
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        Ok(path)
    }
}

/// `attendance_YYYYMMDD_HHMMSS.<ext>`
pub fn default_file_name(format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "attendance_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.as_str()
    )
}
