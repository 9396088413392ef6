// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod xlsx;

pub use fs_utils::{ensure_writable, is_yes};
pub use logic::{ExportLogic, default_file_name};
pub use model::AttendanceExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}
