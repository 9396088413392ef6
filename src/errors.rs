//! Unified application error type.
//! All modules (db, core, sheet, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Activity journal
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Spreadsheet / tabular input
    // ---------------------------
    #[error("Cannot read spreadsheet: {0}")]
    SheetRead(#[from] calamine::Error),

    #[error("Cannot write spreadsheet: {0}")]
    SheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("The file has no content: {0}")]
    EmptyFile(String),

    #[error("Missing column for '{0}' (accepted headers: {1})")]
    MissingColumn(&'static str, String),

    // ---------------------------
    // Roll call logic
    // ---------------------------
    #[error("No roster loaded: import a roster first")]
    EmptyRoster,

    #[error("No target to sign: start rolling or select a row")]
    NoSignTarget,

    #[error("No rows selected")]
    NoSelection,

    #[error("Invalid row number: {0}")]
    InvalidRow(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
