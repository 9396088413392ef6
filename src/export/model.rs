// src/export/model.rs

use crate::models::StudentRecord;
use serde::Serialize;

/// Flat attendance row for export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AttendanceExport {
    pub id: String,
    pub name: String,
    pub status: String,
    pub signed_at: String,
}

impl From<&StudentRecord> for AttendanceExport {
    fn from(r: &StudentRecord) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            status: r.status_str().to_string(),
            signed_at: r.signed_at_str(),
        }
    }
}

/// Header per CSV / JSON / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["id", "name", "status", "signed_at"]
}

pub(crate) fn record_to_row(e: &AttendanceExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.name.clone(),
        e.status.clone(),
        e.signed_at.clone(),
    ]
}
