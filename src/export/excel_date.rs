// src/export/excel_date.rs

use crate::models::student::SIGNED_AT_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};

/// Excel number format matching the sign-in timestamp layout.
pub(crate) const SIGNED_AT_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Parse a sign-in timestamp and return its Excel serial value.
pub(crate) fn signed_at_to_excel_serial(s: &str) -> Option<f64> {
    NaiveDateTime::parse_from_str(s, SIGNED_AT_FORMAT)
        .ok()
        .map(|dt| naive_datetime_to_excel_serial(&dt))
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}
