// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::excel_date::{SIGNED_AT_NUM_FORMAT, signed_at_to_excel_serial};
use crate::export::model::{get_headers, record_to_row};
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Column holding the sign-in timestamp.
const SIGNED_AT_COL: usize = 3;

/// Export XLSX con styling e auto-larghezza colonne.
pub(crate) fn export_xlsx(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance")?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);
    let present_color = Color::RGB(0x2E7D32);

    // ---------------------------
    // Scrittura righe
    // ---------------------------
    for (row_index, rec) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in record_to_row(rec).iter().enumerate() {
            let v = value.as_str();
            let mut fmt = Format::new()
                .set_background_color(band)
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin);

            if col == 2 && rec.status == "present" {
                fmt = fmt.set_bold().set_font_color(present_color);
            }

            write_cell(worksheet, row, col, v, &fmt)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Ids and names stay text; the timestamp becomes an Excel date.
fn write_cell(ws: &mut Worksheet, row: u32, col: usize, s: &str, fmt: &Format) -> AppResult<()> {
    if col == SIGNED_AT_COL
        && let Some(serial) = signed_at_to_excel_serial(s)
    {
        let date_fmt = fmt.clone().set_num_format(SIGNED_AT_NUM_FORMAT);
        ws.write_number_with_format(row, col as u16, serial, &date_fmt)?;
        return Ok(());
    }

    ws.write_string_with_format(row, col as u16, s, fmt)?;
    Ok(())
}
