//! Spreadsheet export of owned records.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::errors::ServiceError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sheet title and fixed header row of one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLayout {
    pub title: &'static str,
    pub headers: &'static [&'static str],
}

impl ExportLayout {
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Number(f64),
    Empty,
}

impl ExportCell {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => ExportCell::Text(v.to_string()),
            _ => ExportCell::Empty,
        }
    }

    pub fn decimal(value: Option<Decimal>) -> Self {
        value
            .and_then(|d| d.to_f64())
            .map(ExportCell::Number)
            .unwrap_or(ExportCell::Empty)
    }

    pub fn date(value: Option<NaiveDate>) -> Self {
        value
            .map(|d| ExportCell::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(ExportCell::Empty)
    }
}

impl From<&str> for ExportCell {
    fn from(value: &str) -> Self {
        ExportCell::text(Some(value))
    }
}

impl From<XlsxError> for ServiceError {
    fn from(err: XlsxError) -> Self {
        ServiceError::ExportError(err.to_string())
    }
}

/// Render a single-sheet workbook: bold header row, then one row per record
pub fn build_workbook(layout: &ExportLayout, rows: &[Vec<ExportCell>]) -> Result<Vec<u8>, ServiceError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(layout.title)?;
    for (col, title) in layout.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                ExportCell::Text(value) => {
                    worksheet.write_string(row_num, col as u16, value)?;
                }
                ExportCell::Number(value) => {
                    worksheet.write_number(row_num, col as u16, *value)?;
                }
                ExportCell::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Attachment response carrying a rendered workbook
pub fn xlsx_response(layout: &ExportLayout, bytes: Vec<u8>) -> Result<Response, ServiceError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", layout.file_name()))
        .map_err(|e| ServiceError::ExportError(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const LAYOUT: ExportLayout = ExportLayout {
        title: "Credit Notes",
        headers: &["ID", "Credit Note", "Status"],
    };

    #[test]
    fn workbook_is_a_zip_container() {
        let rows = vec![vec![
            ExportCell::from("CN-1"),
            ExportCell::from("CN-00001"),
            ExportCell::text(None),
        ]];
        let bytes = build_workbook(&LAYOUT, &rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_export_still_has_headers() {
        let bytes = build_workbook(&LAYOUT, &[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn cells_from_optional_values() {
        assert_eq!(ExportCell::text(Some("")), ExportCell::Empty);
        assert_eq!(ExportCell::decimal(Some(dec!(12.5))), ExportCell::Number(12.5));
        assert_eq!(
            ExportCell::date(NaiveDate::from_ymd_opt(2024, 1, 31)),
            ExportCell::Text("2024-01-31".into())
        );
    }

    #[test]
    fn response_is_an_attachment() {
        let response = xlsx_response(&LAYOUT, vec![b'P', b'K']).unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            XLSX_CONTENT_TYPE
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=Credit Notes.xlsx"
        );
    }
}
