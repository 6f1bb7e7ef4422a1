//! Spreadsheet encoding of favourites
//!
//! Row 1 holds the column headers, then one row per record. Dates are
//! real spreadsheet dates formatted `yyyy-mm-dd`.

use super::{ExportError, FavouriteRecord};
use calamine::{Data, DataType, Reader, Xlsx};
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Cursor;

/// Column headers, in column order
pub const HEADERS: [&str; 3] = ["name", "rating", "date"];

/// Number format applied to the date column
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Serialize records into xlsx bytes
pub fn encode(records: &[FavouriteRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let date = ExcelDateTime::from_ymd(
            record.date.year() as u16,
            record.date.month() as u8,
            record.date.day() as u8,
        )?;

        worksheet.write_string(row, 0, &record.name)?;
        worksheet.write_number(row, 1, record.rating)?;
        worksheet.write_datetime_with_format(row, 2, &date, &date_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Read records back from xlsx bytes produced by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<Vec<FavouriteRecord>, ExportError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ExportError::Decode(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExportError::Decode("workbook has no sheets".to_string()))?
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<&str> = rows
        .next()
        .ok_or_else(|| ExportError::Decode("missing header row".to_string()))?
        .iter()
        .map(|cell| cell.get_string().unwrap_or_default())
        .collect();

    if header != HEADERS {
        return Err(ExportError::Decode(format!(
            "unexpected headers: {header:?}"
        )));
    }

    rows.enumerate()
        .map(|(i, row)| decode_row(i + 2, row))
        .collect()
}

fn decode_row(row_number: usize, row: &[Data]) -> Result<FavouriteRecord, ExportError> {
    let cell = |col: usize| row.get(col).filter(|c| !c.is_empty());
    let invalid = |field: &str| ExportError::Decode(format!("row {row_number}: invalid {field}"));

    let name = cell(0)
        .and_then(|c| c.get_string())
        .ok_or_else(|| invalid("name"))?;
    let rating = cell(1).and_then(|c| c.as_f64()).ok_or_else(|| invalid("rating"))?;
    let date = cell(2).and_then(|c| c.as_date()).ok_or_else(|| invalid("date"))?;

    Ok(FavouriteRecord::new(name, rating, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            FavouriteRecord::new("Delilah Miami", 4.6, date(2024, 3, 9)),
            FavouriteRecord::new("Joe's Stone Crab", 4.5, date(2023, 12, 31)),
            FavouriteRecord::new("Versailles", 4.0, date(2024, 1, 1)),
        ];

        let bytes = encode(&records).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded, records);
    }

    #[test]
    fn test_header_only() {
        let bytes = encode(&[]).unwrap();
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_output_is_zip_container() {
        let bytes = encode(&[FavouriteRecord::new("x", 1.0, date(2024, 1, 1))]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_rejects_foreign_sheet() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "title").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        assert!(matches!(decode(&bytes), Err(ExportError::Decode(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode(b"not a workbook").is_err());
    }
}
