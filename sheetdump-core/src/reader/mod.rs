//! Excel file reader using calamine

use crate::error::{DumpError, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod workbook;
pub mod xml_parser;

pub use workbook::{Cell, CellValue, Sheet, Workbook};

/// Read a workbook from a file path
///
/// Cell values are the cached results of the last calculation; formula text
/// is never read. The calamine reader and the zip archive are both dropped
/// before this returns, so the file is closed on every path out.
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening workbook");

    let mut excel: Xlsx<BufReader<File>> = open_workbook(path).map_err(|e| DumpError::Open {
        path: path.to_path_buf(),
        source: calamine::Error::Xlsx(e),
    })?;

    let file_size = std::fs::metadata(path)?.len();

    // Merged ranges live in the worksheet XML, read them from the archive directly
    let mut archive = zip::ZipArchive::new(BufReader::new(File::open(path)?))?;
    let sheet_paths = xml_parser::resolve_sheet_paths(&mut archive)?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for (index, sheet_name) in sheet_names.iter().enumerate() {
        let range = excel
            .worksheet_range(sheet_name)
            .map_err(|e| DumpError::Open {
                path: path.to_path_buf(),
                source: calamine::Error::Xlsx(e),
            })?;

        let mut sheet = parse_sheet(sheet_name, &range);

        let sheet_path = sheet_paths
            .get(sheet_name)
            .cloned()
            .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", index + 1));
        sheet.merged_cells = xml_parser::extract_merged_cells(&mut archive, &sheet_path)?;

        tracing::debug!(
            sheet = %sheet.name,
            rows = sheet.row_bound(),
            cols = sheet.col_bound(),
            merged = sheet.merged_cells.len(),
            "read sheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        file_size,
        sheets,
    })
}

/// Build a sheet from a calamine range. Calamine positions are 0-based.
fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    for (row, col, data) in range.used_cells() {
        let value = parse_cell_value(data);
        if value.is_empty() {
            continue;
        }
        sheet.set_value(
            start_row + row as u32 + 1,
            start_col + col as u32 + 1,
            value,
        );
    }

    sheet
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => number_value(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Duration(format_duration(dt.as_f64()))
            } else {
                datetime_value(dt.as_f64(), dt.as_datetime())
            }
        }
        Data::DateTimeIso(s) => match s.parse() {
            Ok(naive) => CellValue::DateTime(naive),
            Err(_) => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Duration(s.clone()),
    }
}

/// xlsx stores every number as a float; whole values are reported as integers
fn number_value(f: f64) -> CellValue {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

/// A serial below one day has no date part, only a time of day
fn datetime_value(serial: f64, naive: Option<NaiveDateTime>) -> CellValue {
    match naive {
        Some(naive) if (0.0..1.0).contains(&serial) => CellValue::Time(naive.time()),
        Some(naive) => CellValue::DateTime(naive),
        None => number_value(serial),
    }
}

/// Render a duration stored as a fraction of days as `H:MM:SS`
fn format_duration(days: f64) -> String {
    let total_seconds = (days * 86_400.0).round() as i64;
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total_seconds = total_seconds.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_offsets() {
        // Range starting at B2 (0-based (1, 1))
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Name".to_string()));
        range.set_value((2, 2), Data::Float(42.0));
        range.set_value((2, 1), Data::Float(2.5));

        let sheet = parse_sheet("Data", &range);
        assert_eq!(sheet.row_bound(), 3);
        assert_eq!(sheet.col_bound(), 3);
        assert_eq!(sheet.dimensions_label(), "B2:C3");
        assert_eq!(sheet.value_at(2, 2), &CellValue::Text("Name".to_string()));
        assert_eq!(sheet.value_at(3, 3), &CellValue::Int(42));
        assert_eq!(sheet.value_at(3, 2), &CellValue::Float(2.5));
        assert!(sheet.value_at(1, 1).is_empty());
    }

    #[test]
    fn test_parse_empty_range() {
        let range: Range<Data> = Range::empty();
        let sheet = parse_sheet("Empty", &range);
        assert!(sheet.is_empty());
        assert_eq!(sheet.col_bound(), 0);
    }

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(parse_cell_value(&Data::Bool(true)), CellValue::Boolean(true));
        assert_eq!(
            parse_cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".to_string())
        );
        assert_eq!(
            parse_cell_value(&Data::DurationIso("PT1H".to_string())),
            CellValue::Duration("PT1H".to_string())
        );
    }

    #[test]
    fn test_whole_floats_become_integers() {
        assert_eq!(parse_cell_value(&Data::Float(42.0)), CellValue::Int(42));
        assert_eq!(parse_cell_value(&Data::Float(-3.0)), CellValue::Int(-3));
        assert_eq!(parse_cell_value(&Data::Float(0.0)), CellValue::Int(0));
        assert_eq!(parse_cell_value(&Data::Float(42.5)), CellValue::Float(42.5));
        assert_eq!(parse_cell_value(&Data::Float(1e300)), CellValue::Float(1e300));
        assert!(matches!(
            parse_cell_value(&Data::Float(f64::NAN)),
            CellValue::Float(_)
        ));
    }

    #[test]
    fn test_time_of_day_values() {
        use chrono::{NaiveDate, NaiveTime};

        let noon = NaiveDate::from_ymd_opt(1899, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(
            datetime_value(0.5, Some(noon)),
            CellValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        );

        let morning = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(7, 15, 0)
            .unwrap();
        assert_eq!(
            datetime_value(45306.302083, Some(morning)),
            CellValue::DateTime(morning)
        );
        assert_eq!(datetime_value(3.0, None), CellValue::Int(3));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.5), "12:00:00");
        assert_eq!(format_duration(1.0 / 24.0 + 1.0 / 1440.0), "1:01:00");
        assert_eq!(format_duration(1.25), "30:00:00");
    }
}
