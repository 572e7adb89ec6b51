//! Raw per-cell listing

use super::{base_name, report_missing, write_empty_sheet_notice};
use crate::cell_ref::CellReference;
use crate::config::DumpConfig;
use crate::error::Result;
use crate::reader::{self, Sheet, Workbook};
use colored::*;
use std::io::Write;
use std::path::Path;

/// Read the workbook at `path` and print every cell of every sheet
///
/// A missing file prints a notice and returns `Ok(())`. A file that exists
/// but cannot be parsed is an error.
pub fn render_raw<W: Write>(path: &Path, config: &DumpConfig, out: &mut W) -> Result<()> {
    if report_missing(path, out)? {
        return Ok(());
    }
    let workbook = reader::read_workbook(path)?;
    write_raw(&workbook, config, out)
}

/// Print an already-read workbook, one line per cell within the sheet bounds
pub fn write_raw<W: Write>(workbook: &Workbook, config: &DumpConfig, out: &mut W) -> Result<()> {
    let rule = "=".repeat(config.banner_width);
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{} {}",
        "FILE (RAW DETAIL):".bold(),
        base_name(&workbook.path)
    )?;
    writeln!(out, "{}", rule)?;

    for sheet in &workbook.sheets {
        write_sheet(sheet, config, out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn write_sheet<W: Write>(sheet: &Sheet, config: &DumpConfig, out: &mut W) -> Result<()> {
    let rule = "=".repeat(config.raw_sheet_rule_width);

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{} '{}' | Rows: {} | Columns: {}",
        "SHEET:".bold(),
        sheet.name.cyan().bold(),
        sheet.row_bound(),
        sheet.col_bound()
    )?;
    writeln!(out, "{}", rule)?;

    if sheet.is_empty() {
        return write_empty_sheet_notice(out);
    }

    for row in 1..=sheet.row_bound() {
        writeln!(out)?;
        writeln!(out, "--- Row {} ---", row)?;
        for col in 1..=sheet.col_bound() {
            let value = sheet.value_at(row, col);
            let repr = if value.is_error() {
                value.repr().red().to_string()
            } else {
                value.repr()
            };
            writeln!(
                out,
                "   [{}] ({}) = {}",
                CellReference::new(row, col),
                value.type_name(),
                repr
            )?;
        }
    }

    Ok(())
}
