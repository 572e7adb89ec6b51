//! Width-clamped table layout

use super::{base_name, fit_cell, group_thousands, report_missing, write_empty_sheet_notice};
use crate::cell_ref::column_letter;
use crate::config::DumpConfig;
use crate::error::Result;
use crate::reader::{self, Sheet, Workbook};
use colored::*;
use std::io::Write;
use std::path::Path;

/// Read the workbook at `path` and print every sheet as a table
///
/// A missing file prints a notice and returns `Ok(())`. A file that exists
/// but cannot be parsed is an error.
pub fn render_table<W: Write>(path: &Path, config: &DumpConfig, out: &mut W) -> Result<()> {
    if report_missing(path, out)? {
        return Ok(());
    }
    let workbook = reader::read_workbook(path)?;
    write_table(&workbook, config, out)
}

/// Print an already-read workbook as one table per sheet
pub fn write_table<W: Write>(workbook: &Workbook, config: &DumpConfig, out: &mut W) -> Result<()> {
    let rule = "=".repeat(config.banner_width);
    writeln!(out, "{}", rule)?;
    writeln!(out, "{} {}", "FILE:".bold(), base_name(&workbook.path))?;
    writeln!(out, "   Path: {}", workbook.path.display())?;
    writeln!(out, "   Size: {} bytes", group_thousands(workbook.file_size))?;
    writeln!(out, "{}", rule)?;

    let names: Vec<String> = workbook
        .sheet_names()
        .into_iter()
        .map(reader::workbook::quote_text)
        .collect();
    writeln!(out, "   Sheets: {}", workbook.sheets.len())?;
    writeln!(out, "   Sheet names: [{}]", names.join(", "))?;
    writeln!(out)?;

    for sheet in &workbook.sheets {
        write_sheet(sheet, config, out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn write_sheet<W: Write>(sheet: &Sheet, config: &DumpConfig, out: &mut W) -> Result<()> {
    let rule = "-".repeat(config.banner_width);
    let rows = sheet.row_bound();
    let cols = sheet.col_bound();

    writeln!(out, "{}", rule)?;
    writeln!(out, "{} '{}'", "SHEET:".bold(), sheet.name.cyan().bold())?;
    writeln!(out, "   Dimensions: {}", sheet.dimensions_label())?;
    writeln!(out, "   Rows: {}, Columns: {}", rows, cols)?;
    writeln!(out, "   Merged cells: {}", merged_label(sheet))?;
    writeln!(out, "{}", rule)?;

    if sheet.is_empty() {
        write_empty_sheet_notice(out)?;
        writeln!(out)?;
        return Ok(());
    }

    let width = config.column_width;
    let label_width = config.row_label_width;

    writeln!(out)?;
    write!(out, "   {:<label_width$}", "ROW")?;
    for col in 1..=cols {
        write!(out, "  | {:<width$}", column_letter(col))?;
    }
    writeln!(out)?;
    writeln!(out, "   {}", "-".repeat(config.separator_width(cols)))?;

    for row in 1..=rows {
        write!(out, "   {:<label_width$}", row)?;
        for col in 1..=cols {
            write!(out, "  | {:<width$}", fit_cell(sheet.value_at(row, col), width))?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "   Total rows: {}", rows)?;
    writeln!(out, "   Total columns: {}", cols)?;
    writeln!(out)?;
    Ok(())
}

/// Comma-separated merged ranges, or `none`
fn merged_label(sheet: &Sheet) -> String {
    if sheet.merged_cells.is_empty() {
        return "none".to_string();
    }
    sheet
        .merged_cells
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
