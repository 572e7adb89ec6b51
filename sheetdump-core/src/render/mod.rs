//! Console renderers for workbooks
//!
//! Two layouts are available: a width-clamped table per sheet, and a raw
//! listing with one line per cell. Both write to any [`Write`] sink and share
//! the same missing-file handling: the notice is printed, nothing else is
//! attempted for that path, and the call still succeeds.

use crate::config::DumpConfig;
use crate::error::Result;
use crate::reader::CellValue;
use colored::*;
use std::io::Write;
use std::path::Path;

pub mod raw;
pub mod table;

pub use raw::{render_raw, write_raw};
pub use table::{render_table, write_table};

/// Output layout selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    Table,
    #[default]
    Raw,
}

impl RenderMode {
    /// Only the literal `table` selects the table; anything else, or no
    /// argument at all, means raw
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("table") => RenderMode::Table,
            _ => RenderMode::Raw,
        }
    }
}

/// Render one workbook file in the given mode
pub fn render<W: Write>(
    mode: RenderMode,
    path: &Path,
    config: &DumpConfig,
    out: &mut W,
) -> Result<()> {
    match mode {
        RenderMode::Table => render_table(path, config, out),
        RenderMode::Raw => render_raw(path, config, out),
    }
}

/// Print the missing-file notice when `path` does not exist
///
/// Returns `true` when the caller should stop processing this path.
pub(crate) fn report_missing<W: Write>(path: &Path, out: &mut W) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    tracing::warn!(path = %path.display(), "workbook not found, skipping");
    writeln!(
        out,
        "{}",
        format!("✗ File not found: {}", path.display()).red().bold()
    )?;
    Ok(true)
}

pub(crate) fn write_empty_sheet_notice<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "   {}", "(empty sheet)".yellow())?;
    Ok(())
}

/// Clamp a value into a fixed-width table field
///
/// Text is trimmed before the cut. The cut is hard: no ellipsis, counted in
/// characters rather than bytes.
pub fn fit_cell(value: &CellValue, width: usize) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.trim().chars().take(width).collect(),
        other => other.display().chars().take(width).collect(),
    }
}

/// File name without its directory, for banners
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format an integer with comma thousands separators (12345 -> "12,345")
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_arg() {
        assert_eq!(RenderMode::from_arg(None), RenderMode::Raw);
        assert_eq!(RenderMode::from_arg(Some("table")), RenderMode::Table);
        assert_eq!(RenderMode::from_arg(Some("raw")), RenderMode::Raw);
        assert_eq!(RenderMode::from_arg(Some("TABLE")), RenderMode::Raw);
        assert_eq!(RenderMode::from_arg(Some("anything")), RenderMode::Raw);
    }

    #[test]
    fn test_fit_cell() {
        assert_eq!(fit_cell(&CellValue::Empty, 20), "");
        assert_eq!(fit_cell(&CellValue::Text("  hi  ".into()), 20), "hi");
        assert_eq!(
            fit_cell(&CellValue::Text("abcdefghijklmnopqrstuvwxyz".into()), 20),
            "abcdefghijklmnopqrst"
        );
        assert_eq!(
            fit_cell(&CellValue::Text("   abcdefghijklmnopqrstuvwxyz".into()), 20),
            "abcdefghijklmnopqrst"
        );
        assert_eq!(fit_cell(&CellValue::Float(1.0 / 3.0), 20), "0.3333333333333333");
        assert_eq!(
            fit_cell(&CellValue::Error("#VALUE! #VALUE! #VALUE!".into()), 20),
            "#VALUE! #VALUE! #VAL"
        );
        assert_eq!(fit_cell(&CellValue::Int(42), 20), "42");
        // Multi-byte characters count as one each
        assert_eq!(fit_cell(&CellValue::Text("ééééé".into()), 3), "ééé");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_report_missing() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let missing = Path::new("/definitely/not/here.xlsx");
        assert!(report_missing(missing, &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("File not found: /definitely/not/here.xlsx"));
    }
}
