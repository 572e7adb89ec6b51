//! Workbook data structures

use crate::cell_ref::{CellRange, CellReference};
use chrono::{NaiveDateTime, NaiveTime};
use std::collections::HashMap;
use std::path::PathBuf;

/// Represents a complete workbook
#[derive(Debug, Clone)]
pub struct Workbook {
    pub path: PathBuf,
    /// Size of the file on disk in bytes
    pub file_size: u64,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Get all sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Populated cells keyed by 1-based (row, col)
    pub cells: HashMap<(u32, u32), Cell>,
    /// From the first to the last populated cell; `None` for an empty sheet
    pub dimensions: Option<CellRange>,
    pub merged_cells: Vec<CellRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Highest populated row, 0 when the sheet is empty
    pub fn row_bound(&self) -> u32 {
        self.dimensions.map_or(0, |d| d.end.row)
    }

    /// Highest populated column, 0 when the sheet is empty
    pub fn col_bound(&self) -> u32 {
        self.dimensions.map_or(0, |d| d.end.col)
    }

    pub fn is_empty(&self) -> bool {
        self.row_bound() == 0
    }

    /// Get a cell at the given position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Value at the given position, `Empty` when nothing is stored there
    pub fn value_at(&self, row: u32, col: u32) -> &CellValue {
        self.get_cell(row, col)
            .map_or(&CellValue::Empty, |cell| &cell.value)
    }

    /// Store a value and grow the dimensions to cover it
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        self.dimensions = Some(match self.dimensions {
            None => CellRange::new(CellReference::new(row, col), CellReference::new(row, col)),
            Some(d) => CellRange::new(
                CellReference::new(d.start.row.min(row), d.start.col.min(col)),
                CellReference::new(d.end.row.max(row), d.end.col.max(col)),
            ),
        });
        self.cells.insert((row, col), Cell { row, col, value });
    }

    /// Text used for the dimensions line of the table header
    pub fn dimensions_label(&self) -> String {
        match self.dimensions {
            Some(d) => d.to_string(),
            None => "A1:A1".to_string(),
        }
    }
}

/// Represents a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}

/// Cell value types, as last computed by the spreadsheet application
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    /// Time of day with no date part
    Time(NaiveTime),
    Duration(String),
    /// Formula error such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Name of the value kind shown by the raw dump
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "none",
            CellValue::Text(_) => "str",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Boolean(_) => "bool",
            CellValue::DateTime(_) => "datetime",
            CellValue::Time(_) => "time",
            CellValue::Duration(_) => "duration",
            CellValue::Error(_) => "error",
        }
    }

    /// Plain text conversion, before any width clamping
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Boolean(b) => bool_label(*b).to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Time(t) => t.format("%H:%M:%S").to_string(),
            CellValue::Duration(d) => d.clone(),
            CellValue::Error(e) => e.clone(),
        }
    }

    /// Unambiguous representation: text is quoted and escaped, floats keep
    /// their fractional part, nothing is trimmed or shortened
    pub fn repr(&self) -> String {
        match self {
            CellValue::Empty => "none".to_string(),
            CellValue::Text(s) => quote_text(s),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format!("{:?}", f),
            CellValue::Boolean(b) => bool_label(*b).to_string(),
            CellValue::DateTime(dt) => format!("{:?}", dt),
            CellValue::Time(t) => format!("{:?}", t),
            CellValue::Duration(d) => d.clone(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

fn bool_label(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Quote text in single quotes, switching to double quotes when the text
/// holds a single quote and no double quote
pub fn quote_text(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
