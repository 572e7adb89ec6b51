//! Spreadsheet-style cell coordinates (e.g., A1, B2, AA10)
//!
//! Rows and columns are 1-based throughout this crate, matching what a user
//! sees in a spreadsheet application.

use std::cmp::Ordering;
use std::fmt;

/// Convert a 1-based column number to its letters (1 -> A, 27 -> AA)
///
/// Columns are numbered in bijective base 26: there is no zero digit, so
/// `Z` is followed by `AA`. Column 0 has no name and yields an empty string.
pub fn column_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Parse column letters back into a 1-based column number
pub fn column_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col = 0u32;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }
    Some(col)
}

/// Cell reference (e.g., A1, B2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellReference {
    pub row: u32,
    pub col: u32,
}

impl CellReference {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel-style reference (e.g., "A1")
    pub fn to_excel_ref(&self) -> String {
        format!("{}{}", column_letter(self.col), self.row)
    }

    /// Parse a reference like "B12", ignoring `$` anchors
    pub fn parse(cell_ref: &str) -> Option<Self> {
        let cell_ref = cell_ref.replace('$', "");
        let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = cell_ref.split_at(split);
        let col = column_number(letters)?;
        let row = digits.parse::<u32>().ok()?;
        if row == 0 {
            return None;
        }
        Some(Self { row, col })
    }
}

impl PartialOrd for CellReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_excel_ref())
    }
}

/// Rectangular range of cells, inclusive on both corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellReference,
    pub end: CellReference,
}

impl CellRange {
    pub fn new(start: CellReference, end: CellReference) -> Self {
        Self { start, end }
    }

    /// Parse a range like "A1:B2". A single reference is a one-cell range.
    pub fn parse(range: &str) -> Option<Self> {
        match range.split_once(':') {
            Some((start, end)) => Some(Self {
                start: CellReference::parse(start)?,
                end: CellReference::parse(end)?,
            }),
            None => {
                let cell = CellReference::parse(range)?;
                Some(Self {
                    start: cell,
                    end: cell,
                })
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
