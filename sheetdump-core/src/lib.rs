//! sheetdump-core: read Excel workbooks and print them to a console
//!
//! The reader turns an `.xlsx` file into an owned [`Workbook`] holding the
//! last computed value of every cell. The renderers print that workbook
//! either as a width-clamped table per sheet or as a raw listing with one
//! line per cell.

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod reader;
pub mod render;

pub use cell_ref::{CellRange, CellReference, column_letter};
pub use config::DumpConfig;
pub use error::{DumpError, Result};
pub use reader::{Cell, CellValue, Sheet, Workbook, read_workbook};
pub use render::{RenderMode, render, render_raw, render_table, write_raw, write_table};
