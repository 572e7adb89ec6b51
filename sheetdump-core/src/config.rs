//! Layout settings and the fixed input files

use std::path::{Path, PathBuf};

/// Workbooks dumped on every run, in this order
pub const DEFAULT_INPUT_FILES: [&str; 2] = ["ABSEN SISWA REAL.xlsx", "MENGAJAR REAL.xlsx"];

/// Dumper configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// File names, resolved against the base directory
    pub input_files: Vec<String>,
    /// Display width of each table column; longer values are cut
    pub column_width: usize,
    /// Width of the row-number field in the table
    pub row_label_width: usize,
    /// Width of the `=` rule around the file banner
    pub banner_width: usize,
    /// Width of the `=` rule around each sheet header in the raw dump
    pub raw_sheet_rule_width: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            input_files: DEFAULT_INPUT_FILES.iter().map(|s| s.to_string()).collect(),
            column_width: 20,
            row_label_width: 6,
            banner_width: 120,
            raw_sheet_rule_width: 80,
        }
    }
}

impl DumpConfig {
    /// Full paths of the input files under `base_dir`
    pub fn input_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.input_files.iter().map(|f| base_dir.join(f)).collect()
    }

    /// Length of the dashed line under the table's column header
    pub fn separator_width(&self, columns: u32) -> usize {
        // Each column slot is "  | " followed by the value field
        self.row_label_width + (self.column_width + 4) * columns.max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_paths() {
        let config = DumpConfig::default();
        let paths = config.input_paths(Path::new("/opt/data"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/opt/data/ABSEN SISWA REAL.xlsx"),
                PathBuf::from("/opt/data/MENGAJAR REAL.xlsx"),
            ]
        );
    }

    #[test]
    fn test_separator_width() {
        let config = DumpConfig::default();
        assert_eq!(config.separator_width(1), 30);
        assert_eq!(config.separator_width(3), 78);
        assert_eq!(config.separator_width(0), 30);
    }
}
