use anyhow::{Context, Result};
use clap::Parser;
use sheetdump_core::{DumpConfig, RenderMode, render};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetdump")]
#[command(about = "Print every sheet, row and cell of the attendance workbooks", long_about = None)]
#[command(version)]
struct Cli {
    /// Output layout: `table` for a compact table, anything else for the raw cell listing
    #[arg(value_name = "MODE", allow_hyphen_values = true)]
    mode: Option<String>,

    /// Anything after the mode is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = RenderMode::from_arg(cli.mode.as_deref());
    let config = DumpConfig::default();
    let base_dir = executable_dir()?;

    tracing::debug!(?mode, base_dir = %base_dir.display(), "starting dump");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for path in config.input_paths(&base_dir) {
        render(mode, &path, &config, &mut out)
            .with_context(|| format!("Failed to dump workbook: {}", path.display()))?;
    }

    out.flush()?;
    Ok(())
}

/// Directory holding the running executable; the input files live next to it
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .map(|p| p.to_path_buf())
        .context("Executable path has no parent directory")?;
    Ok(dir)
}
