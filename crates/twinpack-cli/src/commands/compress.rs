use std::fs;

use twinpack_bundler::CompressionGate;

use crate::cli::CompressArgs;
use crate::commands::load_project;
use crate::error::{CliError, Result};
use crate::ui;

/// Write `.gz` siblings for qualifying files under `args.dir`.
pub fn execute(args: CompressArgs) -> Result<()> {
    let project = load_project(&args.root)?;

    let dir = if args.dir.is_absolute() {
        args.dir.clone()
    } else {
        project.settings.root.join(&args.dir)
    };
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }

    let gate = CompressionGate::from_settings(&project.settings.compression)?;
    let written = gate.compress_dir(&dir)?;

    if written.is_empty() {
        ui::info("No files qualified for compression");
        return Ok(());
    }

    let total: u64 = written
        .iter()
        .filter_map(|path| fs::metadata(path).ok())
        .map(|meta| meta.len())
        .sum();
    ui::success(&format!(
        "Compressed {} file(s), {} gzipped",
        written.len(),
        ui::format_size(total)
    ));
    Ok(())
}
