use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the bundler configurations and print them as JSON
    ///
    /// Prints an array of `{ "variant": ..., "config": ... }` objects, legacy
    /// first. Use --variant to emit a single configuration.
    Config(ConfigArgs),

    /// Write `.gz` files next to compressible build output
    ///
    /// A file is compressed only if it matches the configured pattern, is at
    /// least the threshold size, and shrinks below the minimum ratio.
    Compress(CompressArgs),

    /// Print the effective settings as JSON
    ///
    /// Shows defaults merged with twinpack.toml; environment-derived values
    /// are listed under "resolved".
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Build profile
    #[arg(short, long, value_enum, default_value = "development")]
    pub mode: Mode,

    /// Only emit the configuration for this variant
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Project root containing twinpack.toml and package.json
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Directory to scan, usually the distribution directory
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Project root containing twinpack.toml
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Project root containing twinpack.toml
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}
