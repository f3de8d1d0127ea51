//! Error handling for the twinpack CLI.
//!
//! Library errors convert into [`CliError`] via `#[from]`; `main` turns the
//! final error into a [`miette::Report`] with [`cli_error_to_miette`].

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings or package.json could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] twinpack_config::ConfigError),

    /// Composition, emission or compression failed
    #[error(transparent)]
    Bundler(#[from] twinpack_bundler::Error),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report.
///
/// Bundler errors carry their own diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => Report::new(e),
        CliError::Config(e) => miette::miette!(
            help = "Check twinpack.toml and package.json in the project root.",
            "Configuration error: {}",
            e
        ),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Pass an existing directory, or run twinpack from the project root.",
            "File not found: {}",
            path.display()
        ),
        other => miette::miette!("{}", other),
    }
}
