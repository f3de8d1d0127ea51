#![cfg_attr(docsrs, feature(doc_cfg))]

//! # twinpack-bundler
//!
//! Composes legacy and modern bundler configurations and post-processes the
//! bundler's output.
//!
//! A build produces two configurations, one per [`BuildVariant`]. Each is
//! assembled from typed [`Fragment`]s: a shared base, a variant layer, and a
//! development or production profile, combined with [`merge`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use twinpack_bundler::{BuildInfo, BuildMode, compose};
//! use twinpack_config::ProjectLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let project = ProjectLoader::new(".").load()?;
//! let info = BuildInfo::collect(&project.settings, &project.package);
//! let configs = compose(BuildMode::Production, &project.settings, &project.package, &info);
//! println!("{}", serde_json::to_string_pretty(&configs)?);
//! # Ok(()) }
//! ```

pub mod assets;
pub mod builders;
pub mod fragment;
pub mod merge;
pub mod output;
pub mod variant;
pub mod vcs;

pub use assets::{
    AssetManifest, Banner, BuildInfo, CompressionGate, CompressionOutcome, FilenameTemplate,
    RenderContext, build_hash, content_hash, strip_content_hash,
};
pub use builders::{
    VariantConfig, VariantConfigs, base_fragment, compose, compose_variants, development_config,
    development_configs, production_config, production_configs,
};
pub use fragment::{Devtool, Fragment, Loader, Plugin, Rule};
pub use merge::{ArrayStrategy, MergeStrategy, merge};
pub use output::{Chunk, EmitReport, Emitter};
pub use variant::{BuildMode, BuildVariant};
pub use vcs::GitInfo;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

/// Error types for twinpack-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fragment could not be converted to or from its serialized form.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pattern in the settings is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The fragment has no filename template for this kind of chunk.
    #[error("No output filename template for '.{ext}' chunks")]
    NoTemplate { ext: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Manifest serialization failed.
    #[error("Manifest error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the settings crate.
    #[error("Configuration error: {0}")]
    Config(#[from] twinpack_config::ConfigError),
}

/// Result type alias for twinpack-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidPattern { .. } => "INVALID_PATTERN",
            Error::NoTemplate { .. } => "NO_TEMPLATE",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::Json(_) => "MANIFEST_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::InvalidPattern { pattern, .. } => Some(Box::new(format!(
                "Check the pattern '{}' in twinpack.toml. Patterns use Rust regex syntax.",
                pattern
            ))),
            Error::NoTemplate { ext } => Some(Box::new(format!(
                "Scripts use output.filename and stylesheets use the CSS extract plugin's filename. '.{}' chunks have neither.",
                ext
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it's within the output directory and doesn't contain '..' components.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::Config(_) => Some(Box::new(
                "Check twinpack.toml and package.json in the project root.",
            )),
            _ => None,
        }
    }
}
