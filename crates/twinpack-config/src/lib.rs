//! Settings store for twinpack.
//!
//! Holds the project paths, URLs and per-feature option blocks read by the
//! configuration builders, plus the environment snapshot and the
//! `package.json` metadata they depend on.

pub mod discovery;
pub mod env;
pub mod error;
pub mod package;
pub mod settings;

pub use discovery::{Project, ProjectLoader, SETTINGS_FILE};
pub use env::EnvOverrides;
pub use error::{ConfigError, Result};
pub use package::{Author, Browserslist, PackageMeta};
pub use settings::*;
