//! Subcommand implementations.

mod compress;
mod config;
mod settings;

pub use compress::execute as compress_execute;
pub use config::execute as config_execute;
pub use settings::execute as settings_execute;

use std::path::Path;

use twinpack_config::{Project, ProjectLoader};

use crate::error::{CliError, Result};

/// Load settings and package metadata from `root`.
pub(crate) fn load_project(root: &Path) -> Result<Project> {
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root.to_path_buf()));
    }
    Ok(ProjectLoader::new(root).load()?)
}
