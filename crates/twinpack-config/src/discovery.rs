//! Project discovery: layered settings plus package metadata.
//!
//! Settings are layered with figment: the static defaults first, then an
//! optional `twinpack.toml` in the project root. Tables merge key by key and
//! arrays are replaced. The environment snapshot is attached last.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};

use crate::env::EnvOverrides;
use crate::error::{ConfigError, Result};
use crate::package::PackageMeta;
use crate::settings::Settings;

pub const SETTINGS_FILE: &str = "twinpack.toml";

/// Everything the builders need to know about a project.
#[derive(Debug, Clone)]
pub struct Project {
    pub settings: Settings,
    pub package: PackageMeta,
}

/// Loads a [`Project`] from a root directory.
///
/// # Example
///
/// ```no_run
/// use twinpack_config::ProjectLoader;
///
/// let project = ProjectLoader::new(".").load().unwrap();
/// println!("{}", project.settings.public_path());
/// ```
pub struct ProjectLoader {
    root: PathBuf,
    env: Option<EnvOverrides>,
}

impl ProjectLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env: None,
        }
    }

    /// Use this snapshot instead of reading the process environment.
    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = Some(env);
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn load(&self) -> Result<Project> {
        if !self.root.is_dir() {
            return Err(ConfigError::RootNotFound(self.root.clone()));
        }

        let settings = self.load_settings()?;
        let package = PackageMeta::from_dir(&self.root)?;

        tracing::debug!(
            root = %self.root.display(),
            package = %package.name,
            entries = settings.entries.len(),
            "loaded project"
        );

        Ok(Project { settings, package })
    }

    fn load_settings(&self) -> Result<Settings> {
        let path = self.settings_path();
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if path.exists() {
            tracing::debug!(path = %path.display(), "merging settings file");
            figment = figment.merge(Toml::file(&path));
        }

        let settings: Settings = figment.extract()?;
        let env = match &self.env {
            Some(env) => env.clone(),
            None => EnvOverrides::capture(),
        };

        Ok(settings.with_root(self.root.clone()).with_env(env))
    }
}
