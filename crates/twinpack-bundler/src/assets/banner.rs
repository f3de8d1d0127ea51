//! Build banner prepended to production bundles.

use chrono::{DateTime, Datelike, Utc};
use tracing::warn;
use twinpack_config::{PackageMeta, Settings};

use crate::vcs::GitInfo;

/// Placeholder for the bundle's file name, filled per file.
pub const FILEBASE_TOKEN: &str = "[filebase]";

const UNKNOWN: &str = "unknown";

/// Metadata printed in the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub project: String,
    pub author: String,
    pub built_at: DateTime<Utc>,
    pub revision: String,
    pub branch: String,
    pub copyright: String,
}

impl BuildInfo {
    /// Gather build metadata from the settings, `package.json` and the
    /// project's repository, stamped with the current time.
    ///
    /// A project outside a repository gets `unknown` for revision and branch.
    pub fn collect(settings: &Settings, package: &PackageMeta) -> Self {
        let git = GitInfo::discover(&settings.root).unwrap_or_else(|| {
            warn!(
                root = %settings.root.display(),
                "No git repository found; banner release info will read 'unknown'"
            );
            GitInfo::default()
        });

        Self {
            project: settings.name.clone(),
            author: package.author.name.clone(),
            built_at: Utc::now(),
            revision: git.revision.unwrap_or_else(|| UNKNOWN.to_string()),
            branch: git.branch.unwrap_or_else(|| UNKNOWN.to_string()),
            copyright: settings.copyright.clone(),
        }
    }
}

/// Rendered banner text, still containing [`FILEBASE_TOKEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner(String);

impl Banner {
    pub fn new(info: &BuildInfo) -> Self {
        let lines = [
            "/*!".to_string(),
            format!(" * @project        {}", info.project),
            format!(" * @name           {FILEBASE_TOKEN}"),
            format!(" * @author         {}", info.author),
            format!(" * @build          {} ET", info.built_at.format("%a, %b %-d, %Y %-I:%M %p")),
            format!(" * @release        {} [{}]", info.revision, info.branch),
            format!(
                " * @copyright      Copyright (c) {} {}",
                info.built_at.year(),
                info.copyright
            ),
            " *".to_string(),
            " */".to_string(),
            String::new(),
        ];
        Self(lines.join("\n"))
    }

    /// Banner text with the file name token left in place.
    pub fn render(&self) -> &str {
        &self.0
    }

    /// Banner for one emitted file.
    pub fn render_for(&self, file_base: &str) -> String {
        self.0.replace(FILEBASE_TOKEN, file_base)
    }
}
