//! The two axes every configuration is built along.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Browser generation a configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    /// Older browsers: full transpilation, owns the CSS output
    Legacy,
    /// Evergreen browsers: minimal transpilation, owns images and the service worker
    Modern,
}

impl BuildVariant {
    /// Both variants, in the order configurations are handed to the bundler.
    pub const ALL: [BuildVariant; 2] = [BuildVariant::Legacy, BuildVariant::Modern];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildVariant::Legacy => "legacy",
            BuildVariant::Modern => "modern",
        }
    }

    /// Asset manifest written by this variant.
    pub fn manifest_file(self) -> &'static str {
        match self {
            BuildVariant::Legacy => "manifest-legacy.json",
            BuildVariant::Modern => "manifest.json",
        }
    }

    /// Bundle-analysis report written by this variant.
    pub fn report_file(self) -> &'static str {
        match self {
            BuildVariant::Legacy => "report-legacy.html",
            BuildVariant::Modern => "report-modern.html",
        }
    }

    /// Suffix appended to script bundle names.
    pub fn bundle_suffix(self) -> &'static str {
        match self {
            BuildVariant::Legacy => "-legacy",
            BuildVariant::Modern => "",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
