//! Typed configuration fragments.
//!
//! A [`Fragment`] describes a subset of build behaviour. Fragments have no
//! identity beyond their content: they exist to be merged (see
//! [`crate::merge`]) and serialized for the bundler runtime.

mod dev_server;
mod optimization;
mod plugin;
mod rule;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use dev_server::{DevServer, WatchOptions};
pub use optimization::{
    CacheGroup, CacheGroupOptions, ChunkSelection, CssMapOptions, CssMinimizerOptions, Minimizer,
    Optimization, SplitChunks, TerserOptions,
};
pub use plugin::{
    AnalyzerMode, AnalyzerOptions, BannerOptions, CleanOptions, CompressionAlgorithmOptions,
    CompressionOptions, CopyOptions, CriticalCssOptions, CssExtractOptions, FaviconMeta,
    ExpirationOptions, FaviconOptions, HtmlOptions, ManifestOptions, NotifierOptions, Plugin,
    RuntimeCaching, RuntimeCachingOptions, WorkboxOptions,
};
pub use rule::{
    BabelOptions, CoreJs, CssLoaderOptions, Enforce, EslintOptions, FileOptions, Gifsicle,
    ImageOptimizers, Loader, Mozjpeg, Optipng, PostcssOptions, PresetEnv, Rule, Svgo, Targets,
    UseBuiltIns,
};

use crate::variant::BuildMode;
use crate::{Error, Result};

/// A partial build configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BuildMode>,

    /// Logical bundle name -> resolved source file
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub entry: IndexMap<String, PathBuf>,

    #[serde(default)]
    pub output: Output,

    #[serde(default)]
    pub resolve: Resolve,

    #[serde(default)]
    pub module: ModuleOptions,

    /// Plugin instances, in execution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
}

impl Fragment {
    pub fn rules(&self) -> &[Rule] {
        &self.module.rules
    }

    /// First rule whose `test` pattern matches `path`.
    pub fn rule_for(&self, path: &str) -> Option<&Rule> {
        self.module.rules.iter().find(|rule| rule.matches(path))
    }

    /// Names of the configured plugins, in order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(Plugin::name).collect()
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Filename template for script bundles, e.g. `js/[name].[chunkhash].js`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolve {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOptions {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Source map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
    /// Base64 maps appended to each bundle
    InlineSourceMap,
    /// External `.map` files
    SourceMap,
}
