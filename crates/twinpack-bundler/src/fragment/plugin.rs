use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use twinpack_config::{CacheHandler, CopyTarget, RemoteFile};

/// A plugin instance: a name plus its options.
///
/// Serialized as `{ "plugin": "<name>", "options": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", content = "options")]
pub enum Plugin {
    /// Desktop notification on build success or failure
    #[serde(rename = "webpack-notifier")]
    Notifier(NotifierOptions),
    #[serde(rename = "copy-webpack-plugin")]
    Copy(Vec<CopyOptions>),
    #[serde(rename = "html-webpack-plugin")]
    Html(HtmlOptions),
    #[serde(rename = "webpack-manifest-plugin")]
    Manifest(ManifestOptions),
    #[serde(rename = "webpack.HotModuleReplacementPlugin")]
    HotModuleReplacement,
    #[serde(rename = "mini-css-extract-plugin")]
    CssExtract(CssExtractOptions),
    #[serde(rename = "webpack.BannerPlugin")]
    Banner(BannerOptions),
    #[serde(rename = "favicons-webpack-plugin")]
    Favicons(FaviconOptions),
    /// Downloads remote scripts into the build output
    #[serde(rename = "save-remote-file-webpack-plugin")]
    SaveRemoteFile(Vec<RemoteFile>),
    #[serde(rename = "compression-webpack-plugin")]
    Compression(CompressionOptions),
    #[serde(rename = "webpack-bundle-analyzer")]
    BundleAnalyzer(AnalyzerOptions),
    #[serde(rename = "critical-css-webpack-plugin")]
    CriticalCss(CriticalCssOptions),
    #[serde(rename = "clean-webpack-plugin")]
    Clean(CleanOptions),
    #[serde(rename = "imagemin-webp-webpack-plugin")]
    ImageminWebp,
    #[serde(rename = "workbox-webpack-plugin.GenerateSW")]
    GenerateSw(WorkboxOptions),
}

impl Plugin {
    pub fn name(&self) -> &'static str {
        match self {
            Plugin::Notifier(_) => "webpack-notifier",
            Plugin::Copy(_) => "copy-webpack-plugin",
            Plugin::Html(_) => "html-webpack-plugin",
            Plugin::Manifest(_) => "webpack-manifest-plugin",
            Plugin::HotModuleReplacement => "webpack.HotModuleReplacementPlugin",
            Plugin::CssExtract(_) => "mini-css-extract-plugin",
            Plugin::Banner(_) => "webpack.BannerPlugin",
            Plugin::Favicons(_) => "favicons-webpack-plugin",
            Plugin::SaveRemoteFile(_) => "save-remote-file-webpack-plugin",
            Plugin::Compression(_) => "compression-webpack-plugin",
            Plugin::BundleAnalyzer(_) => "webpack-bundle-analyzer",
            Plugin::CriticalCss(_) => "critical-css-webpack-plugin",
            Plugin::Clean(_) => "clean-webpack-plugin",
            Plugin::ImageminWebp => "imagemin-webp-webpack-plugin",
            Plugin::GenerateSw(_) => "workbox-webpack-plugin.GenerateSW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierOptions {
    pub title: String,
    pub exclude_warnings: bool,
    pub always_notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyOptions {
    pub from: PathBuf,
    pub to: PathBuf,
    pub to_type: CopyTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlOptions {
    pub template: PathBuf,
    pub filename: String,
    pub inject: bool,
}

/// Asset manifest writer.
///
/// Every entry name is rewritten with `name_pattern` -> `name_replacement`
/// before it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestOptions {
    pub file_name: String,
    pub base_path: String,
    pub name_pattern: String,
    pub name_replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssExtractOptions {
    pub path: PathBuf,
    /// Filename template for extracted stylesheets
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerOptions {
    pub banner: String,
    /// Emit the banner verbatim instead of wrapping it in a comment
    pub raw: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaviconOptions {
    pub logo: PathBuf,
    pub prefix: String,
    pub cache: bool,
    pub inject: bool,
    pub favicons: FaviconMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaviconMeta {
    pub app_name: String,
    pub app_description: String,
    pub developer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_url: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Output name template; `[path]` is the original asset path
    pub filename: String,
    pub algorithm: String,
    pub test: String,
    pub threshold: u64,
    pub min_ratio: f64,
    pub delete_original_assets: bool,
    pub compression_options: CompressionAlgorithmOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionAlgorithmOptions {
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    /// Write a standalone HTML report
    Static,
    Server,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerOptions {
    pub analyzer_mode: AnalyzerMode,
    pub report_filename: String,
}

/// One critical-CSS extraction job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalCssOptions {
    pub base: String,
    /// Page URL rendered to find above-the-fold rules
    pub src: String,
    pub dest: String,
    pub extract: bool,
    pub inline: bool,
    pub minify: bool,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanOptions {
    pub clean_once_before_patterns: Vec<String>,
    pub verbose: bool,
    pub dry: bool,
}

/// Service worker generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkboxOptions {
    pub sw_dest: String,
    pub precache_manifest_filename: String,
    pub import_scripts: Vec<String>,
    pub exclude: Vec<String>,
    pub glob_directory: String,
    pub glob_patterns: Vec<String>,
    pub offline_google_analytics: bool,
    pub runtime_caching: Vec<RuntimeCaching>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCaching {
    pub url_pattern: String,
    pub handler: CacheHandler,
    pub options: RuntimeCachingOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCachingOptions {
    pub cache_name: String,
    pub expiration: ExpirationOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationOptions {
    /// Oldest entries are evicted beyond this count
    pub max_entries: u32,
}
