//! The settings store shared by every configuration builder.
//!
//! Settings are built once (defaults, then `twinpack.toml`, then the
//! environment snapshot) and are read-only afterwards.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::env::{EnvOverrides, pick};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Project name printed in the banner
    pub name: String,

    /// Copyright holder printed in the banner
    pub copyright: String,

    pub paths: PathSettings,
    pub urls: UrlSettings,
    pub vars: VarSettings,
    pub babel_loader: BabelLoaderSettings,

    /// Logical bundle name -> file relative to `paths.src.js`
    pub entries: IndexMap<String, String>,

    pub manifest: ManifestSettings,
    pub copy: Vec<CopyPattern>,
    pub dev_server: DevServerSettings,
    pub critical_css: CriticalCssSettings,
    pub favicon: FaviconSettings,
    pub workbox: WorkboxSettings,
    pub save_remote_file: Vec<RemoteFile>,
    pub compression: CompressionSettings,

    /// Directory every relative path is resolved against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(skip)]
    pub env: EnvOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        let mut entries = IndexMap::new();
        entries.insert("app".to_string(), "index.js".to_string());

        Self {
            name: "project name".into(),
            copyright: "copyright goes to".into(),
            paths: PathSettings::default(),
            urls: UrlSettings::default(),
            vars: VarSettings::default(),
            babel_loader: BabelLoaderSettings::default(),
            entries,
            manifest: ManifestSettings::default(),
            copy: vec![CopyPattern {
                from: "./src/img".into(),
                to: "./dist/img".into(),
                to_type: CopyTarget::Dir,
            }],
            dev_server: DevServerSettings::default(),
            critical_css: CriticalCssSettings::default(),
            favicon: FaviconSettings::default(),
            workbox: WorkboxSettings::default(),
            save_remote_file: vec![RemoteFile {
                url: "https://www.google-analytics.com/analytics.js".into(),
                filepath: "js/analytics.js".into(),
            }],
            compression: CompressionSettings::default(),
            root: PathBuf::from("."),
            env: EnvOverrides::default(),
        }
    }
}

impl Settings {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// Resolve a settings-relative path against the project root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative).clean()
    }

    /// Public URL prefix for emitted assets (`PUBLIC_PATH`).
    pub fn public_path(&self) -> &str {
        pick(&self.env.public_path, &self.urls.public_path)
    }

    /// Public URL of the development server (`DEV_SERVER_PUBLIC`).
    pub fn dev_server_public(&self) -> &str {
        pick(&self.env.dev_server_public, &self.dev_server.public)
    }

    pub fn dev_server_host(&self) -> &str {
        pick(&self.env.dev_server_host, &self.dev_server.host)
    }

    /// Not parsed: the port is handed on exactly as spelled.
    pub fn dev_server_port(&self) -> &str {
        pick(&self.env.dev_server_port, &self.dev_server.port)
    }

    pub fn dev_server_poll(&self) -> &str {
        pick(&self.env.dev_server_poll, &self.dev_server.poll)
    }

    pub fn dev_server_https(&self) -> &str {
        pick(&self.env.dev_server_https, &self.dev_server.https)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub src: SrcPaths,
    pub dist: DistPaths,
    /// Static files served as the dev server's content base
    pub assets: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            src: SrcPaths::default(),
            dist: DistPaths::default(),
            assets: "./public/".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SrcPaths {
    pub base: String,
    pub js: String,
    pub css: String,
}

impl Default for SrcPaths {
    fn default() -> Self {
        Self {
            base: "./src/".into(),
            js: "./src/app/".into(),
            css: "./src/css/".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistPaths {
    pub base: String,
    /// Glob patterns removed before a production build
    pub clean: Vec<String>,
}

impl Default for DistPaths {
    fn default() -> Self {
        Self {
            base: "./dist/".into(),
            clean: vec!["**/*".into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSettings {
    /// Site the critical CSS pass renders pages from
    pub critical: String,
    pub public_path: String,
}

impl Default for UrlSettings {
    fn default() -> Self {
        Self {
            critical: "http://example.test/".into(),
            public_path: "/dist/".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VarSettings {
    /// Name of the chunk that collects every stylesheet
    pub css_name: String,
}

impl Default for VarSettings {
    fn default() -> Self {
        Self {
            css_name: "styles".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BabelLoaderSettings {
    /// Patterns (regex sources) excluded from transpilation
    pub exclude: Vec<String>,
}

impl Default for BabelLoaderSettings {
    fn default() -> Self {
        Self {
            exclude: vec!["node_modules".into()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSettings {
    pub base_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub to_type: CopyTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyTarget {
    #[default]
    Dir,
    File,
    Template,
}

/// Static fallbacks for the development server; see the accessors on
/// [`Settings`] for the environment-aware values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerSettings {
    pub public: String,
    pub host: String,
    pub poll: String,
    pub port: String,
    pub https: String,
}

impl Default for DevServerSettings {
    fn default() -> Self {
        Self {
            public: "http://localhost:8080".into(),
            host: "localhost".into(),
            poll: "false".into(),
            port: "8080".into(),
            https: "false".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalCssSettings {
    /// Output directory for the per-page stylesheets
    pub base: String,
    pub suffix: String,
    pub critical_width: u32,
    pub critical_height: u32,
    /// Templates containing this marker are rendered with the AMP viewport
    pub amp_prefix: String,
    pub amp_critical_width: u32,
    pub amp_critical_height: u32,
    pub pages: Vec<CriticalPage>,
}

impl Default for CriticalCssSettings {
    fn default() -> Self {
        Self {
            base: "./dist/criticalcss/".into(),
            suffix: "_critical.min.css".into(),
            critical_width: 1200,
            critical_height: 1200,
            amp_prefix: "amp_".into(),
            amp_critical_width: 600,
            amp_critical_height: 19200,
            pages: vec![CriticalPage {
                url: String::new(),
                template: "index".into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPage {
    /// Path appended to `urls.critical`
    pub url: String,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconSettings {
    pub logo: String,
    pub prefix: String,
}

impl Default for FaviconSettings {
    fn default() -> Self {
        Self {
            logo: "./src/img/favicon-src.png".into(),
            prefix: "img/favicons/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkboxSettings {
    pub sw_dest: String,
    pub precache_manifest_filename: String,
    pub import_scripts: Vec<String>,
    /// Regex sources for files kept out of the precache manifest
    pub exclude: Vec<String>,
    pub glob_directory: String,
    pub glob_patterns: Vec<String>,
    pub offline_google_analytics: bool,
    pub runtime_caching: Vec<RuntimeCache>,
}

impl Default for WorkboxSettings {
    fn default() -> Self {
        Self {
            sw_dest: "../sw.js".into(),
            precache_manifest_filename: "js/precache-manifest.[manifestHash].js".into(),
            import_scripts: Vec::new(),
            exclude: vec![
                r"(?i)\.(png|jpe?g|gif|svg|webp)$".into(),
                r"\.map$".into(),
                r"^manifest.*\.js(?:on)?$".into(),
            ],
            glob_directory: "./web/".into(),
            glob_patterns: vec!["offline.html".into(), "offline.svg".into()],
            offline_google_analytics: true,
            runtime_caching: vec![RuntimeCache {
                url_pattern: r"\.(?:png|jpg|jpeg|svg|webp)$".into(),
                handler: CacheHandler::CacheFirst,
                options: RuntimeCacheOptions {
                    cache_name: "images".into(),
                    expiration: CacheExpiration { max_entries: 20 },
                },
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeCache {
    pub url_pattern: String,
    pub handler: CacheHandler,
    pub options: RuntimeCacheOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheHandler {
    CacheFirst,
    CacheOnly,
    NetworkFirst,
    NetworkOnly,
    StaleWhileRevalidate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeCacheOptions {
    pub cache_name: String,
    pub expiration: CacheExpiration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheExpiration {
    pub max_entries: u32,
}

/// A remote script downloaded into the build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub url: String,
    /// Destination relative to the output directory
    pub filepath: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionSettings {
    /// Regex source selecting compressible files
    pub test: String,
    /// Files smaller than this many bytes are never compressed
    pub threshold: u64,
    /// Compressed output must be below this fraction of the original
    pub min_ratio: f64,
    pub level: u32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            test: r"\.(js|css|html|svg)$".into(),
            threshold: 10_240,
            min_ratio: 0.8,
            level: 9,
        }
    }
}
