use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Development server descriptor handed to the external dev server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServer {
    pub public: String,
    pub content_base: PathBuf,
    pub host: String,
    /// Passed through as configured, never parsed
    pub port: String,
    pub https: bool,
    pub disable_host_check: bool,
    pub hot: bool,
    /// Show build errors in the browser
    pub overlay: bool,
    pub inline: bool,
    pub open: bool,
    pub quiet: bool,
    pub watch_content_base: bool,
    pub watch_options: WatchOptions,
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOptions {
    pub poll: bool,
    pub ignored: String,
}
