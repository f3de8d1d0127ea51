use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunks>,

    #[serde(default)]
    pub minimizer: Vec<Minimizer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub cache_groups: IndexMap<String, CacheGroup>,
}

/// A cache group, or `false` to switch a built-in group off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheGroup {
    Enabled(CacheGroupOptions),
    Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGroupOptions {
    pub name: String,
    pub test: String,
    pub chunks: ChunkSelection,
    pub enforce: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    All,
    Async,
    Initial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "minimizer", content = "options")]
pub enum Minimizer {
    #[serde(rename = "terser-webpack-plugin")]
    Terser(TerserOptions),
    #[serde(rename = "optimize-css-assets-webpack-plugin")]
    Css(CssMinimizerOptions),
}

/// Pass-through flags: caching and parallelism belong to the minifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerserOptions {
    pub cache: bool,
    pub parallel: bool,
    pub source_map: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssMinimizerOptions {
    pub map: CssMapOptions,
    /// Skip transforms that may change semantics
    pub safe: bool,
    pub discard_comments: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssMapOptions {
    pub inline: bool,
    /// Keep the `sourceMappingURL` annotation
    pub annotation: bool,
}
