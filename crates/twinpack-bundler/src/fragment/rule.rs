use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A module rule: files matching `test` go through `use`, last loader first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Regex source matched against the module path
    pub test: String,

    /// Regex sources for paths left untouched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,

    #[serde(rename = "use")]
    pub uses: Vec<Loader>,
}

impl Rule {
    pub fn new(test: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            exclude: Vec::new(),
            include: None,
            enforce: None,
            uses: Vec::new(),
        }
    }

    pub fn loader(mut self, loader: Loader) -> Self {
        self.uses.push(loader);
        self
    }

    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn include(mut self, path: impl Into<PathBuf>) -> Self {
        self.include = Some(path.into());
        self
    }

    pub fn enforce(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    /// Whether `path` is routed through this rule. An invalid pattern matches nothing.
    pub fn matches(&self, path: &str) -> bool {
        let hit = |pattern: &str| Regex::new(pattern).is_ok_and(|re| re.is_match(path));
        hit(&self.test) && !self.exclude.iter().any(|pattern| hit(pattern))
    }

    pub fn loader_names(&self) -> Vec<&'static str> {
        self.uses.iter().map(Loader::name).collect()
    }

    pub fn has_loader(&self, name: &str) -> bool {
        self.uses.iter().any(|loader| loader.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    /// Runs before every normal loader (linting)
    Pre,
    Post,
}

/// One stage of a rule's loader chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "loader", content = "options")]
pub enum Loader {
    #[serde(rename = "babel-loader")]
    Babel(BabelOptions),
    #[serde(rename = "file-loader")]
    File(FileOptions),
    /// Consumes the import and emits nothing
    #[serde(rename = "ignore-loader")]
    Ignore,
    /// Injects styles at runtime
    #[serde(rename = "style-loader")]
    Style,
    #[serde(rename = "css-loader")]
    Css(CssLoaderOptions),
    #[serde(rename = "resolve-url-loader")]
    ResolveUrl,
    #[serde(rename = "sass-loader")]
    Sass,
    #[serde(rename = "postcss-loader")]
    Postcss(PostcssOptions),
    /// Extracts styles into standalone files
    #[serde(rename = "mini-css-extract-plugin/loader")]
    MiniCssExtract,
    #[serde(rename = "eslint-loader")]
    Eslint(EslintOptions),
    #[serde(rename = "img-loader")]
    Img(ImageOptimizers),
}

impl Loader {
    pub fn name(&self) -> &'static str {
        match self {
            Loader::Babel(_) => "babel-loader",
            Loader::File(_) => "file-loader",
            Loader::Ignore => "ignore-loader",
            Loader::Style => "style-loader",
            Loader::Css(_) => "css-loader",
            Loader::ResolveUrl => "resolve-url-loader",
            Loader::Sass => "sass-loader",
            Loader::Postcss(_) => "postcss-loader",
            Loader::MiniCssExtract => "mini-css-extract-plugin/loader",
            Loader::Eslint(_) => "eslint-loader",
            Loader::Img(_) => "img-loader",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabelOptions {
    pub cache_directory: bool,
    pub preset_env: PresetEnv,
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetEnv {
    /// Keep ES module syntax for the bundler
    pub modules: bool,
    pub corejs: CoreJs,
    pub use_built_ins: UseBuiltIns,
    pub targets: Targets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreJs {
    pub version: u8,
    pub proposals: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseBuiltIns {
    /// Inject only the polyfills a module actually uses
    Usage,
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub browsers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// Output name template, e.g. `img/[name].[hash].[ext]`
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssLoaderOptions {
    pub import_loaders: u8,
    pub source_map: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcssOptions {
    pub source_map: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintOptions {
    /// Report problems as warnings so the build keeps going
    pub emit_warning: bool,
}

/// Per-format image recompression settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptimizers {
    pub gifsicle: Gifsicle,
    pub mozjpeg: Mozjpeg,
    pub optipng: Optipng,
    pub svgo: Svgo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gifsicle {
    pub interlaced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mozjpeg {
    pub progressive: bool,
    pub arithmetic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optipng {
    pub optimization_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Svgo {
    pub convert_path_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_respects_exclude() {
        let rule = Rule::new(r"\.js$").exclude(["node_modules"]);
        assert!(rule.matches("src/app/index.js"));
        assert!(!rule.matches("node_modules/lib/index.js"));
        assert!(!rule.matches("src/app/index.css"));
    }

    #[test]
    fn unit_loaders_serialize_without_options() {
        let value = serde_json::to_value(Loader::Ignore).unwrap();
        assert_eq!(value, serde_json::json!({ "loader": "ignore-loader" }));
    }

    #[test]
    fn loaders_serialize_with_options() {
        let value = serde_json::to_value(Loader::File(FileOptions {
            name: "fonts/[name].[ext]".into(),
        }))
        .unwrap();
        assert_eq!(value["loader"], "file-loader");
        assert_eq!(value["options"]["name"], "fonts/[name].[ext]");
    }
}
