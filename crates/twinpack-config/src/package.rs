//! The parts of `package.json` the build configuration reads.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMeta {
    pub name: String,
    pub description: String,
    pub author: Author,
    pub browserslist: Browserslist,
}

impl Default for PackageMeta {
    fn default() -> Self {
        Self {
            name: "app".into(),
            description: String::new(),
            author: Author::default(),
            browserslist: Browserslist::default(),
        }
    }
}

impl PackageMeta {
    /// Parse a `package.json` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| ConfigError::InvalidPackage {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `dir/package.json`, or fall back to defaults when it is absent.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join("package.json");
        if !path.exists() {
            tracing::debug!(dir = %dir.display(), "no package.json, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }
}

/// Package author, accepted either as `"Name <email> (url)"` or as an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthorField")]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorField {
    Text(String),
    Detailed {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<AuthorField> for Author {
    fn from(field: AuthorField) -> Self {
        match field {
            AuthorField::Text(text) => parse_author(&text),
            AuthorField::Detailed { name, email, url } => Author { name, email, url },
        }
    }
}

fn parse_author(text: &str) -> Author {
    let enclosed = |open: char, close: char| {
        let start = text.find(open)?;
        let end = text[start..].find(close)? + start;
        Some(text[start + 1..end].trim().to_string())
    };

    let name_end = text.find(['<', '(']).unwrap_or(text.len());
    Author {
        name: text[..name_end].trim().to_string(),
        email: enclosed('<', '>'),
        url: enclosed('(', ')'),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browserslist {
    #[serde(rename = "legacyBrowsers", default = "default_legacy_browsers")]
    pub legacy: Vec<String>,

    #[serde(rename = "modernBrowsers", default = "default_modern_browsers")]
    pub modern: Vec<String>,
}

impl Default for Browserslist {
    fn default() -> Self {
        Self {
            legacy: default_legacy_browsers(),
            modern: default_modern_browsers(),
        }
    }
}

fn default_legacy_browsers() -> Vec<String> {
    vec!["> 1%".into(), "last 2 versions".into(), "Firefox ESR".into()]
}

fn default_modern_browsers() -> Vec<String> {
    vec![
        "last 2 Chrome versions".into(),
        "not Chrome < 60".into(),
        "last 2 Safari versions".into(),
        "not Safari < 10.1".into(),
        "last 2 iOS versions".into(),
        "not iOS < 10.3".into(),
        "last 2 Firefox versions".into(),
        "not Firefox < 54".into(),
        "last 2 Edge versions".into(),
        "not Edge < 15".into(),
    ]
}
