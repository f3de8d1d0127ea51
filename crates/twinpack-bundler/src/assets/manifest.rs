//! Asset manifest: logical asset names mapped to emitted files.

use std::borrow::Cow;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::Result;

/// A `.<32 hex>` segment in front of the final extension group.
pub const HASH_SEGMENT_PATTERN: &str = r"(\.[a-f0-9]{32})(\..*)$";

/// Replacement applied with [`HASH_SEGMENT_PATTERN`]: keep the extension group.
pub const HASH_SEGMENT_REPLACEMENT: &str = "$2";

static HASH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HASH_SEGMENT_PATTERN).expect("hash segment pattern is valid"));

/// Remove the content hash from a manifest entry name.
///
/// `app.0123456789abcdef0123456789abcdef.js` becomes `app.js`. Names without
/// a hash segment are returned unchanged.
pub fn strip_content_hash(name: &str) -> Cow<'_, str> {
    HASH_SEGMENT.replace(name, HASH_SEGMENT_REPLACEMENT)
}

/// Ordered logical-name to public-path map written next to the bundles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    base_path: String,
    entries: IndexMap<String, String>,
}

impl AssetManifest {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            entries: IndexMap::new(),
        }
    }

    /// Record an asset. The logical name is prefixed with the base path after
    /// its hash segment is stripped.
    pub fn insert(&mut self, logical: &str, public_path: impl Into<String>) {
        let key = format!("{}{}", self.base_path, strip_content_hash(logical));
        self.entries.insert(key, public_path.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
