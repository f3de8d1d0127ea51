//! Content hashing and filename templates.

use blake3::Hasher;

/// Hex length of a rendered hash token.
///
/// Matches the segment the manifest rewrite strips.
pub const HASH_LEN: usize = 32;

/// Content hash of a single file: truncated BLAKE3, lowercase hex.
pub fn content_hash(bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes);
    hash.to_hex()[..HASH_LEN].to_string()
}

/// Hash over every chunk of a build, in the order given.
///
/// Each chunk contributes its length and bytes so that moving content between
/// chunks changes the result.
pub fn build_hash<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> String {
    let mut hasher = Hasher::new();
    for chunk in chunks {
        hasher.update(&(chunk.len() as u64).to_le_bytes());
        hasher.update(chunk);
    }
    hasher.finalize().to_hex()[..HASH_LEN].to_string()
}

/// Values substituted into a [`FilenameTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub name: &'a str,
    /// Extension without the leading dot
    pub ext: &'a str,
    /// `[hash]`: hash of the whole build
    pub build_hash: &'a str,
    /// `[chunkhash]` and `[contenthash]`: hash of this file's content
    pub chunk_hash: &'a str,
}

/// Output filename template such as `js/[name].[chunkhash].js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the rendered name depends on file or build content.
    pub fn is_hashed(&self) -> bool {
        ["[hash]", "[chunkhash]", "[contenthash]"]
            .iter()
            .any(|token| self.0.contains(token))
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        self.0
            .replace("[name]", ctx.name)
            .replace("[ext]", ctx.ext)
            .replace("[chunkhash]", ctx.chunk_hash)
            .replace("[contenthash]", ctx.chunk_hash)
            .replace("[hash]", ctx.build_hash)
    }
}

impl From<&str> for FilenameTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}
