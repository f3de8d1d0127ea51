//! Output-side helpers whose behaviour the composed configuration pins down:
//! hashed filenames, manifest names, the banner and the gzip gate.

mod banner;
mod compress;
mod hash;
mod manifest;

pub use banner::{Banner, BuildInfo, FILEBASE_TOKEN};
pub use compress::{CompressionGate, CompressionOutcome};
pub use hash::{FilenameTemplate, HASH_LEN, RenderContext, build_hash, content_hash};
pub use manifest::{
    AssetManifest, HASH_SEGMENT_PATTERN, HASH_SEGMENT_REPLACEMENT, strip_content_hash,
};
