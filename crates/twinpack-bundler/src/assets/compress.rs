//! Gzip side files for production output.
//!
//! A file gets a `<name>.gz` sibling only when its path matches the test
//! pattern, it is at least `threshold` bytes, and compression brings it below
//! `min_ratio` of its original size.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use regex::Regex;
use tracing::{debug, info};
use twinpack_config::CompressionSettings;
use walkdir::WalkDir;

use crate::output::writer::write_files_to;
use crate::{Error, Result};

/// Result of running one file through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum CompressionOutcome {
    /// Path does not match the test pattern
    NotMatched,
    /// Smaller than the threshold
    BelowThreshold { size: u64 },
    /// Compressed, but not enough to be worth shipping
    Rejected { ratio: f64 },
    Compressed { bytes: Vec<u8>, ratio: f64 },
}

impl CompressionOutcome {
    pub fn is_compressed(&self) -> bool {
        matches!(self, CompressionOutcome::Compressed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CompressionGate {
    test: Regex,
    threshold: u64,
    min_ratio: f64,
    level: u32,
}

impl CompressionGate {
    pub fn from_settings(settings: &CompressionSettings) -> Result<Self> {
        let test = Regex::new(&settings.test).map_err(|source| Error::InvalidPattern {
            pattern: settings.test.clone(),
            source,
        })?;

        Ok(Self {
            test,
            threshold: settings.threshold,
            min_ratio: settings.min_ratio,
            level: settings.level.min(9),
        })
    }

    pub fn evaluate(&self, path: &str, bytes: &[u8]) -> Result<CompressionOutcome> {
        if !self.test.is_match(path) {
            return Ok(CompressionOutcome::NotMatched);
        }

        let size = bytes.len() as u64;
        if size < self.threshold || size == 0 {
            return Ok(CompressionOutcome::BelowThreshold { size });
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(self.level));
        encoder.write_all(bytes)?;
        let compressed = encoder.finish()?;

        let ratio = compressed.len() as f64 / bytes.len() as f64;
        if ratio < self.min_ratio {
            Ok(CompressionOutcome::Compressed {
                bytes: compressed,
                ratio,
            })
        } else {
            Ok(CompressionOutcome::Rejected { ratio })
        }
    }

    /// Write `<file>.gz` next to every qualifying file under `dir`.
    ///
    /// Existing `.gz` files are not recompressed. Returns the written paths.
    pub fn compress_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut pending = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "gz") {
                continue;
            }

            let relative = relative_name(dir, path);
            let bytes = fs::read(path)?;
            match self.evaluate(&relative, &bytes)? {
                CompressionOutcome::Compressed { bytes, ratio } => {
                    debug!(file = %relative, ratio, "Compressed");
                    pending.push((format!("{relative}.gz"), bytes));
                }
                outcome => debug!(file = %relative, ?outcome, "Not compressed"),
            }
        }

        let written = write_files_to(dir, &pending)?;
        info!(count = written.len(), dir = %dir.display(), "Wrote gzip files");
        Ok(written)
    }
}

/// Forward-slash path of `path` relative to `dir`.
fn relative_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gate() -> CompressionGate {
        CompressionGate::from_settings(&CompressionSettings::default()).unwrap()
    }

    fn incompressible(len: usize) -> Vec<u8> {
        let mut bytes = vec![0; len];
        blake3::Hasher::new()
            .update(b"noise")
            .finalize_xof()
            .fill(&mut bytes);
        bytes
    }

    fn compressible(len: usize) -> Vec<u8> {
        b"body { color: red; }\n".iter().copied().cycle().take(len).collect()
    }

    #[test]
    fn compresses_repetitive_files_above_threshold() {
        let outcome = gate().evaluate("js/app.js", &compressible(20_000)).unwrap();
        match outcome {
            CompressionOutcome::Compressed { ratio, .. } => assert!(ratio < 0.8),
            other => panic!("expected compression, got {other:?}"),
        }
    }

    #[test]
    fn rejects_files_that_do_not_shrink_enough() {
        let outcome = gate().evaluate("js/app.js", &incompressible(20_000)).unwrap();
        assert!(matches!(outcome, CompressionOutcome::Rejected { ratio } if ratio >= 0.8));
    }

    #[test]
    fn skips_small_and_unmatched_files() {
        let gate = gate();
        assert_eq!(
            gate.evaluate("js/app.js", &compressible(10_239)).unwrap(),
            CompressionOutcome::BelowThreshold { size: 10_239 }
        );
        assert!(gate.evaluate("js/app.js", &compressible(10_240)).unwrap().is_compressed());
        assert_eq!(
            gate.evaluate("img/logo.png", &compressible(20_000)).unwrap(),
            CompressionOutcome::NotMatched
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let settings = CompressionSettings {
            test: "(".into(),
            ..CompressionSettings::default()
        };
        assert!(matches!(
            CompressionGate::from_settings(&settings),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn compress_dir_writes_gz_siblings() {
        let temp = TempDir::new().unwrap();
        let js = temp.path().join("js");
        fs::create_dir_all(&js).unwrap();
        fs::write(js.join("app.js"), compressible(20_000)).unwrap();
        fs::write(js.join("noise.js"), incompressible(20_000)).unwrap();
        fs::write(temp.path().join("tiny.css"), b"a{}").unwrap();

        let written = gate().compress_dir(temp.path()).unwrap();

        assert_eq!(written, vec![js.join("app.js.gz")]);
        assert!(js.join("app.js.gz").exists());
        assert!(!js.join("noise.js.gz").exists());
        assert!(!temp.path().join("tiny.css.gz").exists());
    }
}
