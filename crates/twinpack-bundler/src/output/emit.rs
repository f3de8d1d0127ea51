use std::path::{Path, PathBuf};

use tracing::{debug, info};
use twinpack_config::Settings;

use super::writer::write_files_to;
use crate::assets::{
    AssetManifest, Banner, CompressionGate, CompressionOutcome, FilenameTemplate, RenderContext,
    build_hash, content_hash,
};
use crate::fragment::{Fragment, Plugin};
use crate::variant::{BuildMode, BuildVariant};
use crate::{Error, Result};

/// One bundled file as produced by the bundler runtime, before naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Logical name, e.g. the entry name `app`
    pub name: String,
    /// Extension without the dot: `js` or `css`
    pub ext: String,
    pub content: Vec<u8>,
}

impl Chunk {
    pub fn new(name: impl Into<String>, ext: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            ext: ext.into(),
            content: content.into(),
        }
    }

    pub fn script(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(name, "js", content)
    }

    pub fn stylesheet(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(name, "css", content)
    }
}

/// What an [`Emitter::emit`] call wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Chunk files, in input order
    pub files: Vec<PathBuf>,
    /// `.gz` siblings written by the compression gate
    pub compressed: Vec<PathBuf>,
    pub manifest: PathBuf,
    /// Logical name (`app.js`) to the rendered file name relative to the output directory
    pub names: Vec<(String, String)>,
}

/// Names, stamps and writes the chunks of one variant's build.
#[derive(Debug)]
pub struct Emitter<'a> {
    fragment: &'a Fragment,
    variant: BuildVariant,
    mode: BuildMode,
    settings: &'a Settings,
}

impl<'a> Emitter<'a> {
    pub fn new(
        fragment: &'a Fragment,
        variant: BuildVariant,
        mode: BuildMode,
        settings: &'a Settings,
    ) -> Self {
        Self {
            fragment,
            variant,
            mode,
            settings,
        }
    }

    /// Output directory from the fragment.
    pub fn output_dir(&self) -> Result<&'a Path> {
        self.fragment
            .output
            .path
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("output.path is not set".into()))
    }

    /// Filename template for chunks with extension `ext`.
    ///
    /// Scripts use `output.filename`; stylesheets use the CSS extract plugin.
    pub fn template_for(&self, ext: &str) -> Result<FilenameTemplate> {
        let template = match ext {
            "js" => self.fragment.output.filename.as_deref(),
            "css" => self.fragment.plugins.iter().find_map(|plugin| match plugin {
                Plugin::CssExtract(options) => Some(options.filename.as_str()),
                _ => None,
            }),
            _ => None,
        };

        template
            .map(FilenameTemplate::new)
            .ok_or_else(|| Error::NoTemplate {
                ext: ext.to_string(),
            })
    }

    /// Write `chunks`, the variant manifest and, in production, gzip siblings.
    ///
    /// The banner is prepended to production chunks only. Nothing is written
    /// if any chunk cannot be named or placed under the output directory.
    pub fn emit(&self, chunks: &[Chunk], banner: Option<&Banner>) -> Result<EmitReport> {
        let out_dir = self.output_dir()?;
        let public_path = self.fragment.output.public_path.as_deref().unwrap_or("");
        let build = build_hash(chunks.iter().map(|chunk| chunk.content.as_slice()));
        let banner = banner.filter(|_| self.mode == BuildMode::Production);

        let mut manifest = AssetManifest::new(&self.settings.manifest.base_path);
        let mut files = Vec::with_capacity(chunks.len() + 1);
        let mut names = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let template = self.template_for(&chunk.ext)?;
            let chunk_hash = content_hash(&chunk.content);
            let file = template.render(&RenderContext {
                name: &chunk.name,
                ext: &chunk.ext,
                build_hash: &build,
                chunk_hash: &chunk_hash,
            });

            let content = match banner {
                Some(banner) => {
                    let file_base = file.rsplit('/').next().unwrap_or(&file);
                    let mut stamped = banner.render_for(file_base).into_bytes();
                    stamped.extend_from_slice(&chunk.content);
                    stamped
                }
                None => chunk.content.clone(),
            };

            let logical = format!("{}.{}", chunk.name, chunk.ext);
            manifest.insert(&logical, format!("{public_path}{file}"));
            debug!(%logical, %file, "Named chunk");
            names.push((logical, file.clone()));
            files.push((file, content));
        }

        files.push((
            self.variant.manifest_file().to_string(),
            manifest.to_json()?.into_bytes(),
        ));

        let mut written = write_files_to(out_dir, &files)?;
        let manifest_path = written.pop().unwrap_or_default();
        for path in &written {
            info!(variant = %self.variant, file = %path.display(), "Emitted");
        }

        let compressed = match self.mode {
            BuildMode::Production => self.compress(out_dir, &files[..written.len()])?,
            BuildMode::Development => Vec::new(),
        };

        Ok(EmitReport {
            files: written,
            compressed,
            manifest: manifest_path,
            names,
        })
    }

    fn compress(&self, out_dir: &Path, files: &[(String, Vec<u8>)]) -> Result<Vec<PathBuf>> {
        let gate = CompressionGate::from_settings(&self.settings.compression)?;

        let mut pending = Vec::new();
        for (file, content) in files {
            if let CompressionOutcome::Compressed { bytes, ratio } = gate.evaluate(file, content)? {
                debug!(%file, ratio, "Compressed");
                pending.push((format!("{file}.gz"), bytes));
            }
        }

        write_files_to(out_dir, &pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::CssExtractOptions;

    #[test]
    fn css_template_comes_from_extract_plugin() {
        let settings = Settings::default();
        let mut fragment = Fragment::default();
        fragment.output.filename = Some("js/[name].[chunkhash].js".into());
        let emitter = Emitter::new(&fragment, BuildVariant::Legacy, BuildMode::Production, &settings);

        assert!(matches!(
            emitter.template_for("css"),
            Err(Error::NoTemplate { ext }) if ext == "css"
        ));

        fragment.plugins.push(Plugin::CssExtract(CssExtractOptions {
            path: PathBuf::from("/dist"),
            filename: "css/[name].[chunkhash].css".into(),
        }));
        let emitter = Emitter::new(&fragment, BuildVariant::Legacy, BuildMode::Production, &settings);
        assert_eq!(
            emitter.template_for("css").unwrap().as_str(),
            "css/[name].[chunkhash].css"
        );
        assert!(emitter.template_for("wasm").is_err());
    }

    #[test]
    fn missing_output_path_is_a_config_error() {
        let settings = Settings::default();
        let fragment = Fragment::default();
        let emitter = Emitter::new(&fragment, BuildVariant::Modern, BuildMode::Development, &settings);
        assert!(matches!(
            emitter.emit(&[], None),
            Err(Error::InvalidConfig(_))
        ));
    }
}
