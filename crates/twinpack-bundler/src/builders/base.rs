//! The skeleton shared by both variants.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;
use twinpack_config::{PackageMeta, Settings};

use crate::fragment::{
    FileOptions, Fragment, Loader, ModuleOptions, NotifierOptions, Output, Plugin, Resolve, Rule,
};

/// Font files, matched case-insensitively.
pub const FONT_TEST: &str = r"(?i)\.(ttf|eot|woff2?)$";

/// Entries, output location, resolution, the font rule and the notifier.
pub fn base_fragment(settings: &Settings, package: &PackageMeta) -> Fragment {
    let fragment = Fragment {
        name: Some(package.name.clone()),
        entry: configure_entries(settings),
        output: Output {
            path: Some(settings.resolve(&settings.paths.dist.base)),
            public_path: Some(settings.public_path().to_string()),
            filename: None,
        },
        resolve: Resolve {
            extensions: vec![".js".into(), ".json".into()],
            alias: IndexMap::from([("~".to_string(), settings.resolve(&settings.paths.src.base))]),
        },
        module: ModuleOptions {
            rules: vec![configure_font_loader()],
        },
        plugins: vec![Plugin::Notifier(NotifierOptions {
            title: "Webpack".into(),
            exclude_warnings: true,
            always_notify: true,
        })],
        ..Fragment::default()
    };

    debug!(
        entries = fragment.entry.len(),
        output = ?fragment.output.path,
        "Composed base fragment"
    );
    fragment
}

/// Each configured entry resolved under `paths.src.js`.
pub fn configure_entries(settings: &Settings) -> IndexMap<String, PathBuf> {
    let js_dir = Path::new(&settings.paths.src.js);
    settings
        .entries
        .iter()
        .map(|(name, file)| (name.clone(), settings.resolve(js_dir.join(file))))
        .collect()
}

pub fn configure_font_loader() -> Rule {
    Rule::new(FONT_TEST).loader(Loader::File(FileOptions {
        name: "fonts/[name].[ext]".into(),
    }))
}
