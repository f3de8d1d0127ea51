//! Legacy and modern layers: transpilation targets and manifests.

use tracing::debug;
use twinpack_config::{PackageMeta, Settings};

use crate::assets::{HASH_SEGMENT_PATTERN, HASH_SEGMENT_REPLACEMENT};
use crate::fragment::{
    BabelOptions, CopyOptions, CoreJs, Fragment, HtmlOptions, Loader, ManifestOptions,
    ModuleOptions, Plugin, PresetEnv, Rule, Targets, UseBuiltIns,
};
use crate::variant::BuildVariant;

pub const SCRIPT_TEST: &str = r"\.js$";

/// Layer applied over the base fragment for `variant`.
pub fn variant_fragment(
    variant: BuildVariant,
    settings: &Settings,
    package: &PackageMeta,
) -> Fragment {
    match variant {
        BuildVariant::Legacy => legacy_fragment(settings, package),
        BuildVariant::Modern => modern_fragment(settings, package),
    }
}

pub fn legacy_fragment(settings: &Settings, package: &PackageMeta) -> Fragment {
    let fragment = Fragment {
        module: ModuleOptions {
            rules: vec![configure_babel_loader(
                settings,
                &package.browserslist.legacy,
            )],
        },
        plugins: vec![
            configure_copy(settings),
            Plugin::Html(configure_html(settings)),
            configure_manifest(settings, BuildVariant::Legacy.manifest_file()),
        ],
        ..Fragment::default()
    };
    debug!(variant = "legacy", browsers = ?package.browserslist.legacy, "Composed variant fragment");
    fragment
}

pub fn modern_fragment(settings: &Settings, package: &PackageMeta) -> Fragment {
    let fragment = Fragment {
        module: ModuleOptions {
            rules: vec![configure_babel_loader(
                settings,
                &package.browserslist.modern,
            )],
        },
        plugins: vec![configure_manifest(
            settings,
            BuildVariant::Modern.manifest_file(),
        )],
        ..Fragment::default()
    };
    debug!(variant = "modern", browsers = ?package.browserslist.modern, "Composed variant fragment");
    fragment
}

/// Transpilation rule targeting `browsers`, with usage-based polyfills.
pub fn configure_babel_loader(settings: &Settings, browsers: &[String]) -> Rule {
    Rule::new(SCRIPT_TEST)
        .exclude(settings.babel_loader.exclude.iter().cloned())
        .loader(Loader::Babel(BabelOptions {
            cache_directory: true,
            preset_env: PresetEnv {
                modules: false,
                corejs: CoreJs {
                    version: 3,
                    proposals: true,
                },
                use_built_ins: UseBuiltIns::Usage,
                targets: Targets {
                    browsers: browsers.to_vec(),
                },
            },
            plugins: vec![
                "@babel/plugin-syntax-dynamic-import".into(),
                "@babel/plugin-transform-runtime".into(),
            ],
        }))
}

/// Manifest writer whose entry names lose their content hash.
pub fn configure_manifest(settings: &Settings, file_name: &str) -> Plugin {
    Plugin::Manifest(ManifestOptions {
        file_name: file_name.to_string(),
        base_path: settings.manifest.base_path.clone(),
        name_pattern: HASH_SEGMENT_PATTERN.to_string(),
        name_replacement: HASH_SEGMENT_REPLACEMENT.to_string(),
    })
}

pub fn configure_html(settings: &Settings) -> HtmlOptions {
    HtmlOptions {
        template: settings.resolve(&settings.paths.src.base).join("index.html"),
        filename: "index.html".into(),
        inject: true,
    }
}

fn configure_copy(settings: &Settings) -> Plugin {
    Plugin::Copy(
        settings
            .copy
            .iter()
            .map(|pattern| CopyOptions {
                from: settings.resolve(&pattern.from),
                to: settings.resolve(&pattern.to),
                to_type: pattern.to_type,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn babel_rule_targets_given_browsers() {
        let browsers = vec!["> 1%".to_string(), "ie 11".to_string()];
        let rule = configure_babel_loader(&Settings::default(), &browsers);

        assert!(rule.matches("src/app/index.js"));
        assert!(!rule.matches("node_modules/lodash/index.js"));
        match &rule.uses[..] {
            [Loader::Babel(options)] => {
                assert_eq!(options.preset_env.targets.browsers, browsers);
                assert_eq!(options.preset_env.use_built_ins, UseBuiltIns::Usage);
                assert!(!options.preset_env.modules);
            }
            other => panic!("unexpected loaders: {other:?}"),
        }
    }

    #[test]
    fn legacy_owns_copy_and_html() {
        let settings = Settings::default().with_root("/project");
        let fragment = legacy_fragment(&settings, &PackageMeta::default());
        assert_eq!(
            fragment.plugin_names(),
            [
                "copy-webpack-plugin",
                "html-webpack-plugin",
                "webpack-manifest-plugin"
            ]
        );

        match &fragment.plugins[0] {
            Plugin::Copy(patterns) => {
                assert_eq!(patterns[0].from, PathBuf::from("/project/src/img"));
                assert_eq!(patterns[0].to, PathBuf::from("/project/dist/img"));
            }
            other => panic!("unexpected plugin: {other:?}"),
        }
    }

    #[test]
    fn modern_has_only_its_manifest() {
        let fragment = modern_fragment(&Settings::default(), &PackageMeta::default());
        match &fragment.plugins[..] {
            [Plugin::Manifest(options)] => assert_eq!(options.file_name, "manifest.json"),
            other => panic!("unexpected plugins: {other:?}"),
        }
    }
}
