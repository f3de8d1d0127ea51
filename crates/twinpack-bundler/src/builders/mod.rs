//! Configuration builders.
//!
//! A variant's configuration is built in three layers:
//!
//! 1. [`base_fragment`]: shared by both variants
//! 2. [`variant_fragment`]: transpilation targets and manifests, merged over
//!    the base with rules and plugins prepended
//! 3. a development or production profile, merged over the result with
//!    rules and plugins appended

pub mod base;
pub mod dev;
pub mod prod;
pub mod variant;

use serde::Serialize;
use tracing::debug;
use twinpack_config::{PackageMeta, Settings};

use crate::assets::BuildInfo;
use crate::fragment::{CssLoaderOptions, FileOptions, Fragment, Loader, PostcssOptions, Rule};
use crate::merge::{MergeStrategy, merge};
use crate::variant::{BuildMode, BuildVariant};

pub use base::base_fragment;
pub use dev::{coerce_flag, development_config, development_configs};
pub use prod::{configure_critical_css, production_config, production_configs};
pub use variant::{
    configure_babel_loader, configure_manifest, legacy_fragment, modern_fragment,
    variant_fragment,
};

/// Stylesheets in any of the supported source syntaxes.
pub const STYLE_TEST: &str = r"\.(scss|pcss|css)$";

/// Raster and vector images, matched case-insensitively.
pub const IMAGE_TEST: &str = r"(?i)\.(png|jpe?g|gif|svg|webp)$";

/// One composed configuration, tagged with its variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantConfig {
    pub variant: BuildVariant,
    pub config: Fragment,
}

/// Base and variant layers merged, before any profile is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfigs {
    pub legacy: Fragment,
    pub modern: Fragment,
}

impl VariantConfigs {
    pub fn get(&self, variant: BuildVariant) -> &Fragment {
        match variant {
            BuildVariant::Legacy => &self.legacy,
            BuildVariant::Modern => &self.modern,
        }
    }
}

/// Merge the base fragment with each variant layer.
pub fn compose_variants(settings: &Settings, package: &PackageMeta) -> VariantConfigs {
    let base = base_fragment(settings, package);
    let strategy = MergeStrategy::prepend_rules_and_plugins();

    VariantConfigs {
        legacy: merge(base.clone(), legacy_fragment(settings, package), strategy),
        modern: merge(base, modern_fragment(settings, package), strategy),
    }
}

/// Both final configurations for `mode`, legacy first.
pub fn compose(
    mode: BuildMode,
    settings: &Settings,
    package: &PackageMeta,
    build_info: &BuildInfo,
) -> Vec<VariantConfig> {
    let [legacy, modern] = match mode {
        BuildMode::Development => development_configs(settings, package),
        BuildMode::Production => production_configs(settings, package, build_info),
    };
    debug!(%mode, "Composed configurations");

    vec![
        VariantConfig {
            variant: BuildVariant::Legacy,
            config: legacy,
        },
        VariantConfig {
            variant: BuildVariant::Modern,
            config: modern,
        },
    ]
}

/// css -> resolve-url -> sass -> postcss, after the given head loader.
pub(crate) fn style_chain(head: Loader) -> Rule {
    Rule::new(STYLE_TEST)
        .loader(head)
        .loader(Loader::Css(CssLoaderOptions {
            import_loaders: 2,
            source_map: true,
        }))
        .loader(Loader::ResolveUrl)
        .loader(Loader::Sass)
        .loader(Loader::Postcss(PostcssOptions { source_map: true }))
}

/// Styles consumed without output.
pub(crate) fn ignored_styles() -> Rule {
    Rule::new(STYLE_TEST).loader(Loader::Ignore)
}

pub(crate) fn image_file_loader() -> Loader {
    Loader::File(FileOptions {
        name: "img/[name].[hash].[ext]".into(),
    })
}
