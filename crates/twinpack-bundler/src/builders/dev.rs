//! Development profile: inline source maps, hot reload and the dev server.

use indexmap::IndexMap;
use tracing::debug;
use twinpack_config::{PackageMeta, Settings};

use super::variant::SCRIPT_TEST;
use super::{IMAGE_TEST, compose_variants, ignored_styles, image_file_loader, style_chain};
use crate::fragment::{
    DevServer, Devtool, Enforce, EslintOptions, Fragment, Loader, ModuleOptions, Output, Plugin,
    Rule, WatchOptions,
};
use crate::merge::{MergeStrategy, merge};
use crate::variant::{BuildMode, BuildVariant};

/// Integer-prefix truthiness of an environment flag.
///
/// Parses an optional sign and a run of decimal digits (or hex after `0x`)
/// following leading whitespace; the flag is set when that number exists and
/// is non-zero. `"1"` and `"0x10"` are set; `"0"`, `"true"` and `""` are not.
pub fn coerce_flag(value: &str) -> bool {
    let s = value.trim_start();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    let run: String = digits.chars().take_while(|c| c.is_digit(radix)).collect();
    run.chars().any(|c| c != '0')
}

/// Dev server descriptor from the environment-aware settings.
pub fn configure_dev_server(settings: &Settings) -> DevServer {
    DevServer {
        public: settings.dev_server_public().to_string(),
        content_base: settings.resolve(&settings.paths.assets),
        host: settings.dev_server_host().to_string(),
        port: settings.dev_server_port().to_string(),
        https: coerce_flag(settings.dev_server_https()),
        disable_host_check: true,
        hot: true,
        overlay: true,
        inline: true,
        open: true,
        quiet: true,
        watch_content_base: true,
        watch_options: WatchOptions {
            poll: coerce_flag(settings.dev_server_poll()),
            ignored: "node_modules".into(),
        },
        headers: IndexMap::from([("Access-Control-Allow-Origin".to_string(), "*".to_string())]),
    }
}

/// Lint pass over project scripts, run before any other loader.
pub fn configure_linting(settings: &Settings) -> Rule {
    Rule::new(SCRIPT_TEST)
        .include(settings.resolve(&settings.paths.src.base))
        .enforce(Enforce::Pre)
        .loader(Loader::Eslint(EslintOptions { emit_warning: true }))
}

pub fn configure_image_loader() -> Rule {
    Rule::new(IMAGE_TEST).loader(image_file_loader())
}

/// Legacy drops styles; modern injects them at runtime.
pub fn configure_style_loader(variant: BuildVariant) -> Rule {
    match variant {
        BuildVariant::Legacy => ignored_styles(),
        BuildVariant::Modern => style_chain(Loader::Style),
    }
}

fn profile_fragment(variant: BuildVariant, settings: &Settings) -> Fragment {
    let filename = format!("js/[name]{}.[hash].js", variant.bundle_suffix());

    let rules = match variant {
        BuildVariant::Legacy => vec![configure_style_loader(variant), configure_image_loader()],
        BuildVariant::Modern => vec![
            configure_linting(settings),
            configure_style_loader(variant),
            configure_image_loader(),
        ],
    };

    Fragment {
        mode: Some(BuildMode::Development),
        output: Output {
            path: None,
            public_path: Some(format!("{}/", settings.dev_server_public())),
            filename: Some(filename),
        },
        module: ModuleOptions { rules },
        plugins: vec![Plugin::HotModuleReplacement],
        devtool: Some(Devtool::InlineSourceMap),
        dev_server: Some(configure_dev_server(settings)),
        ..Fragment::default()
    }
}

/// Layer the development profile over a merged base+variant configuration.
pub fn development_config(variant: BuildVariant, merged: Fragment, settings: &Settings) -> Fragment {
    let config = merge(merged, profile_fragment(variant, settings), MergeStrategy::default());
    debug!(
        %variant,
        rules = config.rules().len(),
        plugins = config.plugins.len(),
        "Composed development configuration"
    );
    config
}

/// Development configurations, legacy then modern.
pub fn development_configs(settings: &Settings, package: &PackageMeta) -> [Fragment; 2] {
    let merged = compose_variants(settings, package);
    [
        development_config(BuildVariant::Legacy, merged.legacy, settings),
        development_config(BuildVariant::Modern, merged.modern, settings),
    ]
}
