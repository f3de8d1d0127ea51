//! End-to-end composition of the four variant/mode configurations.

mod helpers;

use std::path::PathBuf;

use twinpack_bundler::fragment::{CacheGroup, Loader, Plugin};
use twinpack_bundler::{
    BuildMode, BuildVariant, Devtool, compose, development_configs, production_configs,
};
use twinpack_config::EnvOverrides;

use helpers::{build_info, package, settings_at};

#[test]
fn dev_legacy_ignores_styles_and_dev_modern_injects_them() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, modern] = development_configs(&settings, &package());

    let legacy_styles = legacy.rule_for("src/css/app.scss").unwrap();
    assert_eq!(legacy_styles.uses, vec![Loader::Ignore]);

    let modern_styles = modern.rule_for("src/css/app.pcss").unwrap();
    assert_eq!(
        modern_styles.loader_names(),
        [
            "style-loader",
            "css-loader",
            "resolve-url-loader",
            "sass-loader",
            "postcss-loader"
        ]
    );
}

#[test]
fn dev_rule_order_is_variant_base_profile() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, modern] = development_configs(&settings, &package());

    let legacy_loaders: Vec<_> = legacy.rules().iter().map(|r| r.loader_names()[0]).collect();
    assert_eq!(
        legacy_loaders,
        ["babel-loader", "file-loader", "ignore-loader", "file-loader"]
    );

    let modern_loaders: Vec<_> = modern.rules().iter().map(|r| r.loader_names()[0]).collect();
    assert_eq!(
        modern_loaders,
        [
            "babel-loader",
            "file-loader",
            "eslint-loader",
            "style-loader",
            "file-loader"
        ]
    );

    assert_eq!(
        legacy.plugin_names(),
        [
            "copy-webpack-plugin",
            "html-webpack-plugin",
            "webpack-manifest-plugin",
            "webpack-notifier",
            "webpack.HotModuleReplacementPlugin"
        ]
    );
}

#[test]
fn dev_server_follows_environment() {
    let settings = settings_at(&PathBuf::from("/site")).with_env(EnvOverrides::from_pairs([
        ("DEV_SERVER_PUBLIC", "https://site.test:9000"),
        ("DEV_SERVER_POLL", "1"),
    ]));
    let [legacy, _] = development_configs(&settings, &package());

    let server = legacy.dev_server.as_ref().unwrap();
    assert_eq!(server.public, "https://site.test:9000");
    assert_eq!(server.content_base, PathBuf::from("/site/public"));
    assert!(server.watch_options.poll);
    assert!(!server.https);
    assert_eq!(
        legacy.output.public_path.as_deref(),
        Some("https://site.test:9000/")
    );
}

#[test]
fn production_filenames_use_chunk_hashes() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, modern] = production_configs(&settings, &package(), &build_info());

    assert_eq!(
        legacy.output.filename.as_deref(),
        Some("js/[name]-legacy.[chunkhash].js")
    );
    assert_eq!(
        modern.output.filename.as_deref(),
        Some("js/[name].[chunkhash].js")
    );
    assert_eq!(legacy.devtool, Some(Devtool::SourceMap));
    // base output survives the profile layer
    assert_eq!(legacy.output.path, Some(PathBuf::from("/site/dist")));
    assert_eq!(legacy.output.public_path.as_deref(), Some("/dist/"));
}

#[test]
fn production_plugin_order() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, modern] = production_configs(&settings, &package(), &build_info());

    assert_eq!(
        legacy.plugin_names(),
        [
            "copy-webpack-plugin",
            "html-webpack-plugin",
            "webpack-manifest-plugin",
            "webpack-notifier",
            "mini-css-extract-plugin",
            "webpack.BannerPlugin",
            "favicons-webpack-plugin",
            "save-remote-file-webpack-plugin",
            "compression-webpack-plugin",
            "webpack-bundle-analyzer",
            "critical-css-webpack-plugin"
        ]
    );
    assert_eq!(
        modern.plugin_names(),
        [
            "webpack-manifest-plugin",
            "webpack-notifier",
            "clean-webpack-plugin",
            "webpack.BannerPlugin",
            "imagemin-webp-webpack-plugin",
            "workbox-webpack-plugin.GenerateSW",
            "compression-webpack-plugin",
            "webpack-bundle-analyzer"
        ]
    );
}

#[test]
fn service_worker_options_use_plugin_key_names() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [_, modern] = production_configs(&settings, &package(), &build_info());

    let value = modern.to_value().unwrap();
    let workbox = value["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .find(|plugin| plugin["plugin"] == "workbox-webpack-plugin.GenerateSW")
        .unwrap();

    let options = &workbox["options"];
    assert_eq!(options["swDest"], "../sw.js");
    assert_eq!(options["offlineGoogleAnalytics"], true);
    assert!(options.get("sw_dest").is_none());

    let images = &options["runtimeCaching"][0];
    assert_eq!(images["handler"], "cacheFirst");
    assert_eq!(images["options"]["cacheName"], "images");
    assert_eq!(images["options"]["expiration"]["maxEntries"], 20);
}

#[test]
fn production_legacy_extracts_css_and_modern_drops_it() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, modern] = production_configs(&settings, &package(), &build_info());

    let legacy_styles = legacy.rule_for("src/css/app.css").unwrap();
    assert_eq!(legacy_styles.uses[0], Loader::MiniCssExtract);
    assert_eq!(
        modern.rule_for("src/css/app.css").unwrap().uses,
        vec![Loader::Ignore]
    );

    let groups = &legacy
        .optimization
        .as_ref()
        .unwrap()
        .split_chunks
        .as_ref()
        .unwrap()
        .cache_groups;
    assert!(matches!(groups["styles"], CacheGroup::Enabled(_)));
}

#[test]
fn analyzer_reports_are_per_variant() {
    let settings = settings_at(&PathBuf::from("/site"));
    let configs = compose(BuildMode::Production, &settings, &package(), &build_info());

    for entry in &configs {
        let report = entry
            .config
            .plugins
            .iter()
            .find_map(|plugin| match plugin {
                Plugin::BundleAnalyzer(options) => Some(options.report_filename.as_str()),
                _ => None,
            })
            .unwrap();
        assert_eq!(report, entry.variant.report_file());
    }
    assert_eq!(configs[0].variant, BuildVariant::Legacy);
}

#[test]
fn banner_carries_build_info() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, _] = production_configs(&settings, &package(), &build_info());

    let banner = legacy
        .plugins
        .iter()
        .find_map(|plugin| match plugin {
            Plugin::Banner(options) => Some(options),
            _ => None,
        })
        .unwrap();
    assert!(banner.raw);
    assert!(banner.banner.contains("@release        3f786850e387550fdab836ed7e6dc881de23001b [main]"));
    assert!(banner.banner.contains("@name           [filebase]"));
}

#[test]
fn serialized_configuration_round_trips() {
    let settings = settings_at(&PathBuf::from("/site"));
    let [legacy, _] = production_configs(&settings, &package(), &build_info());

    let value = legacy.to_value().unwrap();
    assert_eq!(value["module"]["rules"][0]["use"][0]["loader"], "babel-loader");
    assert_eq!(value["plugins"][0]["plugin"], "copy-webpack-plugin");
    assert_eq!(value["devtool"], "source-map");

    let back = twinpack_bundler::Fragment::from_value(value).unwrap();
    assert_eq!(back, legacy);
}
