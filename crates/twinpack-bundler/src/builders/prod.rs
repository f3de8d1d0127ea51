//! Production profile: hashed filenames, minification, compression and the
//! per-variant asset pipeline.
//!
//! Legacy owns the stylesheet output (extraction, critical CSS, favicons);
//! modern owns image optimization and the service worker.

use indexmap::IndexMap;
use tracing::{debug, info};
use twinpack_config::{PackageMeta, Settings};

use super::{IMAGE_TEST, STYLE_TEST, compose_variants, ignored_styles, image_file_loader, style_chain};
use crate::assets::{Banner, BuildInfo};
use crate::fragment::{
    AnalyzerMode, AnalyzerOptions, BannerOptions, CacheGroup, CacheGroupOptions, ChunkSelection,
    CleanOptions, CompressionAlgorithmOptions, CompressionOptions, CriticalCssOptions,
    CssExtractOptions, CssMapOptions, CssMinimizerOptions, Devtool, ExpirationOptions,
    FaviconMeta, FaviconOptions, Fragment, Gifsicle, ImageOptimizers, Loader, Minimizer,
    ModuleOptions, Mozjpeg, Optimization, Optipng, Output, Plugin, Rule, RuntimeCaching,
    RuntimeCachingOptions, SplitChunks, Svgo, TerserOptions, WorkboxOptions,
};
use crate::merge::{MergeStrategy, merge};
use crate::variant::{BuildMode, BuildVariant};

pub fn configure_banner(info: &BuildInfo) -> BannerOptions {
    BannerOptions {
        banner: Banner::new(info).render().to_string(),
        raw: true,
    }
}

pub fn configure_bundle_analyzer(variant: BuildVariant) -> AnalyzerOptions {
    AnalyzerOptions {
        analyzer_mode: AnalyzerMode::Static,
        report_filename: variant.report_file().to_string(),
    }
}

pub fn configure_compression(settings: &Settings) -> CompressionOptions {
    let compression = &settings.compression;
    CompressionOptions {
        filename: "[path].gz[query]".into(),
        algorithm: "gzip".into(),
        test: compression.test.clone(),
        threshold: compression.threshold,
        min_ratio: compression.min_ratio,
        delete_original_assets: false,
        compression_options: CompressionAlgorithmOptions {
            level: compression.level,
        },
    }
}

/// One extraction job per configured page.
///
/// Templates containing the AMP prefix use the AMP viewport.
pub fn configure_critical_css(settings: &Settings) -> Vec<CriticalCssOptions> {
    let critical = &settings.critical_css;

    critical
        .pages
        .iter()
        .map(|page| {
            let src = format!("{}{}", settings.urls.critical, page.url);
            let dest = format!("{}{}{}", critical.base, page.template, critical.suffix);

            let (width, height) = if page.template.contains(&critical.amp_prefix) {
                (critical.amp_critical_width, critical.amp_critical_height)
            } else {
                (critical.critical_width, critical.critical_height)
            };

            info!(source = %src, dest = %dest, "Critical CSS job");

            CriticalCssOptions {
                base: "./".into(),
                src,
                dest,
                extract: false,
                inline: false,
                minify: true,
                width,
                height,
            }
        })
        .collect()
}

pub fn configure_clean(settings: &Settings) -> CleanOptions {
    CleanOptions {
        clean_once_before_patterns: settings.paths.dist.clean.clone(),
        verbose: true,
        dry: false,
    }
}

/// File loader for both variants; modern adds recompression.
pub fn configure_image_loader(variant: BuildVariant) -> Rule {
    let rule = Rule::new(IMAGE_TEST).loader(image_file_loader());
    match variant {
        BuildVariant::Legacy => rule,
        BuildVariant::Modern => rule.loader(Loader::Img(ImageOptimizers {
            gifsicle: Gifsicle { interlaced: true },
            mozjpeg: Mozjpeg {
                progressive: true,
                arithmetic: false,
            },
            optipng: Optipng {
                optimization_level: 5,
            },
            svgo: Svgo {
                convert_path_data: false,
            },
        })),
    }
}

/// Legacy extracts styles to files; modern drops them.
pub fn configure_style_loader(variant: BuildVariant) -> Rule {
    match variant {
        BuildVariant::Legacy => style_chain(Loader::MiniCssExtract),
        BuildVariant::Modern => ignored_styles(),
    }
}

pub fn configure_terser() -> TerserOptions {
    TerserOptions {
        cache: true,
        parallel: true,
        source_map: true,
    }
}

pub fn configure_optimization(variant: BuildVariant, settings: &Settings) -> Optimization {
    match variant {
        BuildVariant::Legacy => {
            let cache_groups = IndexMap::from([
                ("default".to_string(), CacheGroup::Toggle(false)),
                ("common".to_string(), CacheGroup::Toggle(false)),
                (
                    "styles".to_string(),
                    CacheGroup::Enabled(CacheGroupOptions {
                        name: settings.vars.css_name.clone(),
                        test: STYLE_TEST.to_string(),
                        chunks: ChunkSelection::All,
                        enforce: true,
                    }),
                ),
            ]);

            Optimization {
                split_chunks: Some(SplitChunks { cache_groups }),
                minimizer: vec![
                    Minimizer::Terser(configure_terser()),
                    Minimizer::Css(CssMinimizerOptions {
                        map: CssMapOptions {
                            inline: false,
                            annotation: true,
                        },
                        safe: true,
                        discard_comments: true,
                    }),
                ],
            }
        }
        BuildVariant::Modern => Optimization {
            split_chunks: None,
            minimizer: vec![Minimizer::Terser(configure_terser())],
        },
    }
}

pub fn configure_favicon(settings: &Settings, package: &PackageMeta) -> FaviconOptions {
    FaviconOptions {
        logo: settings.resolve(&settings.favicon.logo),
        prefix: settings.favicon.prefix.clone(),
        cache: false,
        inject: true,
        favicons: FaviconMeta {
            app_name: package.name.clone(),
            app_description: package.description.clone(),
            developer_name: package.author.name.clone(),
            developer_url: package.author.url.clone(),
            path: settings.paths.dist.base.clone(),
        },
    }
}

pub fn configure_workbox(settings: &Settings) -> WorkboxOptions {
    let workbox = &settings.workbox;
    WorkboxOptions {
        sw_dest: workbox.sw_dest.clone(),
        precache_manifest_filename: workbox.precache_manifest_filename.clone(),
        import_scripts: workbox.import_scripts.clone(),
        exclude: workbox.exclude.clone(),
        glob_directory: workbox.glob_directory.clone(),
        glob_patterns: workbox.glob_patterns.clone(),
        offline_google_analytics: workbox.offline_google_analytics,
        runtime_caching: workbox
            .runtime_caching
            .iter()
            .map(|cache| RuntimeCaching {
                url_pattern: cache.url_pattern.clone(),
                handler: cache.handler,
                options: RuntimeCachingOptions {
                    cache_name: cache.options.cache_name.clone(),
                    expiration: ExpirationOptions {
                        max_entries: cache.options.expiration.max_entries,
                    },
                },
            })
            .collect(),
    }
}

fn configure_plugins(
    variant: BuildVariant,
    settings: &Settings,
    package: &PackageMeta,
    info: &BuildInfo,
) -> Vec<Plugin> {
    let banner = Plugin::Banner(configure_banner(info));
    let compression = Plugin::Compression(configure_compression(settings));
    let analyzer = Plugin::BundleAnalyzer(configure_bundle_analyzer(variant));

    match variant {
        BuildVariant::Legacy => {
            let mut plugins = vec![
                Plugin::CssExtract(CssExtractOptions {
                    path: settings.resolve(&settings.paths.dist.base),
                    filename: "css/[name].[chunkhash].css".into(),
                }),
                banner,
                Plugin::Favicons(configure_favicon(settings, package)),
                Plugin::SaveRemoteFile(settings.save_remote_file.clone()),
                compression,
                analyzer,
            ];
            plugins.extend(
                configure_critical_css(settings)
                    .into_iter()
                    .map(Plugin::CriticalCss),
            );
            plugins
        }
        BuildVariant::Modern => vec![
            Plugin::Clean(configure_clean(settings)),
            banner,
            Plugin::ImageminWebp,
            Plugin::GenerateSw(configure_workbox(settings)),
            compression,
            analyzer,
        ],
    }
}

fn profile_fragment(
    variant: BuildVariant,
    settings: &Settings,
    package: &PackageMeta,
    info: &BuildInfo,
) -> Fragment {
    Fragment {
        mode: Some(BuildMode::Production),
        output: Output {
            filename: Some(format!(
                "js/[name]{}.[chunkhash].js",
                variant.bundle_suffix()
            )),
            ..Output::default()
        },
        devtool: Some(Devtool::SourceMap),
        optimization: Some(configure_optimization(variant, settings)),
        module: ModuleOptions {
            rules: vec![
                configure_style_loader(variant),
                configure_image_loader(variant),
            ],
        },
        plugins: configure_plugins(variant, settings, package, info),
        ..Fragment::default()
    }
}

/// Layer the production profile over a merged base+variant configuration.
pub fn production_config(
    variant: BuildVariant,
    merged: Fragment,
    settings: &Settings,
    package: &PackageMeta,
    info: &BuildInfo,
) -> Fragment {
    let profile = profile_fragment(variant, settings, package, info);
    let config = merge(merged, profile, MergeStrategy::default());
    debug!(
        %variant,
        rules = config.rules().len(),
        plugins = ?config.plugin_names(),
        "Composed production configuration"
    );
    config
}

/// Production configurations, legacy then modern.
pub fn production_configs(
    settings: &Settings,
    package: &PackageMeta,
    info: &BuildInfo,
) -> [Fragment; 2] {
    let merged = compose_variants(settings, package);
    [
        production_config(BuildVariant::Legacy, merged.legacy, settings, package, info),
        production_config(BuildVariant::Modern, merged.modern, settings, package, info),
    ]
}
