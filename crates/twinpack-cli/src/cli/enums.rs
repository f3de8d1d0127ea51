use clap::ValueEnum;
use twinpack_bundler::{BuildMode, BuildVariant};

/// Build profile
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Mode {
    /// Inline source maps, hot reload and the dev server
    #[value(name = "development", alias = "dev")]
    Development,

    /// Hashed filenames, minification, compression and critical CSS
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Browser generation
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Variant {
    /// Older browsers
    #[value(name = "legacy")]
    Legacy,

    /// Evergreen browsers
    #[value(name = "modern")]
    Modern,
}

impl From<Mode> for BuildMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Development => BuildMode::Development,
            Mode::Production => BuildMode::Production,
        }
    }
}

impl From<Variant> for BuildVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Legacy => BuildVariant::Legacy,
            Variant::Modern => BuildVariant::Modern,
        }
    }
}
