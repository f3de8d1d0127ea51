//! Command-line interface definition.
//!
//! - `twinpack config` - compose and print the bundler configurations
//! - `twinpack compress` - write gzip siblings for build output
//! - `twinpack settings` - print the effective settings

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{Command, CompressArgs, ConfigArgs, SettingsArgs};
pub use enums::*;

/// twinpack - legacy/modern bundler configuration composer
#[derive(Parser, Debug)]
#[command(
    name = "twinpack",
    version,
    about = "Compose legacy and modern bundler configurations",
    long_about = "twinpack builds two bundler configurations for one project: a legacy\n\
                  build for older browsers and a modern build for evergreen browsers.\n\
                  Settings come from twinpack.toml, package.json and the environment."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from([
            "twinpack", "config", "--mode", "production", "--variant", "modern",
        ])
        .unwrap();

        match cli.command {
            Command::Config(args) => {
                assert_eq!(args.mode, Mode::Production);
                assert_eq!(args.variant, Some(Variant::Modern));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mode_defaults_to_development() {
        let cli = Cli::try_parse_from(["twinpack", "config"]).unwrap();
        let Command::Config(args) = cli.command else {
            panic!("expected config command");
        };
        assert_eq!(args.mode, Mode::Development);
        assert_eq!(args.variant, None);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["twinpack", "-v", "-q", "settings"]).is_err());
    }
}
