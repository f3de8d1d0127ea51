//! twinpack CLI entry point: parses arguments, installs logging and
//! dispatches to a command.

use clap::Parser;
use miette::Result;
use twinpack_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(config_args),
        cli::Command::Compress(compress_args) => commands::compress_execute(compress_args),
        cli::Command::Settings(settings_args) => commands::settings_execute(settings_args),
    };

    result.map_err(error::cli_error_to_miette)
}
