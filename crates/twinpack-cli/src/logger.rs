//! Logging setup for the twinpack CLI.
//!
//! `--verbose` turns on debug output for the twinpack crates, `--quiet` keeps
//! errors only, and otherwise `RUST_LOG` is honoured with an info-level
//! fallback. Logs go to stderr so stdout stays clean for JSON.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "twinpack=debug,twinpack_cli=debug,twinpack_bundler=debug,twinpack_config=debug";
const QUIET_FILTER: &str = "twinpack=error,twinpack_cli=error,twinpack_bundler=error,twinpack_config=error";
const DEFAULT_FILTER: &str =
    "twinpack=info,twinpack_cli=info,twinpack_bundler=info,twinpack_config=info";

/// Initialize the tracing subscriber.
///
/// Call once at program start. A second call is ignored.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_ansi(!no_color && should_use_colors())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether stderr should get ANSI colors.
///
/// `NO_COLOR` disables and `FORCE_COLOR` enables; otherwise the terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}
