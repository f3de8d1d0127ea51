//! twinpack CLI: composes the legacy and modern bundler configurations of a
//! project and post-processes its build output.
//!
//! - [`cli`] - argument definitions
//! - `commands` - one module per subcommand
//! - [`error`] - `CliError` and its conversion to diagnostics
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - status lines on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
