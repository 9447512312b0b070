//! Command shell that wires user input to the booking flow.

pub mod commands;
pub mod core;
mod io;
pub mod output;
pub mod render;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
