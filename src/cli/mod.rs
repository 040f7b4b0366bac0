//! Interactive shell standing in for the presentation layer.

pub mod commands;
pub mod core;
pub mod formatting;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use self::core::{CliMode, CommandError, CommandResult, LoopControl, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
