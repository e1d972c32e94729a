//! Interactive command front-end: shell loop, dispatch, and output helpers.

pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod shell;

pub use context::{CliMode, ShellContext};
pub use shell::run_cli;
