//! CLI command handlers
//!
//! Argument structures, routing and the `compress`/`deploy` command
//! implementations.

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
