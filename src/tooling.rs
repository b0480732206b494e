//! Tooling & Integration Layer
//!
//! The `pagegraph` command line: build the graph from configuration, query a built graph, and
//! render results as text tables or JSON.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, FindArgs, QueryCommands};
