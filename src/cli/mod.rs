//! CLI layer for clientdb.
//!
//! Provides the command-line interface using clap, with commands for
//! managing the schema, editing clients and phones, and searching.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
