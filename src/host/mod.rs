//! Terminal host - parses the command line, loads collections and prints
//! the rendered pages.

pub mod commands;
pub mod render;

pub use commands::{Cli, Command, Console, ListArgs, SourceKind};
