//! Subcommand implementations.

pub mod get;
pub mod list;
pub mod serve;
