//! CLI subcommand implementations.

pub mod fx;
pub mod quote;
