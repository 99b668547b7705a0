//! Command-line interface for the `bidx` tool.

pub mod commands;
