//! CLI module for netwatch - command-line arguments.
//!
//! Every flag is optional and overrides the matching config file value.

pub mod args;

pub use args::Cli;
