//! Ontoforge command-line library
//!
//! Subcommand handlers used by the `ontoforge` binary (main.rs).

pub mod commands;
