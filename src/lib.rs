//! # Ontoforge
//!
//! Maintenance toolkit for YAML domain ontologies: normalizes entity
//! definitions to a common field schema, splits a monolithic ontology into
//! per-entity files and merges them back, unifies related modules and
//! applies review fixes.
//!
//! The `ontoforge` binary in `ontoforge-cli` drives these passes from the
//! command line.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod yaml_io;

pub use config::OntologyConfig;
pub use error::{OntologyError, Result};
pub use normalize::Normalizer;
