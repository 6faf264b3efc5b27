//! Error types for ontology loading, normalization and assembly

use std::path::PathBuf;

/// Errors raised by the ontology toolkit
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    /// An input file or directory does not exist
    #[error("Ontology source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// An input exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML loader rejected a document
    #[error("Failed to parse YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document could not be rendered back to YAML
    #[error("Failed to serialize YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// A field-injection pass ran before the legacy attribute list was converted
    #[error(
        "Entity '{entity}' still uses the legacy attribute list.\n\
         Run attribute normalization before adding temporal, audit or index metadata."
    )]
    AttributesNotNormalized { entity: String },

    /// A legacy attribute entry could not be parsed and the policy is `reject`
    #[error("Entity '{entity}' has an unparseable legacy attribute: {entry}")]
    MalformedAttribute { entity: String, entry: String },

    /// A document or directory yielded no entities
    #[error("No entities found in {0}")]
    NoEntities(String),

    /// A split-out entity file is missing its header or body
    #[error("Invalid entity file {}: {reason}", path.display())]
    InvalidEntityFile { path: PathBuf, reason: String },

    /// An entity defines a key that its split-out file uses as a header
    #[error("Entity '{entity}' defines its own `{key}` key, which clashes with the entity file header")]
    ReservedEntityKey { entity: String, key: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OntologyError>;
