//! Layered settings for the normalizer and document assemblers.
//!
//! Settings are resolved from, in increasing priority:
//! 1. the bundled `config/default.toml` (the Time & Absence roster),
//! 2. an optional user TOML file,
//! 3. `ONTOFORGE_<SECTION>__<KEY>` environment variables. The list settings
//!    `normalizer.temporal_entities`, `normalizer.foreign_key_fields` and
//!    `merge.entity_order` take comma-separated values there.
//!
//! Entity rosters (which entities are temporal, which layer an entity
//! belongs to, the merge order) live here instead of in code so the
//! normalization logic is not tied to one ontology.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::VersionEntry;
use crate::{OntologyError, Result};

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct OntologyConfig {
    pub normalizer: NormalizerConfig,
    pub split: SplitConfig,
    pub merge: MergeConfig,
    pub unify: UnifyConfig,
    pub fix: FixConfig,
}

impl OntologyConfig {
    /// Bundled defaults only, ignoring files and environment
    pub fn builtin() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Bundled defaults, overlaid with `path` (if given) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));

        if let Some(path) = path {
            if !path.exists() {
                return Err(OntologyError::SourceNotFound(path.to_path_buf()));
            }
            log::debug!("Loading settings overlay from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("ONTOFORGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("normalizer.temporal_entities")
                    .with_list_parse_key("normalizer.foreign_key_fields")
                    .with_list_parse_key("merge.entity_order"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// What to do with a legacy attribute entry that cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedAttributePolicy {
    /// Drop the entry without a trace
    Drop,
    /// Drop the entry and record a diagnostic
    #[default]
    Report,
    /// Fail normalization
    Reject,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizerConfig {
    /// Entities that receive SCD Type 2 versioning fields
    #[serde(default)]
    pub temporal_entities: Vec<String>,
    /// Foreign-key-like fields that get a lookup index, in index order
    #[serde(default)]
    pub foreign_key_fields: Vec<String>,
    #[serde(default)]
    pub malformed_attributes: MalformedAttributePolicy,
}

impl NormalizerConfig {
    pub fn is_temporal(&self, entity: &str) -> bool {
        self.temporal_entities.iter().any(|e| e == entity)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    /// Written as the `version` header of every split-out file
    pub version: String,
    #[serde(default)]
    pub layers: Vec<LayerAssignment>,
}

impl SplitConfig {
    pub fn layer_for(&self, entity: &str) -> Option<&str> {
        self.layers
            .iter()
            .find(|l| l.entities.iter().any(|e| e == entity))
            .map(|l| l.layer.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerAssignment {
    pub layer: String,
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    pub module: String,
    pub description: String,
    #[serde(default)]
    pub header: Vec<String>,
    /// Entity file names in output order; empty means every YAML file in
    /// the directory, sorted by name
    #[serde(default)]
    pub entity_order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnifyConfig {
    pub module: String,
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub header: Vec<String>,
    pub version: String,
    pub changes: String,
    /// Sub-module for the first (Time & Attendance) source
    pub primary: SubModuleTarget,
    /// Sub-module for the second (Absence) source
    pub secondary: SubModuleTarget,
    #[serde(default)]
    pub design_patterns: Vec<NamedPattern>,
    #[serde(default)]
    pub prior_versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubModuleTarget {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub applies_to: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixConfig {
    /// Sub-module that lists synthesized entities
    pub target_sub_module: String,
    #[serde(default)]
    pub header: Vec<String>,
    pub notes_version: String,
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Design pattern whose `applies_to` list is rewritten
    pub ledger_pattern: String,
    #[serde(default)]
    pub ledger_applies_to: Vec<String>,
    #[serde(default)]
    pub cross_module_description: Option<String>,
    #[serde(default)]
    pub cross_module_dependencies: Vec<ModuleDependency>,
    /// Replaces the bundled catalog of synthesized entities
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Keep an existing definition instead of replacing it with the catalog's
    #[serde(default)]
    pub keep_existing: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDependency {
    pub module: String,
    pub entities: Vec<String>,
}

/// Comment block written above a generated document.
/// `{date}` in any line is replaced with `date`.
pub fn render_preamble(lines: &[String], date: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for line in lines {
        out.push_str("# ");
        out.push_str(&line.replace("{date}", date));
        out.push('\n');
    }
    out.push('\n');
    out
}
