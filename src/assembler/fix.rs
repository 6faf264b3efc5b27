//! Review-fix pass: install catalog entities, normalize everything, stamp notes

use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::config::FixConfig;
use crate::model::{EntityDocument, OntologyDocument};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::{catalog, yaml_io, Result};

#[derive(Debug)]
pub struct FixOutcome {
    pub document: OntologyDocument,
    pub report: NormalizeReport,
    /// Catalog entities that were not yet defined
    pub added: Vec<String>,
    /// Existing entities overwritten with the catalog definition
    pub replaced: Vec<String>,
}

/// Apply the review fixes to `document`.
///
/// 1. every catalog entity is installed, replacing a same-named definition
///    in place unless `config.keep_existing` is set, and listed once in
///    `config.target_sub_module` (when that sub-module exists);
/// 2. all entities, catalog ones included, are normalized;
/// 3. `notes` is replaced with the maintenance metadata;
/// 4. the configured ledger pattern's `applies_to` is rewritten if the
///    pattern exists.
///
/// Running it again on its own output yields the same document apart from
/// `notes.last_updated`.
pub fn fix_ontology(
    mut document: OntologyDocument,
    catalog: &EntityDocument,
    config: &FixConfig,
    normalizer: &Normalizer,
    today: NaiveDate,
) -> Result<FixOutcome> {
    let mut added = Vec::new();
    let mut replaced = Vec::new();
    for (name, record) in catalog.iter() {
        if document.entities.contains_key(name) {
            if config.keep_existing {
                log::debug!("{} already defined, keeping existing definition", name);
            } else {
                log::info!("Replacing {} with the catalog definition", name);
                document.entities.insert(name.clone(), record.clone());
                replaced.push(name.clone());
            }
        } else {
            log::info!("Adding {}", name);
            document.entities.insert(name.clone(), record.clone());
            added.push(name.clone());
        }

        if !document.assign_to_sub_module(&config.target_sub_module, name) {
            log::warn!(
                "Sub-module {} not found, {} is not listed in any sub-module",
                config.target_sub_module,
                name
            );
        }
    }

    let report = normalizer.normalize_entities(&mut document.entities)?;

    document.notes = Some(build_notes(config, today));

    if let Some(pattern) = document
        .design_patterns
        .as_mut()
        .and_then(|patterns| patterns.get_mut(&config.ledger_pattern))
    {
        pattern.applies_to = config.ledger_applies_to.clone();
    }

    Ok(FixOutcome {
        document,
        report,
        added,
        replaced,
    })
}

/// Load `input`, apply the fixes with the configured catalog and return the
/// outcome; writing is left to the caller
pub fn fix_ontology_file(
    input: &Path,
    config: &FixConfig,
    normalizer: &Normalizer,
    today: NaiveDate,
) -> Result<FixOutcome> {
    let document = yaml_io::load_document(input)?;
    let catalog = catalog::load(config.catalog_path.as_deref())?;
    fix_ontology(document, &catalog, config, normalizer, today)
}

fn build_notes(config: &FixConfig, today: NaiveDate) -> Value {
    let mut notes = Mapping::new();
    notes.insert("version".into(), config.notes_version.clone().into());
    notes.insert("last_updated".into(), today.format("%Y-%m-%d").to_string().into());
    notes.insert("improvements".into(), string_list(&config.improvements));

    let mut dependencies = Mapping::new();
    for dependency in &config.cross_module_dependencies {
        dependencies.insert(dependency.module.clone().into(), string_list(&dependency.entities));
    }
    if let Some(description) = &config.cross_module_description {
        dependencies.insert("description".into(), description.clone().into());
    }
    if !dependencies.is_empty() {
        notes.insert("cross_module_dependencies".into(), Value::Mapping(dependencies));
    }

    Value::Mapping(notes)
}

fn string_list(items: &[String]) -> Value {
    Value::Sequence(items.iter().cloned().map(Value::from).collect())
}
