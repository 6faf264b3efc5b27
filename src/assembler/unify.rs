//! Combine the Time & Attendance and Absence ontologies into one module

use chrono::NaiveDate;
use std::path::Path;

use crate::config::UnifyConfig;
use crate::model::{DesignPattern, OntologyDocument, OrderedMap, SubModule, VersionEntry};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::{yaml_io, Result};

#[derive(Debug)]
pub struct UnifyOutcome {
    pub document: OntologyDocument,
    pub report: Option<NormalizeReport>,
}

/// Build the unified document.
///
/// Entities from `primary` come first, then those from `secondary`; a name
/// defined in both keeps its first position and takes the second
/// definition. Each source's entity names become its sub-module's list.
/// `architecture` is carried over from `primary`.
pub fn unify_ontologies(
    primary: &OntologyDocument,
    secondary: &OntologyDocument,
    config: &UnifyConfig,
    today: NaiveDate,
) -> OntologyDocument {
    let mut entities = primary.entities.clone();
    for (name, record) in secondary.entities.iter() {
        entities.insert(name.clone(), record.clone());
    }

    let mut sub_modules = OrderedMap::new();
    for (target, source) in [(&config.primary, primary), (&config.secondary, secondary)] {
        sub_modules.insert(
            target.name.clone(),
            SubModule {
                description: Some(target.description.clone()),
                entities: source.entities.keys().cloned().collect(),
            },
        );
    }

    let design_patterns = config
        .design_patterns
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                DesignPattern {
                    description: Some(p.description.clone()),
                    applies_to: p.applies_to.clone(),
                },
            )
        })
        .collect::<OrderedMap<_>>();

    let mut version_history = vec![VersionEntry {
        version: config.version.clone(),
        date: today.format("%Y-%m-%d").to_string(),
        changes: config.changes.clone(),
    }];
    version_history.extend(config.prior_versions.iter().cloned());

    OntologyDocument {
        module: Some(config.module.clone()),
        code: Some(config.code.clone()),
        description: Some(config.description.clone()),
        sub_modules: Some(sub_modules),
        entities,
        architecture: primary.architecture.clone(),
        design_patterns: Some(design_patterns),
        notes: None,
        version_history: Some(version_history),
        extra: Default::default(),
    }
}

/// Load both sources, unify them and normalize the result when a
/// normalizer is given
pub fn unify_ontology_files(
    primary: &Path,
    secondary: &Path,
    config: &UnifyConfig,
    normalizer: Option<&Normalizer>,
    today: NaiveDate,
) -> Result<UnifyOutcome> {
    let primary = yaml_io::load_document(primary)?;
    let secondary = yaml_io::load_document(secondary)?;

    let mut document = unify_ontologies(&primary, &secondary, config, today);
    let report = match normalizer {
        Some(normalizer) => Some(normalizer.normalize_entities(&mut document.entities)?),
        None => None,
    };

    Ok(UnifyOutcome { document, report })
}
