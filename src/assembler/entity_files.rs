//! Split a monolithic ontology into one file per entity, and merge such
//! files back into a single document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{MergeConfig, SplitConfig};
use crate::model::{EntityFile, OntologyDocument};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::{yaml_io, OntologyError, Result};

/// `LeaveType` -> `leave-type.yaml`
///
/// A dash goes before every upper-case letter except a leading one, so
/// acronyms are spelled out letter by letter (`HTTPRule` -> `h-t-t-p-rule`).
pub fn entity_file_name(entity: &str) -> String {
    let mut name = String::with_capacity(entity.len() + 8);
    for c in entity.chars() {
        if c.is_uppercase() && !name.is_empty() {
            name.push('-');
        }
        name.extend(c.to_lowercase());
    }
    name.push_str(".yaml");
    name
}

/// One split-out file, ready to write
#[derive(Debug, Clone)]
pub struct SplitEntity {
    pub file_name: String,
    pub file: EntityFile,
}

/// Partition a document into per-entity files. Records are copied as-is;
/// a record that defines a header key of its own is an error.
pub fn split_ontology(document: &OntologyDocument, config: &SplitConfig) -> Result<Vec<SplitEntity>> {
    if document.entities.is_empty() {
        return Err(OntologyError::NoEntities("the ontology document".to_string()));
    }

    document
        .entities
        .iter()
        .map(|(name, record)| {
            if let Some(key) = EntityFile::header_clash(record) {
                return Err(OntologyError::ReservedEntityKey {
                    entity: name.clone(),
                    key: key.to_string(),
                });
            }
            Ok(SplitEntity {
                file_name: entity_file_name(name),
                file: EntityFile {
                    entity: name.clone(),
                    version: Some(config.version.clone()),
                    layer: config.layer_for(name).map(str::to_string),
                    record: record.clone(),
                },
            })
        })
        .collect()
}

/// Split `input` into `output_dir`, returning the paths written
pub fn split_ontology_file(input: &Path, output_dir: &Path, config: &SplitConfig) -> Result<Vec<PathBuf>> {
    let document = yaml_io::load_document(input)?;
    let entities = split_ontology(&document, config).map_err(|err| match err {
        OntologyError::NoEntities(_) => OntologyError::NoEntities(input.display().to_string()),
        other => other,
    })?;

    let mut written = Vec::with_capacity(entities.len());
    for split in &entities {
        let path = output_dir.join(&split.file_name);
        yaml_io::write_text(&path, &split.file.render()?)?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Result of merging a directory of entity files
#[derive(Debug)]
pub struct MergeOutcome {
    pub document: OntologyDocument,
    /// Entity names in output order
    pub merged: Vec<String>,
    /// Listed in the merge order but not found on disk
    pub missing: Vec<String>,
    /// Present on disk but not listed in the merge order
    pub unlisted: Vec<String>,
    pub report: Option<NormalizeReport>,
}

/// Merge entity files from `dir` into one document.
///
/// Files are read in `config.entity_order`; an empty order means every
/// `.yaml`/`.yml` file in the directory, sorted by name. The `version` and
/// `layer` headers are dropped. The merged entities are normalized when a
/// normalizer is given.
pub fn merge_entity_files(
    dir: &Path,
    config: &MergeConfig,
    normalizer: Option<&Normalizer>,
) -> Result<MergeOutcome> {
    if !dir.is_dir() {
        return Err(OntologyError::SourceNotFound(dir.to_path_buf()));
    }
    let on_disk = yaml_files_in(dir)?;

    let order = if config.entity_order.is_empty() {
        on_disk.clone()
    } else {
        config.entity_order.clone()
    };

    let mut document = OntologyDocument {
        module: Some(config.module.clone()),
        description: Some(config.description.clone()),
        ..Default::default()
    };
    let mut merged = Vec::new();
    let mut missing = Vec::new();

    for file_name in &order {
        let path = dir.join(file_name);
        if !path.is_file() {
            log::warn!("{} not found, skipping", file_name);
            missing.push(file_name.clone());
            continue;
        }

        let file: EntityFile = yaml_io::load_yaml(&path)?;
        let entity = file.entity.trim().to_string();
        if entity.is_empty() {
            return Err(OntologyError::InvalidEntityFile {
                path,
                reason: "empty `entity` header".to_string(),
            });
        }

        log::info!("Added {} from {}", entity, file_name);
        document.entities.insert(entity.clone(), file.record);
        merged.push(entity);
    }

    let unlisted: Vec<String> = on_disk.into_iter().filter(|f| !order.contains(f)).collect();
    for file_name in &unlisted {
        log::warn!("{} is not in the merge order, skipping", file_name);
    }

    if document.entities.is_empty() {
        return Err(OntologyError::NoEntities(dir.display().to_string()));
    }

    let report = match normalizer {
        Some(normalizer) => Some(normalizer.normalize_entities(&mut document.entities)?),
        None => None,
    };

    Ok(MergeOutcome {
        document,
        merged,
        missing,
        unlisted,
        report,
    })
}

/// YAML file names directly inside `dir`, sorted
fn yaml_files_in(dir: &Path) -> Result<Vec<String>> {
    let read_err = |source| OntologyError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"));
        if !path.is_file() || !is_yaml {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
