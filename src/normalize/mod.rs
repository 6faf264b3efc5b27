//! Entity record normalization
//!
//! Four passes bring an entity definition up to the house style:
//! - [`normalize_attributes`]: legacy attribute list -> field mapping
//! - [`add_temporal_versioning_fields`]: SCD Type 2 fields for allow-listed entities
//! - [`add_audit_fields`]: `created_by` / `updated_by`
//! - [`derive_indexes`]: index hints recomputed from field names
//!
//! The last three require the mapping form and fail with
//! [`OntologyError::AttributesNotNormalized`] on a legacy list. [`Normalizer`]
//! runs all four in the required order; every pass is idempotent, so
//! normalizing twice yields the same document as normalizing once.
//!
//! # Example
//!
//! ```
//! use ontoforge::config::NormalizerConfig;
//! use ontoforge::model::EntityRecord;
//! use ontoforge::normalize::Normalizer;
//!
//! let mut record: EntityRecord =
//!     serde_yaml::from_str("attributes:\n  - \"id: UUID (required)\"\n").unwrap();
//! let normalizer = Normalizer::new(NormalizerConfig::default());
//! normalizer.normalize_record("Holiday", &mut record).unwrap();
//!
//! assert!(record.has_field("id"));
//! assert!(record.has_field("created_by"));
//! assert_eq!(record.indexes.unwrap()[0].name, "pk_holiday");
//! ```

pub mod attributes;
pub mod audit;
pub mod indexes;
pub mod temporal;

pub use attributes::{normalize_attributes, AttributeDiagnostic};
pub use audit::add_audit_fields;
pub use indexes::{derive_indexes, indexes_for};
pub use temporal::add_temporal_versioning_fields;

use serde_yaml::Value;

use crate::config::NormalizerConfig;
use crate::model::{Attributes, EntityDocument, EntityRecord, OrderedMap};
use crate::{OntologyError, Result};

/// What one record's normalization changed
#[derive(Debug, Default)]
pub struct RecordOutcome {
    pub converted_fields: usize,
    pub temporal_added: bool,
    pub audit_fields_added: usize,
    pub indexes: usize,
    pub diagnostics: Vec<AttributeDiagnostic>,
}

/// Totals across a document
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub entities: usize,
    pub converted_fields: usize,
    pub temporal_entities: usize,
    pub audit_fields_added: usize,
    pub indexes: usize,
    pub diagnostics: Vec<AttributeDiagnostic>,
}

impl NormalizeReport {
    fn absorb(&mut self, outcome: RecordOutcome) {
        self.entities += 1;
        self.converted_fields += outcome.converted_fields;
        if outcome.temporal_added {
            self.temporal_entities += 1;
        }
        self.audit_fields_added += outcome.audit_fields_added;
        self.indexes += outcome.indexes;
        self.diagnostics.extend(outcome.diagnostics);
    }
}

/// Runs the normalization passes in their required order
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize_record(&self, entity: &str, record: &mut EntityRecord) -> Result<RecordOutcome> {
        let attributes = normalize_attributes(record, entity, self.config.malformed_attributes)?;
        let temporal_added = add_temporal_versioning_fields(record, entity, &self.config)?;
        let audit_fields_added = add_audit_fields(record, entity)?;
        let indexes = derive_indexes(record, entity, &self.config)?;

        Ok(RecordOutcome {
            converted_fields: attributes.converted,
            temporal_added,
            audit_fields_added,
            indexes,
            diagnostics: attributes.diagnostics,
        })
    }

    /// Normalize every entity in source order
    pub fn normalize_entities(&self, entities: &mut EntityDocument) -> Result<NormalizeReport> {
        let mut report = NormalizeReport::default();
        for (name, record) in entities.iter_mut() {
            log::debug!("Normalizing {}", name);
            report.absorb(self.normalize_record(name, record)?);
        }
        log::info!(
            "Normalized {} entities ({} legacy fields converted, {} audit fields added, {} indexes)",
            report.entities,
            report.converted_fields,
            report.audit_fields_added,
            report.indexes
        );
        Ok(report)
    }
}

/// Field mapping of a record: `None` without attributes, an error while the
/// legacy list is still in place
pub(crate) fn field_map<'a>(record: &'a EntityRecord, entity: &str) -> Result<Option<&'a OrderedMap<Value>>> {
    match &record.attributes {
        None => Ok(None),
        Some(Attributes::Fields(fields)) => Ok(Some(fields)),
        Some(Attributes::Legacy(_)) => Err(OntologyError::AttributesNotNormalized {
            entity: entity.to_string(),
        }),
    }
}

pub(crate) fn field_map_mut<'a>(
    record: &'a mut EntityRecord,
    entity: &str,
) -> Result<Option<&'a mut OrderedMap<Value>>> {
    match &mut record.attributes {
        None => Ok(None),
        Some(Attributes::Fields(fields)) => Ok(Some(fields)),
        Some(Attributes::Legacy(_)) => Err(OntologyError::AttributesNotNormalized {
            entity: entity.to_string(),
        }),
    }
}
