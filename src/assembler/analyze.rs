//! Report entities lacking audit or versioning fields

use serde::Serialize;

use crate::config::MalformedAttributePolicy;
use crate::model::{EntityDocument, EntityRecord, OntologyDocument};
use crate::normalize::normalize_attributes;
use crate::normalize::temporal::{EFFECTIVE_END_DATE, EFFECTIVE_START_DATE, IS_CURRENT_FLAG};
use crate::Result;

/// Fields whose presence hints that an entity is effective-dated
const TEMPORAL_HINTS: [&str; 2] = ["effectiveStart", "effectiveDate"];

#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    pub total: usize,
    /// Both `created_by` and `updated_by` present
    pub complete_audit: Vec<String>,
    pub missing_created_by: Vec<String>,
    pub missing_updated_by: Vec<String>,
    /// Effective-dated by convention but without all SCD Type 2 fields
    pub needs_temporal: Vec<String>,
}

/// Inspect every entity without modifying the document. Legacy attribute
/// lists are read through a normalized copy; unparseable entries are ignored.
pub fn analyze_entities(entities: &EntityDocument) -> Result<AuditReport> {
    let mut report = AuditReport::default();

    for (name, record) in entities.iter() {
        let mut copy = record.clone();
        normalize_attributes(&mut copy, name, MalformedAttributePolicy::Drop)?;
        report.total += 1;

        let created = has_any(&copy, &["created_by", "createdBy"]);
        let updated = has_any(&copy, &["updated_by", "updatedBy"]);
        if created && updated {
            report.complete_audit.push(name.to_string());
        }
        if !created {
            report.missing_created_by.push(name.to_string());
        }
        if !updated {
            report.missing_updated_by.push(name.to_string());
        }

        let versioned = [EFFECTIVE_START_DATE, EFFECTIVE_END_DATE, IS_CURRENT_FLAG]
            .iter()
            .all(|f| copy.has_field(f));
        if !versioned && has_any(&copy, &TEMPORAL_HINTS) {
            report.needs_temporal.push(name.to_string());
        }
    }

    Ok(report)
}

/// [`analyze_entities`] over a document's `entities` section
pub fn analyze_ontology(document: &OntologyDocument) -> Result<AuditReport> {
    analyze_entities(&document.entities)
}

fn has_any(record: &EntityRecord, names: &[&str]) -> bool {
    names.iter().any(|n| record.has_field(n))
}

/// Whole-number share of `part` in `total`
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        part * 100 / total
    }
}
