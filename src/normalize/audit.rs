//! Audit trail fields

use crate::model::{EntityRecord, FieldSpec};
use crate::Result;

use super::field_map_mut;

/// Append `created_by` / `updated_by` when neither the snake-case nor the
/// camel-case spelling is present. Existing fields are never touched.
///
/// Returns the number of fields added.
pub fn add_audit_fields(record: &mut EntityRecord, entity: &str) -> Result<usize> {
    let Some(fields) = field_map_mut(record, entity)? else {
        return Ok(0);
    };
    let mut added = 0;

    if !fields.contains_key("created_by") && !fields.contains_key("createdBy") {
        fields.insert(
            "created_by".to_string(),
            FieldSpec::new("UUID")
                .required(true)
                .describe("User who created this record")
                .to_value(),
        );
        added += 1;
    }

    if !fields.contains_key("updated_by") && !fields.contains_key("updatedBy") {
        fields.insert(
            "updated_by".to_string(),
            FieldSpec::new("UUID")
                .required(false)
                .describe("User who last updated this record")
                .to_value(),
        );
        added += 1;
    }

    if added > 0 {
        log::debug!("{}: added {} audit field(s)", entity, added);
    }
    Ok(added)
}
