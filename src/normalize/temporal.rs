//! SCD Type 2 versioning fields

use crate::config::NormalizerConfig;
use crate::model::{EntityRecord, FieldSpec};
use crate::Result;

use super::field_map_mut;

pub const EFFECTIVE_START_DATE: &str = "effective_start_date";
pub const EFFECTIVE_END_DATE: &str = "effective_end_date";
pub const IS_CURRENT_FLAG: &str = "is_current_flag";

/// Append `effective_start_date`, `effective_end_date` and `is_current_flag`
/// to an allow-listed entity.
///
/// Returns whether fields were added. Entities outside
/// `config.temporal_entities`, records without attributes, and records that
/// already define `effective_start_date` are left alone.
pub fn add_temporal_versioning_fields(
    record: &mut EntityRecord,
    entity: &str,
    config: &NormalizerConfig,
) -> Result<bool> {
    let Some(fields) = field_map_mut(record, entity)? else {
        return Ok(false);
    };
    if !config.is_temporal(entity) || fields.contains_key(EFFECTIVE_START_DATE) {
        return Ok(false);
    }

    fields.insert(
        EFFECTIVE_START_DATE.to_string(),
        FieldSpec::new("date")
            .required(true)
            .describe("Start date of this version")
            .to_value(),
    );
    fields.insert(
        EFFECTIVE_END_DATE.to_string(),
        FieldSpec::new("date")
            .required(false)
            .describe("End date of this version (NULL = current version)")
            .to_value(),
    );
    fields.insert(
        IS_CURRENT_FLAG.to_string(),
        FieldSpec::new("boolean")
            .required(true)
            .with_default(true)
            .describe("Flag indicating if this is the current version")
            .to_value(),
    );

    log::debug!("{}: added SCD Type 2 versioning fields", entity);
    Ok(true)
}
