//! Index hints derived from well-known field names

use crate::config::NormalizerConfig;
use crate::model::{EntityRecord, IndexSpec, OrderedMap};
use crate::Result;
use serde_yaml::Value;

use super::field_map;
use super::temporal::{EFFECTIVE_END_DATE, EFFECTIVE_START_DATE, IS_CURRENT_FLAG};

/// Indexes implied by a field mapping, in a fixed order:
/// primary key on `id`, unique `code`, current-version lookup on
/// `(code, is_current_flag)`, effective-date range, then one index per
/// configured foreign-key field that is present.
pub fn indexes_for(entity: &str, fields: &OrderedMap<Value>, config: &NormalizerConfig) -> Vec<IndexSpec> {
    let table = entity.to_lowercase();
    let mut indexes = Vec::new();

    if fields.contains_key("id") {
        indexes.push(IndexSpec::new(format!("pk_{}", table), &["id"]).primary_key());
    }

    if fields.contains_key("code") {
        indexes.push(IndexSpec::new(format!("uq_{}_code", table), &["code"]).unique());
    }

    if fields.contains_key(IS_CURRENT_FLAG) && fields.contains_key("code") {
        indexes.push(
            IndexSpec::new(format!("idx_{}_current", table), &["code", IS_CURRENT_FLAG])
                .filtered(format!("{} = TRUE", IS_CURRENT_FLAG)),
        );
    }

    if fields.contains_key(EFFECTIVE_START_DATE) {
        indexes.push(IndexSpec::new(
            format!("idx_{}_dates", table),
            &[EFFECTIVE_START_DATE, EFFECTIVE_END_DATE],
        ));
    }

    for fk in &config.foreign_key_fields {
        if fields.contains_key(fk) {
            indexes.push(IndexSpec::new(format!("idx_{}_{}", table, fk), &[fk.as_str()]));
        }
    }

    indexes
}

/// Replace the record's `indexes` with the ones its fields imply.
///
/// The previous value is always discarded; when nothing applies the key is
/// removed. Records without attributes are left alone. Returns the number
/// of indexes written.
pub fn derive_indexes(record: &mut EntityRecord, entity: &str, config: &NormalizerConfig) -> Result<usize> {
    let Some(fields) = field_map(record, entity)? else {
        return Ok(0);
    };
    let indexes = indexes_for(entity, fields, config);
    let count = indexes.len();
    record.indexes = if indexes.is_empty() { None } else { Some(indexes) };
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NormalizerConfig {
        NormalizerConfig {
            foreign_key_fields: vec!["worker_id".to_string(), "shift_id".to_string()],
            ..Default::default()
        }
    }

    fn record(yaml: &str) -> EntityRecord {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_scd_entity_indexes() {
        let mut leave_type = record(
            "attributes:\n  id: {type: UUID}\n  code: {type: string}\n  is_current_flag: {type: boolean}\n",
        );
        assert_eq!(derive_indexes(&mut leave_type, "LeaveType", &config()).unwrap(), 3);

        let indexes = leave_type.indexes.unwrap();
        assert_eq!(
            indexes,
            vec![
                IndexSpec::new("pk_leavetype", &["id"]).primary_key(),
                IndexSpec::new("uq_leavetype_code", &["code"]).unique(),
                IndexSpec::new("idx_leavetype_current", &["code", "is_current_flag"])
                    .filtered("is_current_flag = TRUE"),
            ]
        );
    }

    #[test]
    fn test_dates_and_foreign_keys() {
        let mut roster = record(
            "attributes:\n  shift_id: {type: UUID}\n  worker_id: {type: UUID}\n  effective_start_date: {type: date}\n",
        );
        derive_indexes(&mut roster, "Roster", &config()).unwrap();

        let names: Vec<_> = roster.indexes.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["idx_roster_dates", "idx_roster_worker_id", "idx_roster_shift_id"]);
    }

    #[test]
    fn test_recomputed_from_scratch() {
        let mut leave_type = record(
            "attributes:\n  id: {type: UUID}\nindexes:\n  - name: stale\n    columns: [legacy]\n",
        );
        derive_indexes(&mut leave_type, "LeaveType", &config()).unwrap();
        let first = leave_type.indexes.clone();
        derive_indexes(&mut leave_type, "LeaveType", &config()).unwrap();

        assert_eq!(leave_type.indexes, first);
        assert_eq!(first.unwrap().len(), 1);
    }

    #[test]
    fn test_no_applicable_fields_clears_indexes() {
        let mut note = record("attributes:\n  body: {type: text}\nindexes:\n  - name: stale\n    columns: [body]\n");
        assert_eq!(derive_indexes(&mut note, "Note", &config()).unwrap(), 0);
        assert!(note.indexes.is_none());
    }
}
