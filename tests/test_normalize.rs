//! Tests for the entity normalization passes through the public API

use ontoforge::config::{MalformedAttributePolicy, NormalizerConfig};
use ontoforge::model::{EntityDocument, EntityRecord};
use ontoforge::normalize::{
    add_audit_fields, add_temporal_versioning_fields, derive_indexes, normalize_attributes,
};
use ontoforge::{Normalizer, OntologyConfig, OntologyError};
use serde_yaml::Value;

fn record(yaml: &str) -> EntityRecord {
    serde_yaml::from_str(yaml).unwrap()
}

fn field_yaml(record: &EntityRecord, name: &str) -> Value {
    record.fields().unwrap().get(name).cloned().unwrap()
}

fn builtin_normalizer() -> Normalizer {
    Normalizer::new(OntologyConfig::builtin().unwrap().normalizer)
}

#[test]
fn test_legacy_entry_becomes_field_spec() {
    let mut leave = record("attributes:\n  - \"id: UUID (required)\"\n");
    normalize_attributes(&mut leave, "LeaveType", MalformedAttributePolicy::Report).unwrap();

    let expected: Value = serde_yaml::from_str("type: UUID\nrequired: true\ndescription: id field\n").unwrap();
    assert_eq!(field_yaml(&leave, "id"), expected);
    assert_eq!(leave.fields().unwrap().len(), 1);
}

#[test]
fn test_nullable_detection() {
    let mut leave = record(
        "attributes:\n  - \"end_date: date (nullable)\"\n  - \"note: text (NULLABLE)\"\n  - \"code: string (max 50)\"\n",
    );
    normalize_attributes(&mut leave, "LeaveType", MalformedAttributePolicy::Report).unwrap();

    assert_eq!(field_yaml(&leave, "end_date")["required"], Value::Bool(false));
    assert_eq!(field_yaml(&leave, "note")["required"], Value::Bool(false));
    assert_eq!(field_yaml(&leave, "code")["required"], Value::Bool(true));
    assert_eq!(field_yaml(&leave, "code")["type"], Value::from("string"));
}

#[test]
fn test_temporal_fields_are_allow_list_gated() {
    let config = OntologyConfig::builtin().unwrap().normalizer;

    let mut request = record("attributes:\n  id: {type: UUID}\n");
    let before = request.clone();
    assert!(!add_temporal_versioning_fields(&mut request, "LeaveRequest", &config).unwrap());
    assert_eq!(request, before);

    let mut leave_type = record("attributes:\n  id: {type: UUID}\n");
    assert!(add_temporal_versioning_fields(&mut leave_type, "LeaveType", &config).unwrap());
    let once = leave_type.clone();
    assert!(!add_temporal_versioning_fields(&mut leave_type, "LeaveType", &config).unwrap());
    assert_eq!(leave_type, once);
    assert_eq!(
        leave_type.fields().unwrap().keys().collect::<Vec<_>>(),
        vec!["id", "effective_start_date", "effective_end_date", "is_current_flag"]
    );
}

#[test]
fn test_audit_fields_are_additive_only() {
    let mut request = record("attributes:\n  id: {type: UUID}\n  updatedBy: {type: UUID}\n");
    assert_eq!(add_audit_fields(&mut request, "LeaveRequest").unwrap(), 1);
    assert!(request.has_field("created_by"));
    assert!(!request.has_field("updated_by"));
    assert_eq!(add_audit_fields(&mut request, "LeaveRequest").unwrap(), 0);
}

#[test]
fn test_indexes_follow_current_attributes() {
    let config = NormalizerConfig::default();
    let mut leave_type = record(
        "attributes:\n  id: {type: UUID}\n  code: {type: string}\n  is_current_flag: {type: boolean}\n",
    );
    derive_indexes(&mut leave_type, "LeaveType", &config).unwrap();

    let indexes = leave_type.indexes.clone().unwrap();
    assert_eq!(indexes.len(), 3);
    assert_eq!(indexes[0].columns, vec!["id"]);
    assert_eq!(indexes[0].index_type.as_deref(), Some("primary_key"));
    assert_eq!(indexes[1].columns, vec!["code"]);
    assert!(indexes[1].unique.unwrap_or(false));
    assert_eq!(indexes[2].columns, vec!["code", "is_current_flag"]);
    assert_eq!(indexes[2].where_clause.as_deref(), Some("is_current_flag = TRUE"));

    // Removing the fields removes their indexes on the next pass
    leave_type = record("attributes:\n  name: {type: string}\n");
    leave_type.indexes = Some(indexes);
    derive_indexes(&mut leave_type, "LeaveType", &config).unwrap();
    assert!(leave_type.indexes.is_none());
}

#[test]
fn test_entry_without_colon_is_dropped() {
    let mut leave = record("attributes:\n  - \"id: UUID\"\n  - \"just some words\"\n");
    let outcome = normalize_attributes(&mut leave, "LeaveType", MalformedAttributePolicy::Drop).unwrap();

    assert_eq!(outcome.converted, 1);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(leave.fields().unwrap().keys().collect::<Vec<_>>(), vec!["id"]);
}

#[test]
fn test_reject_policy_fails_on_malformed_entry() {
    let mut leave = record("attributes:\n  - \"just some words\"\n");
    let err = normalize_attributes(&mut leave, "LeaveType", MalformedAttributePolicy::Reject).unwrap_err();
    match err {
        OntologyError::MalformedAttribute { entity, entry } => {
            assert_eq!(entity, "LeaveType");
            assert_eq!(entry, "just some words");
        }
        other => panic!("Expected MalformedAttribute, got {}", other),
    }
}

#[test]
fn test_normalizer_is_idempotent_on_mixed_document() {
    let mut entities: EntityDocument = serde_yaml::from_str(
        r#"
LeaveType:
  attributes:
    - "id: UUID"
    - "code: string (max 50)"
    - worker_id: UUID
    - leave_class_id:
        type: UUID
        required: true
LeaveMovement:
  attributes:
    id: {type: UUID}
    worker_id: {type: UUID}
    leave_type_id: {type: UUID}
    createdBy: {type: UUID}
Approval:
  description: No attributes yet
"#,
    )
    .unwrap();

    let normalizer = builtin_normalizer();
    normalizer.normalize_entities(&mut entities).unwrap();
    let once = entities.clone();
    normalizer.normalize_entities(&mut entities).unwrap();
    assert_eq!(entities, once);

    let leave_type = entities.get("LeaveType").unwrap();
    assert_eq!(
        leave_type.fields().unwrap().keys().collect::<Vec<_>>(),
        vec![
            "id",
            "code",
            "worker_id",
            "leave_class_id",
            "effective_start_date",
            "effective_end_date",
            "is_current_flag",
            "created_by",
            "updated_by"
        ]
    );
    assert_eq!(field_yaml(leave_type, "leave_class_id")["required"], Value::Bool(true));

    let movement = entities.get("LeaveMovement").unwrap();
    assert!(!movement.has_field("created_by"));
    let names: Vec<_> = movement.indexes.as_ref().unwrap().iter().map(|i| i.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "pk_leavemovement",
            "idx_leavemovement_worker_id",
            "idx_leavemovement_leave_type_id"
        ]
    );
}
