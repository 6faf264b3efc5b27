//! Tests for the subcommand handlers

use chrono::NaiveDate;
use ontoforge::model::OntologyDocument;
use ontoforge::{yaml_io, OntologyConfig};
use ontoforge_cli::commands;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ABSENCE: &str = r#"
module: Absence
entities:
  LeaveType:
    description: Types of leave
    attributes:
      - "id: UUID"
      - "code: string (max 50)"
      - "effectiveDate: date"
  LeaveRequest:
    attributes:
      id: {type: UUID}
      worker_id: {type: UUID}
      createdBy: {type: UUID}
      updated_by: {type: UUID}
"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("absence-ontology.yaml");
    fs::write(&input, ABSENCE).unwrap();
    input
}

#[test]
fn test_split_then_merge() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path());
    let entities_dir = temp_dir.path().join("entities");
    let output = temp_dir.path().join("merged.yaml");

    let written = commands::run_split(&config, &input, &entities_dir).unwrap();
    assert_eq!(written.len(), 2);

    let outcome = commands::run_merge(&config, &entities_dir, &output, false, today()).unwrap();
    assert_eq!(outcome.merged, vec!["LeaveType", "LeaveRequest"]);
    assert!(outcome.report.is_none());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Absence Management Ontology\n# Version: 2.0\n# Last Updated: 2026-05-20\n"));

    let original: OntologyDocument = yaml_io::parse_yaml(ABSENCE, Path::new("absence")).unwrap();
    let merged = yaml_io::load_document(&output).unwrap();
    for (name, record) in original.entities.iter() {
        assert_eq!(merged.entities.get(name), Some(record));
    }
}

#[test]
fn test_merge_normalizes_by_default() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path());
    let entities_dir = temp_dir.path().join("entities");
    let output = temp_dir.path().join("merged.yaml");

    commands::run_split(&config, &input, &entities_dir).unwrap();
    let outcome = commands::run_merge(&config, &entities_dir, &output, true, today()).unwrap();
    assert_eq!(outcome.report.unwrap().converted_fields, 3);

    let merged = yaml_io::load_document(&output).unwrap();
    assert!(merged.entities.get("LeaveType").unwrap().has_field("is_current_flag"));
}

#[test]
fn test_normalize_and_analyze() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path());
    let output = temp_dir.path().join("normalized.yaml");

    let before = commands::run_analyze(&input, false).unwrap();
    assert_eq!(before.total, 2);
    assert_eq!(before.complete_audit, vec!["LeaveRequest"]);
    assert_eq!(before.missing_created_by, vec!["LeaveType"]);
    assert_eq!(before.needs_temporal, vec!["LeaveType"]);

    let report = commands::run_normalize(&config, &input, &output).unwrap();
    assert_eq!(report.entities, 2);

    let after = commands::run_analyze(&output, true).unwrap();
    assert_eq!(after.complete_audit, vec!["LeaveType", "LeaveRequest"]);
    assert!(after.missing_created_by.is_empty());
    assert!(after.needs_temporal.is_empty());
}

#[test]
fn test_unify_writes_header_and_sub_modules() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let absence = write_input(temp_dir.path());
    let ta = temp_dir.path().join("ta.yaml");
    fs::write(&ta, "entities:\n  ShiftDefinition:\n    attributes:\n      id: {type: UUID}\n").unwrap();
    let output = temp_dir.path().join("out").join("ta-ontology.yaml");

    let outcome = commands::run_unify(&config, &ta, &absence, &output, true, today()).unwrap();
    assert_eq!(outcome.document.entities.len(), 3);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Time & Absence Module (TA) - Ontology\n"));
    let unified = yaml_io::load_document(&output).unwrap();
    assert_eq!(unified, outcome.document);
}

#[test]
fn test_fix_writes_fixed_document() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path());
    let output = temp_dir.path().join("fixed.yaml");

    let outcome = commands::run_fix(&config, &input, &output, today()).unwrap();
    assert_eq!(outcome.added.len(), 5);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Time & Absence Module (TA) - Ontology (Fixed)\n"));
    let fixed = yaml_io::load_document(&output).unwrap();
    assert_eq!(fixed.notes.unwrap()["last_updated"].as_str(), Some("2026-05-20"));
}

#[test]
fn test_missing_input_reports_path() {
    let config = OntologyConfig::builtin().unwrap();
    let temp_dir = TempDir::new().unwrap();

    let err = commands::run_normalize(
        &config,
        Path::new("/nonexistent/ontology.yaml"),
        &temp_dir.path().join("out.yaml"),
    )
    .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("/nonexistent/ontology.yaml"));
    assert!(message.contains("not found"));
}
