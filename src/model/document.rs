//! Top-level ontology document

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::{null_as_default, scalar_string, EntityDocument, OrderedMap};

/// A whole ontology file
///
/// Field declaration order is the fixed top-level key order used when the
/// document is written back out. Unrecognized top-level keys follow at the
/// end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_modules: Option<OrderedMap<SubModule>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: EntityDocument,

    /// Opaque passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_patterns: Option<OrderedMap<DesignPattern>>,

    /// Free-form maintenance metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_history: Option<Vec<VersionEntry>>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl OntologyDocument {
    /// Add `entity` to a sub-module's entity list unless it is already listed.
    /// Returns false when the sub-module does not exist.
    pub fn assign_to_sub_module(&mut self, sub_module: &str, entity: &str) -> bool {
        let Some(sub) = self
            .sub_modules
            .as_mut()
            .and_then(|subs| subs.get_mut(sub_module))
        else {
            return false;
        };
        if !sub.entities.iter().any(|e| e == entity) {
            sub.entities.push(entity.to_string());
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubModule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub applies_to: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEntry {
    #[serde(deserialize_with = "scalar_string::required")]
    pub version: String,
    #[serde(deserialize_with = "scalar_string::required")]
    pub date: String,
    pub changes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
module: Absence
description: Leave management
custom_section:
  owner: hr-docs
entities:
  LeaveType:
    description: Types of leave
sub_modules:
  Absence:
    description: Leave and absence management
    entities: [LeaveType]
version_history:
  - version: 1.0
    date: 2025-11-28
    changes: Initial
"#;

    #[test]
    fn test_top_level_keys_written_in_fixed_order() {
        let doc: OntologyDocument = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(doc.version_history.as_ref().unwrap()[0].version, "1.0");
        assert_eq!(doc.version_history.as_ref().unwrap()[0].date, "2025-11-28");

        let text = serde_yaml::to_string(&doc).unwrap();
        let module = text.find("module:").unwrap();
        let subs = text.find("sub_modules:").unwrap();
        let entities = text.find("\nentities:").unwrap();
        let custom = text.find("custom_section:").unwrap();
        assert!(module < subs && subs < entities && entities < custom);
    }

    #[test]
    fn test_empty_entities_section() {
        let doc: OntologyDocument = serde_yaml::from_str("module: Absence\nentities:\n").unwrap();
        assert!(doc.entities.is_empty());
    }

    #[test]
    fn test_entity_order_survives_round_trip() {
        let text = "entities:\n  Zeta: {}\n  Alpha: {}\n  Mid: {}\n";
        let doc: OntologyDocument = serde_yaml::from_str(text).unwrap();
        assert_eq!(doc.entities.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);

        let mut doc: OntologyDocument = serde_yaml::from_str(&serde_yaml::to_string(&doc).unwrap()).unwrap();
        doc.entities.insert("Zeta".to_string(), Default::default());
        assert_eq!(doc.entities.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_assign_to_sub_module() {
        let mut doc: OntologyDocument = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(doc.assign_to_sub_module("Absence", "Holiday"));
        assert!(doc.assign_to_sub_module("Absence", "Holiday"));
        assert!(!doc.assign_to_sub_module("TimeAttendance", "Holiday"));

        let subs = doc.sub_modules.unwrap();
        assert_eq!(subs.get("Absence").unwrap().entities, vec!["LeaveType", "Holiday"]);
    }
}
