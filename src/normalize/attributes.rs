//! Legacy attribute list -> name-keyed field mapping

use serde_yaml::Value;

use crate::config::MalformedAttributePolicy;
use crate::model::{Attributes, EntityRecord, FieldSpec, OrderedMap};
use crate::{OntologyError, Result};

/// A legacy attribute entry that produced no field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDiagnostic {
    pub entity: String,
    pub entry: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct AttributeOutcome {
    /// Fields produced from the legacy list
    pub converted: usize,
    pub diagnostics: Vec<AttributeDiagnostic>,
}

/// Convert a legacy `attributes` list into the mapping form.
///
/// Records without `attributes`, or already in mapping form, are left
/// alone. Entries are parsed as follows:
/// - `"name: type (notes)"` strings split on the first colon;
/// - `{name: "type (notes)"}` mappings parse the value the same way;
/// - `{name: {...}}` mappings keep the value as written.
///
/// The type is the text before the first `(`. A field is required unless
/// its text mentions `nullable` in any case. Unparseable entries are handled
/// according to `policy`.
pub fn normalize_attributes(
    record: &mut EntityRecord,
    entity: &str,
    policy: MalformedAttributePolicy,
) -> Result<AttributeOutcome> {
    let Some(Attributes::Legacy(legacy)) = &record.attributes else {
        return Ok(AttributeOutcome::default());
    };

    let mut fields = OrderedMap::new();
    let mut outcome = AttributeOutcome::default();

    for entry in legacy {
        match entry {
            Value::String(text) => match text.split_once(':') {
                Some((name, spec)) => {
                    let name = name.trim();
                    fields.insert(name.to_string(), field_from_text(name, spec.trim()));
                    outcome.converted += 1;
                }
                None => reject_entry(&mut outcome, entity, text, "missing ':' separator", policy)?,
            },
            Value::Mapping(map) => {
                for (key, value) in map {
                    let Value::String(name) = key else {
                        let entry = describe_value(key);
                        reject_entry(&mut outcome, entity, &entry, "field name is not a string", policy)?;
                        continue;
                    };
                    let field = match value {
                        Value::String(spec) => field_from_text(name, spec),
                        other => other.clone(),
                    };
                    fields.insert(name.clone(), field);
                    outcome.converted += 1;
                }
            }
            other => {
                let entry = describe_value(other);
                reject_entry(&mut outcome, entity, &entry, "unsupported attribute entry", policy)?;
            }
        }
    }

    log::debug!("{}: converted {} legacy attribute(s)", entity, outcome.converted);
    record.attributes = Some(Attributes::Fields(fields));
    Ok(outcome)
}

fn field_from_text(name: &str, spec: &str) -> Value {
    let field_type = spec.split('(').next().unwrap_or_default().trim();
    FieldSpec::new(field_type)
        .required(!spec.to_lowercase().contains("nullable"))
        .describe(format!("{} field", name))
        .to_value()
}

fn reject_entry(
    outcome: &mut AttributeOutcome,
    entity: &str,
    entry: &str,
    reason: &str,
    policy: MalformedAttributePolicy,
) -> Result<()> {
    match policy {
        MalformedAttributePolicy::Drop => {
            log::debug!("{}: dropping attribute entry {:?} ({})", entity, entry, reason);
        }
        MalformedAttributePolicy::Report => {
            log::warn!("{}: dropping attribute entry {:?} ({})", entity, entry, reason);
            outcome.diagnostics.push(AttributeDiagnostic {
                entity: entity.to_string(),
                entry: entry.to_string(),
                reason: reason.to_string(),
            });
        }
        MalformedAttributePolicy::Reject => {
            return Err(OntologyError::MalformedAttribute {
                entity: entity.to_string(),
                entry: entry.to_string(),
            });
        }
    }
    Ok(())
}

fn describe_value(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}
