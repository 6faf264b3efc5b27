//! Entity definitions as they appear under the `entities:` key of an ontology

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::{scalar_string, OrderedMap};

/// Ordered mapping from entity name to its definition
pub type EntityDocument = OrderedMap<EntityRecord>;

/// One entity definition
///
/// Only the keys the normalizer touches are typed. Everything else
/// (`relationships`, `constraints`, `businessRules` and any unknown key)
/// is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Value>,

    #[serde(
        default,
        rename = "businessRules",
        skip_serializing_if = "Option::is_none"
    )]
    pub business_rules: Option<Value>,

    /// Derived by the normalizer, never hand-authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<IndexSpec>>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl EntityRecord {
    /// Attribute mapping, if the record is already in mapping form
    pub fn fields(&self) -> Option<&OrderedMap<Value>> {
        match &self.attributes {
            Some(Attributes::Fields(fields)) => Some(fields),
            _ => None,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields().is_some_and(|f| f.contains_key(name))
    }
}

/// The two shapes an `attributes:` block can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attributes {
    /// Name-keyed mapping, the normalized form
    Fields(OrderedMap<Value>),
    /// Older order-dependent list of `"name: type (notes)"` strings or
    /// single-key mappings
    Legacy(Vec<Value>),
}

impl Attributes {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Attributes::Legacy(_))
    }
}

/// Canonical shape of a field produced by the normalizer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default, rename = "maxLength")]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            required: None,
            default: None,
            max_length: None,
            values: None,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `required` as written, falling back to true when unspecified
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }

    /// Read a field value back as a spec; `None` for non-mapping values or
    /// mappings without a `type`
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_yaml::from_value(value.clone()).ok()
    }

    /// Render as a YAML mapping in `type, required, default, maxLength,
    /// values, description` order
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::new();
        map.insert("type".into(), self.field_type.clone().into());
        if let Some(required) = self.required {
            map.insert("required".into(), required.into());
        }
        if let Some(default) = &self.default {
            map.insert("default".into(), default.clone());
        }
        if let Some(max_length) = self.max_length {
            map.insert("maxLength".into(), u64::from(max_length).into());
        }
        if let Some(values) = &self.values {
            let seq = values.iter().cloned().map(Value::from).collect::<Vec<_>>();
            map.insert("values".into(), Value::Sequence(seq));
        }
        if let Some(description) = &self.description {
            map.insert("description".into(), description.clone().into());
        }
        Value::Mapping(map)
    }
}

/// Index hint derived from well-known field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            index_type: None,
            unique: None,
            where_clause: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.index_type = Some("primary_key".to_string());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = Some(true);
        self
    }

    pub fn filtered(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }
}

/// One entity split out into its own file
///
/// On disk the header keys come first, then the record's own keys at the
/// top level:
///
/// ```yaml
/// entity: LeaveType
/// version: "1.0"
/// layer: configuration
///
/// description: ...
/// attributes: ...
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityFile {
    pub entity: String,
    #[serde(default, deserialize_with = "scalar_string::optional")]
    pub version: Option<String>,
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(flatten)]
    pub record: EntityRecord,
}

impl EntityFile {
    /// Keys the header block writes at the top level
    pub const HEADER_KEYS: [&'static str; 3] = ["entity", "version", "layer"];

    /// First header key the record also defines, if any. Such a file could
    /// not be read back.
    pub fn header_clash(record: &EntityRecord) -> Option<&'static str> {
        Self::HEADER_KEYS
            .into_iter()
            .find(|key| record.extra.contains_key(*key))
    }

    /// Render with the header block, a blank line, then the record body.
    /// An empty record renders as the header alone.
    pub fn render(&self) -> crate::Result<String> {
        if let Some(key) = Self::header_clash(&self.record) {
            return Err(crate::OntologyError::ReservedEntityKey {
                entity: self.entity.clone(),
                key: key.to_string(),
            });
        }

        let mut out = format!("entity: {}\n", self.entity);
        if let Some(version) = &self.version {
            out.push_str(&format!("version: \"{}\"\n", version));
        }
        if let Some(layer) = &self.layer {
            out.push_str(&format!("layer: {}\n", layer));
        }
        out.push('\n');

        let body = serde_yaml::to_value(&self.record).map_err(crate::OntologyError::Serialize)?;
        if matches!(&body, Value::Mapping(map) if map.is_empty()) {
            return Ok(out);
        }
        let body = serde_yaml::to_string(&body).map_err(crate::OntologyError::Serialize)?;
        out.push_str(&body);
        Ok(out)
    }
}
