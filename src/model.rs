//! Ontology document model
//!
//! A YAML ontology is a tree of name-keyed sections. The types here keep
//! the source key order, type the parts the normalizer and assemblers
//! work on, and carry every other key through verbatim.

pub mod document;
pub mod entity;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

pub use document::{DesignPattern, OntologyDocument, SubModule, VersionEntry};
pub use entity::{Attributes, EntityDocument, EntityFile, EntityRecord, FieldSpec, IndexSpec};

/// Name-keyed section that keeps the source key order
///
/// Re-inserting an existing key replaces the value in place.
pub type OrderedMap<V> = IndexMap<String, V>;

/// `key:` with nothing after it reads as an empty value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializers that accept any YAML scalar where a string is expected
///
/// Hand-edited files write `version: 2.0` as often as `version: "2.0"`.
pub(crate) mod scalar_string {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_yaml::Value;

    fn to_string<E: Error>(value: Value) -> Result<String, E> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(E::custom(format!("expected a scalar, found {:?}", other))),
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        to_string(Value::deserialize(deserializer)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => to_string(value).map(Some),
        }
    }
}
