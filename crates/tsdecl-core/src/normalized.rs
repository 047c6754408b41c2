//! Normalized debug form of a raw AST subtree.
//!
//! A normalized node is a plain recursive value: a scalar, a sequence, or an
//! ordered mapping. It has no parser-specific metadata and its `kind` field
//! holds a canonical name rather than a numeric discriminant.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::raw::unescape_leading_underscores;

/// Leaf values of a normalized tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// One node of a normalized tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedNode {
    Scalar(Scalar),
    Sequence(Vec<NormalizedNode>),
    /// Fields in their original order.
    Mapping(Vec<(String, NormalizedNode)>),
}

impl NormalizedNode {
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(text.into()))
    }

    /// Convert a JSON value verbatim, without omitting or renaming anything.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n.clone())),
            Value::String(s) => Self::string(s.clone()),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(Scalar::Null) => Value::Null,
            Self::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Self::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            Self::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Mapping(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }

    /// A field of a mapping node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(fields) => fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .filter(|v| !v.is_null()),
            _ => None,
        }
    }

    /// Replace (or append) a field of a mapping node. No-op on other shapes.
    pub fn set(&mut self, key: &str, value: Self) {
        if let Self::Mapping(fields) = self {
            if let Some(slot) = fields.iter_mut().find(|(k, _)| k == key) {
                slot.1 = value;
            } else {
                fields.push((key.to_string(), value));
            }
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Field names of a mapping node, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let fields: &[(String, Self)] = match self {
            Self::Mapping(fields) => fields,
            _ => &[],
        };
        fields.iter().map(|(k, _)| k.as_str())
    }

    /// The canonical kind name, when this is a mapping with a string `kind`.
    #[must_use]
    pub fn kind_name(&self) -> Option<&str> {
        self.get("kind").and_then(Self::as_str)
    }

    /// Identifier text (`text`, falling back to `escapedText`).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if let Some(text) = self.get("text") {
            return text.as_str();
        }
        self.get("escapedText")
            .and_then(Self::as_str)
            .map(unescape_leading_underscores)
    }

    /// Whether `key` appears anywhere in this subtree.
    #[must_use]
    pub fn contains_key_deep(&self, key: &str) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Sequence(items) => items.iter().any(|item| item.contains_key_deep(key)),
            Self::Mapping(fields) => fields
                .iter()
                .any(|(k, v)| k == key || v.contains_key_deep(key)),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for NormalizedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
