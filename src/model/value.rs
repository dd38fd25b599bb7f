//! Typed property values and the term-keyed value map on resources.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Resource;

/// A single value stored under a property term.
///
/// Mirrors the three value kinds a catalog stores:
/// - `Literal`: plain text
/// - `Resource`: a reference to another resource (an edge of the graph)
/// - `Uri`: an external link with an optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Literal(String),
    Resource(Box<Resource>),
    Uri { uri: String, label: Option<String> },
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn uri(uri: impl Into<String>, label: Option<&str>) -> Self {
        Value::Uri { uri: uri.into(), label: label.map(str::to_owned) }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Literal(_) => "literal",
            Value::Resource(_) => "resource",
            Value::Uri { .. } => "uri",
        }
    }

    pub fn is_resource(&self) -> bool { matches!(self, Value::Resource(_)) }

    /// The referenced resource, if this value is an edge.
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Literal(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<String> for Value { fn from(v: String) -> Self { Value::Literal(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::Literal(v.to_owned()) } }
impl From<Resource> for Value { fn from(v: Resource) -> Self { Value::Resource(Box::new(v)) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(s) => write!(f, "{s}"),
            Value::Resource(r) => write!(f, "{} (#{})", r.title, r.id),
            Value::Uri { uri, label: Some(label) } => write!(f, "{label} <{uri}>"),
            Value::Uri { uri, label: None } => write!(f, "<{uri}>"),
        }
    }
}

// ============================================================================
// ValueMap
// ============================================================================

/// Values stored under one property term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermValues {
    pub term: String,
    pub values: SmallVec<[Value; 1]>,
}

/// Term → values, kept in insertion order.
///
/// Order matters: direct traversal walks a resource's values in this order,
/// and discovery order is the order of the traversal result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap {
    entries: Vec<TermValues>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `term`, creating the term on first use.
    pub fn push(&mut self, term: impl Into<String>, value: Value) {
        let term = term.into();
        match self.entries.iter_mut().find(|tv| tv.term == term) {
            Some(tv) => tv.values.push(value),
            None => {
                let mut values = SmallVec::new();
                values.push(value);
                self.entries.push(TermValues { term, values });
            }
        }
    }

    pub fn get(&self, term: &str) -> &[Value] {
        self.entries
            .iter()
            .find(|tv| tv.term == term)
            .map(|tv| tv.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|tv| tv.term.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermValues> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = &'a TermValues;
    type IntoIter = std::slice::Iter<'a, TermValues>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in pairs {
            map.push(k, v.into());
        }
        map
    }
}
