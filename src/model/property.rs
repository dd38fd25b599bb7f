//! Property — the labelled edge type of the catalog graph.

use serde::{Deserialize, Serialize};

/// Opaque property identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub u64);

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vocabulary property, e.g. `dcterms:creator`.
///
/// The `term` is unique across the catalog and is the key under which
/// values are stored on a [`Resource`](super::Resource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub term: String,
    pub label: String,
}

impl Property {
    pub fn new(id: PropertyId, term: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            label: label.into(),
        }
    }

    /// Vocabulary prefix of the term (`dcterms` in `dcterms:creator`).
    pub fn namespace(&self) -> Option<&str> {
        self.term.split_once(':').map(|(ns, _)| ns)
    }

    /// Local name of the term (`creator` in `dcterms:creator`).
    pub fn local_name(&self) -> &str {
        self.term.split_once(':').map_or(self.term.as_str(), |(_, name)| name)
    }
}
