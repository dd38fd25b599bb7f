//! Traversal output, plus the dedup and pagination utility both
//! traversal directions share.

use std::cmp::Ordering;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Property, PropertyId, Resource, ResourceId};
use super::config::Pagination;

// ============================================================================
// Entry
// ============================================================================

/// One second-degree hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalEntry {
    /// The second-degree resource.
    pub resource: Resource,
    /// The first-degree resource it was reached through.
    pub connecting: Resource,
    /// The linking property, `None` when it could not be resolved.
    pub property: Option<Property>,
}

impl TraversalEntry {
    /// Label for a "(via …)" annotation: the property label, else its term.
    pub fn via_label(&self) -> Option<&str> {
        self.property.as_ref().map(|p| {
            if p.label.is_empty() { p.term.as_str() } else { p.label.as_str() }
        })
    }
}

// ============================================================================
// Dedup
// ============================================================================

/// `(second-degree id, linking property id)`. `None` is the sentinel for an
/// unresolved property.
pub(crate) type DedupKey = (ResourceId, Option<PropertyId>);

/// Accumulates entries in discovery order, keeping the first entry per key.
#[derive(Debug, Default)]
pub(crate) struct Deduplicator {
    seen: HashSet<DedupKey>,
    entries: Vec<TraversalEntry>,
}

impl Deduplicator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns false when the key was already taken.
    pub(crate) fn insert(&mut self, property: Option<PropertyId>, entry: TraversalEntry) -> bool {
        if !self.seen.insert((entry.resource.id, property)) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_entries(self) -> Vec<TraversalEntry> {
        self.entries
    }
}

// ============================================================================
// Result
// ============================================================================

/// Output of one traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// The requested page of entries (or all of them), in discovery order.
    pub entries: Vec<TraversalEntry>,
    /// Deduplicated count before pagination.
    pub total_count: usize,
    /// First-degree hits found by the first hop, duplicates included.
    pub first_degree_count: usize,
    pub pagination: Option<Pagination>,
}

impl TraversalResult {
    pub fn empty(pagination: Option<Pagination>) -> Self {
        Self { entries: Vec::new(), total_count: 0, first_degree_count: 0, pagination }
    }

    /// Record the total, then cut the page window out of `entries`.
    pub(crate) fn paginate(
        entries: Vec<TraversalEntry>,
        first_degree_count: usize,
        pagination: Option<Pagination>,
    ) -> Self {
        let total_count = entries.len();
        let entries = match pagination {
            Some(p) => entries.into_iter().skip(p.offset()).take(p.per_page).collect(),
            None => entries,
        };
        Self { entries, total_count, first_degree_count, pagination }
    }

    /// True when the traversal found nothing at all (not just an empty page).
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Entries on this page.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraversalEntry> {
        self.entries.iter()
    }

    /// Number of pages at the applied page size.
    pub fn page_count(&self) -> usize {
        match self.pagination {
            Some(p) => self.total_count.div_ceil(p.per_page),
            None => usize::from(self.total_count > 0),
        }
    }

    /// Whether a caller should render page navigation.
    pub fn needs_pagination(&self) -> bool {
        self.pagination.is_some_and(|p| self.total_count > p.per_page)
    }

    /// Case-insensitive title order. Only reorders this page.
    pub fn sort_by_title(&mut self) {
        self.entries.sort_by_cached_key(|e| e.resource.title.to_lowercase());
    }

    /// Oldest first; resources without a timestamp go last. Only reorders this page.
    pub fn sort_by_created(&mut self) {
        self.entries.sort_by(|a, b| match (a.resource.created, b.resource.created) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}

impl IntoIterator for TraversalResult {
    type Item = TraversalEntry;
    type IntoIter = std::vec::IntoIter<TraversalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a TraversalResult {
    type Item = &'a TraversalEntry;
    type IntoIter = std::slice::Iter<'a, TraversalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
