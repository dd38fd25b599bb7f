//! In-memory resource catalog.
//!
//! This is the reference implementation of `ResourceQuery`.
//! It uses ordered maps protected by RwLock.
//!
//! ## Limitations
//!
//! - **Full scans**: every search walks all resources of the catalog. There
//!   are no value indexes.
//! - **Snapshot references**: a resource-reference value holds a copy of its
//!   target taken when the referencing resource was built. Re-inserting the
//!   target does not refresh those copies.
//!
//! Use this catalog for:
//! - Testing the traversal engine
//! - Embedding the engine over a JSON export of a catalog

use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::*;
use crate::{Error, Result};
use super::{ResourceQuery, SearchFilter};

// ============================================================================
// Snapshot format
// ============================================================================

/// Serialized form of a catalog: properties plus resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

// ============================================================================
// MemoryCatalog
// ============================================================================

/// In-memory catalog of properties and resources.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<CatalogInner>,
}

#[derive(Default)]
struct CatalogInner {
    properties: RwLock<BTreeMap<PropertyId, Property>>,
    /// term → property id
    terms: RwLock<HashMap<String, PropertyId>>,
    resources: RwLock<BTreeMap<ResourceId, Resource>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON [`CatalogSnapshot`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let catalog = Self::new();
        for property in snapshot.properties {
            catalog.insert_property(property)?;
        }
        for resource in snapshot.resources {
            catalog.insert_resource(resource);
        }
        Ok(catalog)
    }

    /// Register a property. Terms must be unique; re-registering the same
    /// id replaces the previous definition.
    pub fn insert_property(&self, property: Property) -> Result<()> {
        let mut terms = self.inner.terms.write();
        if let Some(existing) = terms.get(&property.term) {
            if *existing != property.id {
                return Err(Error::ConstraintViolation(format!(
                    "Term '{}' already belongs to property {existing}",
                    property.term
                )));
            }
        }

        let mut properties = self.inner.properties.write();
        if let Some(previous) = properties.get(&property.id) {
            terms.remove(&previous.term);
        }
        terms.insert(property.term.clone(), property.id);
        properties.insert(property.id, property);
        Ok(())
    }

    /// Insert or replace a resource.
    pub fn insert_resource(&self, resource: Resource) {
        self.inner.resources.write().insert(resource.id, resource);
    }

    pub fn resource(&self, id: ResourceId) -> Option<Resource> {
        self.inner.resources.read().get(&id).cloned()
    }

    pub fn resource_count(&self) -> usize {
        self.inner.resources.read().len()
    }

    pub fn property_count(&self) -> usize {
        self.inner.properties.read().len()
    }

    fn term_of(&self, id: PropertyId) -> Option<String> {
        self.inner.properties.read().get(&id).map(|p| p.term.clone())
    }
}

// ============================================================================
// ResourceQuery impl
// ============================================================================

#[async_trait]
impl ResourceQuery for MemoryCatalog {
    async fn search(&self, resource_type: &str, filter: &SearchFilter) -> Result<Vec<Resource>> {
        // Resolve the reference filter's property to the term values live under.
        let reference = match filter.reference {
            Some(r) => match self.term_of(r.property) {
                Some(term) => Some((term, r.target)),
                // Unknown property: nothing can carry a value under it.
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let resources = self.inner.resources.read();
        let hits: Vec<Resource> = resources
            .values()
            .filter(|r| r.is_type(resource_type))
            .filter(|r| filter.template.is_none_or(|t| r.template == Some(t)))
            .filter(|r| filter.site.is_none_or(|s| r.in_site(s)))
            .filter(|r| {
                reference
                    .as_ref()
                    .is_none_or(|(term, target)| r.references_under(term, *target))
            })
            .cloned()
            .collect();

        trace!(resource_type, ?filter, hits = hits.len(), "memory catalog search");
        Ok(hits)
    }

    async fn read_property(&self, id: PropertyId) -> Result<Property> {
        self.inner
            .properties
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Property {id}")))
    }

    async fn read_property_by_term(&self, term: &str) -> Result<Property> {
        let id = self
            .inner
            .terms
            .read()
            .get(term)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("Property '{term}'")))?;
        self.read_property(id).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.inner.properties.read().values().cloned().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
