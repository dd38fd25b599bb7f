//! # Resource Query Trait
//!
//! This is THE contract between the traversal engine and whatever holds the
//! catalog: a CMS API client, a database, or the in-memory reference catalog.
//! The engine never touches storage directly; every lookup goes through here.
//!
//! ## Implementations
//!
//! | Catalog | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryCatalog` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use crate::model::*;
use crate::Result;

pub use memory::{MemoryCatalog, CatalogSnapshot};

// ============================================================================
// Search filter
// ============================================================================

/// "Value under `property` is a reference to `target`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyReference {
    pub property: PropertyId,
    pub target: ResourceId,
}

/// Filter accepted by [`ResourceQuery::search`].
///
/// Every field narrows the result; an all-`None` filter matches every
/// resource of the requested type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub reference: Option<PropertyReference>,
    pub template: Option<TemplateId>,
    /// Scope identifier. Its meaning belongs to the catalog implementation.
    pub site: Option<SiteId>,
}

impl SearchFilter {
    /// Resources whose value under `property` references `target`.
    pub fn references(property: PropertyId, target: ResourceId) -> Self {
        Self {
            reference: Some(PropertyReference { property, target }),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template: Option<TemplateId>) -> Self {
        self.template = template;
        self
    }

    pub fn with_site(mut self, site: Option<SiteId>) -> Self {
        self.site = site;
        self
    }
}

// ============================================================================
// ResourceQuery Trait
// ============================================================================

/// The resource query collaborator.
///
/// Implementations should report absent properties as `Error::NotFound` and
/// any other failure as `Error::QueryFailure`. The traversal engine treats
/// every error as a dropped lookup, never as fatal.
#[async_trait]
pub trait ResourceQuery: Send + Sync {
    /// Find resources of `resource_type` matching `filter`.
    async fn search(&self, resource_type: &str, filter: &SearchFilter) -> Result<Vec<Resource>>;

    /// Read a property by id.
    async fn read_property(&self, id: PropertyId) -> Result<Property>;

    /// Read a property by its `namespace:name` term.
    async fn read_property_by_term(&self, term: &str) -> Result<Property>;

    /// The full property catalog.
    ///
    /// Only used when a hop has no property allow-list, which makes the
    /// first hop issue one search per property.
    async fn list_properties(&self) -> Result<Vec<Property>>;
}

#[async_trait]
impl<T: ResourceQuery + ?Sized> ResourceQuery for std::sync::Arc<T> {
    async fn search(&self, resource_type: &str, filter: &SearchFilter) -> Result<Vec<Resource>> {
        (**self).search(resource_type, filter).await
    }

    async fn read_property(&self, id: PropertyId) -> Result<Property> {
        (**self).read_property(id).await
    }

    async fn read_property_by_term(&self, term: &str) -> Result<Property> {
        (**self).read_property_by_term(term).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        (**self).list_properties().await
    }
}
