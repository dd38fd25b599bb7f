//! # second-degree — Two-Hop Relationship Traversal
//!
//! Finds the resources two hops away from a catalog resource: the Events
//! that reference an Organization, then the People those Events reference
//! (or the People that reference those Events).
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `ResourceQuery` is the contract between the engine and the catalog
//! 2. **Clean DTOs**: `Resource`, `Property`, `Value` cross all boundaries
//! 3. **Stateless calls**: every traversal fetches fresh snapshots and keeps nothing
//! 4. **Best effort**: a failed lookup shrinks the result, it never fails the call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use second_degree::{Traverser, TraversalConfig, Direction, Resource, PropertyId};
//!
//! # async fn example() -> second_degree::Result<()> {
//! let traverser = Traverser::open_memory();
//! // ... populate traverser.catalog() ...
//!
//! let org = Resource::item(1, "Acme");
//! let config = TraversalConfig::new()
//!     .with_direction(Direction::Direct)
//!     .with_second_degree_properties([PropertyId(2)])
//!     .with_page(1, 20);
//!
//! let result = traverser.traverse(&org, &config).await?;
//! for entry in &result {
//!     println!("{} (via {})", entry.resource.title, entry.connecting.title);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod catalog;
pub mod traversal;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Resource, ResourceId, TemplateId, SiteId,
    Property, PropertyId, Value, ValueMap,
    DEFAULT_RESOURCE_TYPE,
};

// ============================================================================
// Re-exports: Catalog
// ============================================================================

pub use catalog::{ResourceQuery, SearchFilter, PropertyReference, MemoryCatalog};

// ============================================================================
// Re-exports: Traversal
// ============================================================================

pub use traversal::{
    traverse, Direction, Pagination, TraversalConfig, TraversalEntry, TraversalResult,
};

// ============================================================================
// Top-level Traverser handle
// ============================================================================

/// The primary entry point. A `Traverser` wraps a catalog and runs
/// traversals against it.
pub struct Traverser<Q: ResourceQuery> {
    catalog: Q,
}

impl<Q: ResourceQuery> Traverser<Q> {
    /// Create a Traverser over the given catalog.
    pub fn with_catalog(catalog: Q) -> Self {
        Self { catalog }
    }

    /// Find second-degree resources of `seed`.
    pub async fn traverse(&self, seed: &Resource, config: &TraversalConfig) -> Result<TraversalResult> {
        traversal::traverse(&self.catalog, seed, config).await
    }

    /// Access the underlying catalog.
    pub fn catalog(&self) -> &Q {
        &self.catalog
    }
}

/// In-memory catalog for testing and embedding.
impl Traverser<MemoryCatalog> {
    pub fn open_memory() -> Self {
        Self::with_catalog(MemoryCatalog::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query failure: {0}")]
    QueryFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
