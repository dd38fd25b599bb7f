//! # Catalog Resource Model
//!
//! Clean DTOs for the catalog graph: resources are the nodes, properties
//! are the edge labels, and resource-reference values are the edges.
//! These types cross every boundary: catalog ↔ traversal ↔ caller.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod resource;
pub mod property;
pub mod value;

pub use resource::{Resource, ResourceId, TemplateId, SiteId, DEFAULT_RESOURCE_TYPE};
pub use property::{Property, PropertyId};
pub use value::{Value, ValueMap, TermValues};
