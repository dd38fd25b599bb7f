//! Second-degree relationship traversal.
//!
//! Starting from a seed resource, the first hop finds resources that
//! reference the seed. The second hop then goes one of two ways:
//!
//! ```text
//! direct:   seed <-[p1]- first -[p2]-> second
//! reverse:  seed <-[p1]- first <-[p2]- second
//! ```
//!
//! Results are deduplicated by `(second.id, p2.id)` and paginated after
//! deduplication.

pub mod config;
pub mod result;
mod engine;

pub use config::{Direction, Pagination, TraversalConfig};
pub use result::{TraversalEntry, TraversalResult};
pub use engine::traverse;
