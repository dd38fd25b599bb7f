//! The two-hop pipeline: first hop → second hop → dedup → paginate.
//!
//! Every lookup is issued sequentially in a fixed order (first-degree
//! resources in discovery order, then properties in allow-list order), so
//! "first occurrence wins" always picks the same connecting resource.
//! Each lookup is attempted once; a failed one is logged and dropped.

use hashbrown::HashMap;
use tracing::{debug, trace, warn};

use crate::catalog::{ResourceQuery, SearchFilter};
use crate::model::*;
use crate::{Error, Result};
use super::config::{Direction, TraversalConfig};
use super::result::{Deduplicator, TraversalEntry, TraversalResult};

/// Find second-degree resources of `seed`.
///
/// Returns `Err` only for an invalid `config`; catalog failures degrade
/// the result instead of failing it.
pub async fn traverse<Q>(catalog: &Q, seed: &Resource, config: &TraversalConfig) -> Result<TraversalResult>
where
    Q: ResourceQuery + ?Sized,
{
    config.validate()?;
    let mut properties = PropertyResolver::new(catalog);

    let first_degree = first_degree_resources(catalog, seed, config).await;
    if first_degree.is_empty() {
        debug!(seed = %seed.id, "no first-degree resources");
        return Ok(TraversalResult::empty(config.pagination()));
    }
    debug!(seed = %seed.id, count = first_degree.len(), direction = %config.direction, "first hop done");

    let mut dedup = Deduplicator::new();
    match config.direction {
        Direction::Direct => {
            collect_direct(&mut properties, &first_degree, config, &mut dedup).await;
        }
        Direction::Reverse => {
            collect_reverse(catalog, &mut properties, &first_degree, config, &mut dedup).await;
        }
    }
    debug!(seed = %seed.id, total = dedup.len(), "second hop done");

    Ok(TraversalResult::paginate(dedup.into_entries(), first_degree.len(), config.pagination()))
}

// ============================================================================
// First hop
// ============================================================================

/// Resources of the first-degree type that reference `seed`, unioned over
/// every candidate property. Duplicates across properties are kept.
async fn first_degree_resources<Q>(catalog: &Q, seed: &Resource, config: &TraversalConfig) -> Vec<Resource>
where
    Q: ResourceQuery + ?Sized,
{
    let candidates = if config.first_degree_property_ids.is_empty() {
        match catalog.list_properties().await {
            Ok(all) => {
                debug!(count = all.len(), "no first-degree allow-list, searching every property");
                all.into_iter().map(|p| p.id).collect()
            }
            Err(err) => {
                warn!(error = %err, "listing properties failed");
                Vec::new()
            }
        }
    } else {
        config.first_degree_property_ids.clone()
    };

    let mut found = Vec::new();
    for property in candidates {
        let filter = SearchFilter::references(property, seed.id)
            .with_template(config.first_degree_template)
            .with_site(config.site_id);

        match catalog.search(&config.first_degree_type, &filter).await {
            Ok(hits) => {
                trace!(%property, hits = hits.len(), "first-degree search");
                found.extend(hits);
            }
            Err(err) => warn!(%property, error = %err, "first-degree search failed, skipping property"),
        }
    }
    found
}

// ============================================================================
// Second hop
// ============================================================================

/// Walk each first-degree resource's own outgoing references. No searches.
async fn collect_direct<Q>(
    properties: &mut PropertyResolver<'_, Q>,
    first_degree: &[Resource],
    config: &TraversalConfig,
    dedup: &mut Deduplicator,
) where
    Q: ResourceQuery + ?Sized,
{
    let allow = &config.second_degree_property_ids;

    for connecting in first_degree {
        for (term, target) in connecting.references() {
            if !target.is_type(&config.second_degree_type) {
                continue;
            }
            // Untemplated targets pass a template filter; only a mismatch rejects.
            if let (Some(want), Some(has)) = (config.second_degree_template, target.template) {
                if want != has {
                    continue;
                }
            }

            let property = properties.by_term(term).await;
            let property_id = property.as_ref().map(|p| p.id);
            if !allow.is_empty() && !property_id.is_some_and(|id| allow.contains(&id)) {
                continue;
            }

            let entry = TraversalEntry {
                resource: target.clone(),
                connecting: connecting.clone(),
                property,
            };
            if !dedup.insert(property_id, entry) {
                trace!(resource = %target.id, term, "duplicate second-degree hit");
            }
        }
    }
}

/// Search for resources referencing each first-degree resource, once per
/// allow-listed property.
async fn collect_reverse<Q>(
    catalog: &Q,
    properties: &mut PropertyResolver<'_, Q>,
    first_degree: &[Resource],
    config: &TraversalConfig,
    dedup: &mut Deduplicator,
) where
    Q: ResourceQuery + ?Sized,
{
    for connecting in first_degree {
        for &property_id in &config.second_degree_property_ids {
            let filter = SearchFilter::references(property_id, connecting.id)
                .with_template(config.second_degree_template)
                .with_site(config.site_id);

            let hits = match catalog.search(&config.second_degree_type, &filter).await {
                Ok(hits) => hits,
                Err(err) => {
                    warn!(
                        property = %property_id,
                        connecting = %connecting.id,
                        error = %err,
                        "second-degree search failed, skipping"
                    );
                    continue;
                }
            };
            if hits.is_empty() {
                continue;
            }

            let property = properties.by_id(property_id).await;
            for target in hits {
                let entry = TraversalEntry {
                    resource: target,
                    connecting: connecting.clone(),
                    property: property.clone(),
                };
                dedup.insert(Some(property_id), entry);
            }
        }
    }
}

// ============================================================================
// Property lookups
// ============================================================================

/// Per-call memo of property reads. Dropped with the traversal.
struct PropertyResolver<'a, Q: ?Sized> {
    catalog: &'a Q,
    by_id: HashMap<PropertyId, Option<Property>>,
    by_term: HashMap<String, Option<Property>>,
}

impl<'a, Q> PropertyResolver<'a, Q>
where
    Q: ResourceQuery + ?Sized,
{
    fn new(catalog: &'a Q) -> Self {
        Self { catalog, by_id: HashMap::new(), by_term: HashMap::new() }
    }

    async fn by_term(&mut self, term: &str) -> Option<Property> {
        if let Some(cached) = self.by_term.get(term) {
            return cached.clone();
        }
        let resolved = absorb(self.catalog.read_property_by_term(term).await, term);
        self.by_term.insert(term.to_owned(), resolved.clone());
        resolved
    }

    async fn by_id(&mut self, id: PropertyId) -> Option<Property> {
        if let Some(cached) = self.by_id.get(&id) {
            return cached.clone();
        }
        let resolved = absorb(self.catalog.read_property(id).await, &id.to_string());
        self.by_id.insert(id, resolved.clone());
        resolved
    }
}

/// A missing property is routine; anything else is worth a warning.
fn absorb(result: Result<Property>, key: &str) -> Option<Property> {
    match result {
        Ok(property) => Some(property),
        Err(Error::NotFound(_)) => {
            debug!(property = key, "property not found, continuing without it");
            None
        }
        Err(err) => {
            warn!(property = key, error = %err, "property lookup failed, continuing without it");
            None
        }
    }
}
