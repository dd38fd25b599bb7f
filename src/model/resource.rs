//! Resource in the catalog graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{Value, ValueMap};

/// Type tag used when a hop does not name one.
pub const DEFAULT_RESOURCE_TYPE: &str = "items";

/// Opaque resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource template (schema) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u64);

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Site (publication scope) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A read-only snapshot of a catalog resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    /// Collection the resource lives in (`items`, `item_sets`, `media`, ...).
    pub resource_type: String,
    #[serde(default)]
    pub template: Option<TemplateId>,
    /// Sites the resource is published on. Only the catalog interprets these.
    #[serde(default)]
    pub sites: Vec<SiteId>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub values: ValueMap,
}

impl Resource {
    pub fn new(id: ResourceId, resource_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            resource_type: resource_type.into(),
            template: None,
            sites: Vec::new(),
            created: None,
            values: ValueMap::new(),
        }
    }

    /// Shorthand for a resource in the default `items` collection.
    pub fn item(id: u64, title: impl Into<String>) -> Self {
        Self::new(ResourceId(id), DEFAULT_RESOURCE_TYPE, title)
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_site(mut self, site: SiteId) -> Self {
        if !self.sites.contains(&site) {
            self.sites.push(site);
        }
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_value(mut self, term: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push(term, value.into());
        self
    }

    /// Add a resource-reference value pointing at a snapshot of `target`.
    pub fn with_reference(self, term: impl Into<String>, target: &Resource) -> Self {
        self.with_value(term, Value::Resource(Box::new(target.clone())))
    }

    pub fn is_type(&self, resource_type: &str) -> bool {
        self.resource_type == resource_type
    }

    pub fn in_site(&self, site: SiteId) -> bool {
        self.sites.contains(&site)
    }

    /// All values stored under `term`; empty when the term is absent.
    pub fn values_of(&self, term: &str) -> &[Value] {
        self.values.get(term)
    }

    /// Every outgoing resource reference as `(term, target)`, in value order.
    pub fn references(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.values.iter().flat_map(|tv| {
            tv.values
                .iter()
                .filter_map(move |v| v.as_resource().map(|r| (tv.term.as_str(), r)))
        })
    }

    /// True if a value under `term` references the resource `target`.
    pub fn references_under(&self, term: &str, target: ResourceId) -> bool {
        self.values_of(term)
            .iter()
            .any(|v| v.as_resource().is_some_and(|r| r.id == target))
    }
}
