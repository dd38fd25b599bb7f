//! Shared fixtures for the end-to-end traversal tests.
//!
//! The catalog models a small events archive:
//!
//! ```text
//! Org#1  <-organizer-  Event#10 -attendee-> Person#5, -performer-> Person#6
//! Org#1  <-organizer-  Event#11 -attendee-> Person#5, Person#7
//! Org#1  <-sponsor-    Event#12 -attendee-> Person#6, -organizer-> Org#2
//! Person#20 -performerIn-> Event#10
//! Person#21 -performerIn-> Event#10, Event#11, Event#12
//! ```

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use second_degree::catalog::PropertyReference;
use second_degree::{
    Error, MemoryCatalog, Property, PropertyId, Resource, ResourceId, ResourceQuery, Result,
    SearchFilter, SiteId, TemplateId,
};

pub const ORGANIZER: PropertyId = PropertyId(1);
pub const ATTENDEE: PropertyId = PropertyId(2);
pub const PERFORMER: PropertyId = PropertyId(3);
pub const SPONSOR: PropertyId = PropertyId(4);
pub const PERFORMER_IN: PropertyId = PropertyId(5);
pub const SUBJECT: PropertyId = PropertyId(6);

pub const ORG: TemplateId = TemplateId(1);
pub const EVENT: TemplateId = TemplateId(2);
pub const PERSON: TemplateId = TemplateId(3);

pub const MAIN_SITE: SiteId = SiteId(1);
pub const GALA_SITE: SiteId = SiteId(2);

pub fn properties() -> Vec<Property> {
    vec![
        Property::new(ORGANIZER, "schema:organizer", "Organizer"),
        Property::new(ATTENDEE, "schema:attendee", "Attendee"),
        Property::new(PERFORMER, "schema:performer", "Performer"),
        Property::new(SPONSOR, "schema:sponsor", "Sponsor"),
        Property::new(PERFORMER_IN, "schema:performerIn", "Performer in"),
        Property::new(SUBJECT, "dcterms:subject", "Subject"),
    ]
}

fn person(id: u64, name: &str, year: i32) -> Resource {
    Resource::item(id, name)
        .with_template(PERSON)
        .with_site(MAIN_SITE)
        .with_created(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap())
}

/// The events archive described in the module docs.
pub fn events_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    for p in properties() {
        catalog.insert_property(p).unwrap();
    }

    let acme = Resource::item(1, "Acme Foundation").with_template(ORG);
    let other = Resource::item(2, "Other Org").with_template(ORG);

    let ada = person(5, "Ada", 1815);
    let grace = person(6, "Grace", 1906);
    let linus = person(7, "Linus", 1969);

    let launch = Resource::item(10, "Launch")
        .with_template(EVENT)
        .with_site(MAIN_SITE)
        .with_reference("schema:organizer", &acme)
        .with_reference("schema:attendee", &ada)
        .with_reference("schema:performer", &grace)
        .with_value("dcterms:subject", "launch party");
    let retro = Resource::item(11, "Retro")
        .with_template(EVENT)
        .with_site(MAIN_SITE)
        .with_reference("schema:organizer", &acme)
        .with_reference("schema:attendee", &ada)
        .with_reference("schema:attendee", &linus);
    let gala = Resource::item(12, "Gala")
        .with_template(EVENT)
        .with_site(GALA_SITE)
        .with_reference("schema:sponsor", &acme)
        .with_reference("schema:organizer", &other)
        .with_reference("schema:attendee", &grace);

    let edsger = person(20, "Edsger", 1930).with_reference("schema:performerIn", &launch);
    let barbara = person(21, "Barbara", 1939)
        .with_site(GALA_SITE)
        .with_reference("schema:performerIn", &launch)
        .with_reference("schema:performerIn", &retro)
        .with_reference("schema:performerIn", &gala);

    for r in [acme, other, ada, grace, linus, launch, retro, gala, edsger, barbara] {
        catalog.insert_resource(r);
    }
    catalog
}

pub fn seed(catalog: &MemoryCatalog) -> Resource {
    catalog.resource(ResourceId(1)).unwrap()
}

/// `(second-degree id, connecting id, property id)` for compact assertions.
pub fn triples(result: &second_degree::TraversalResult) -> Vec<(u64, u64, Option<u64>)> {
    result
        .iter()
        .map(|e| (e.resource.id.0, e.connecting.id.0, e.property.as_ref().map(|p| p.id.0)))
        .collect()
}

// ============================================================================
// Failure injection
// ============================================================================

/// Wraps a catalog and fails selected calls with `Error::QueryFailure`.
pub struct FlakyCatalog {
    pub inner: MemoryCatalog,
    /// Searches for these properties fail whatever the target.
    pub failing_properties: Vec<PropertyId>,
    /// Searches for exactly these references fail.
    pub failing_references: Vec<PropertyReference>,
    pub fail_listing: bool,
    pub fail_property_reads: bool,
}

impl FlakyCatalog {
    pub fn new(inner: MemoryCatalog) -> Self {
        Self {
            inner,
            failing_properties: Vec::new(),
            failing_references: Vec::new(),
            fail_listing: false,
            fail_property_reads: false,
        }
    }

    fn should_fail(&self, filter: &SearchFilter) -> bool {
        filter.reference.is_some_and(|r| {
            self.failing_properties.contains(&r.property) || self.failing_references.contains(&r)
        })
    }
}

#[async_trait]
impl ResourceQuery for FlakyCatalog {
    async fn search(&self, resource_type: &str, filter: &SearchFilter) -> Result<Vec<Resource>> {
        if self.should_fail(filter) {
            return Err(Error::QueryFailure(format!("injected failure for {filter:?}")));
        }
        self.inner.search(resource_type, filter).await
    }

    async fn read_property(&self, id: PropertyId) -> Result<Property> {
        if self.fail_property_reads {
            return Err(Error::QueryFailure("property service down".into()));
        }
        self.inner.read_property(id).await
    }

    async fn read_property_by_term(&self, term: &str) -> Result<Property> {
        if self.fail_property_reads {
            return Err(Error::QueryFailure("property service down".into()));
        }
        self.inner.read_property_by_term(term).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        if self.fail_listing {
            return Err(Error::QueryFailure("listing unavailable".into()));
        }
        self.inner.list_properties().await
    }
}

/// Wraps a catalog and counts every call.
#[derive(Default)]
pub struct CountingCatalog {
    pub inner: MemoryCatalog,
    pub searches: AtomicUsize,
    pub property_reads: AtomicUsize,
    pub listings: AtomicUsize,
}

impl CountingCatalog {
    pub fn new(inner: MemoryCatalog) -> Self {
        Self { inner, ..Self::default() }
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn property_reads(&self) -> usize {
        self.property_reads.load(Ordering::SeqCst)
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceQuery for CountingCatalog {
    async fn search(&self, resource_type: &str, filter: &SearchFilter) -> Result<Vec<Resource>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(resource_type, filter).await
    }

    async fn read_property(&self, id: PropertyId) -> Result<Property> {
        self.property_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_property(id).await
    }

    async fn read_property_by_term(&self, term: &str) -> Result<Property> {
        self.property_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_property_by_term(term).await
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.inner.list_properties().await
    }
}
