//! Traversal configuration.
//!
//! Every option is optional. The serialized form uses the camelCase option
//! names callers already pass around (`firstDegreeResourceType`, `perPage`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{PropertyId, SiteId, TemplateId, DEFAULT_RESOURCE_TYPE};
use crate::{Error, Result};

/// Which way the second hop points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Second-degree resources are those referenced BY first-degree resources.
    #[default]
    Direct,
    /// Second-degree resources are those that reference first-degree resources.
    Reverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Direct => write!(f, "direct"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Direction::Direct),
            "reverse" => Ok(Direction::Reverse),
            other => Err(Error::InvalidConfig(format!("unknown direction '{other}'"))),
        }
    }
}

/// Page window applied after deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-indexed.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Options for one traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalConfig {
    #[serde(alias = "firstDegreeResourceType")]
    pub first_degree_type: String,
    #[serde(alias = "secondDegreeResourceType")]
    pub second_degree_type: String,
    pub first_degree_template: Option<TemplateId>,
    pub second_degree_template: Option<TemplateId>,
    /// Empty means every property in the catalog.
    pub first_degree_property_ids: Vec<PropertyId>,
    /// Empty means unrestricted in direct mode. Required in reverse mode.
    pub second_degree_property_ids: Vec<PropertyId>,
    pub direction: Direction,
    #[serde(alias = "siteFilter")]
    pub site_id: Option<SiteId>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            first_degree_type: DEFAULT_RESOURCE_TYPE.to_owned(),
            second_degree_type: DEFAULT_RESOURCE_TYPE.to_owned(),
            first_degree_template: None,
            second_degree_template: None,
            first_degree_property_ids: Vec::new(),
            second_degree_property_ids: Vec::new(),
            direction: Direction::Direct,
            site_id: None,
            page: None,
            per_page: None,
        }
    }
}

impl TraversalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON options object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_first_degree_type(mut self, resource_type: impl Into<String>) -> Self {
        self.first_degree_type = resource_type.into();
        self
    }

    pub fn with_second_degree_type(mut self, resource_type: impl Into<String>) -> Self {
        self.second_degree_type = resource_type.into();
        self
    }

    pub fn with_first_degree_template(mut self, template: TemplateId) -> Self {
        self.first_degree_template = Some(template);
        self
    }

    pub fn with_second_degree_template(mut self, template: TemplateId) -> Self {
        self.second_degree_template = Some(template);
        self
    }

    pub fn with_first_degree_properties(mut self, ids: impl IntoIterator<Item = PropertyId>) -> Self {
        self.first_degree_property_ids = ids.into_iter().collect();
        self
    }

    pub fn with_second_degree_properties(mut self, ids: impl IntoIterator<Item = PropertyId>) -> Self {
        self.second_degree_property_ids = ids.into_iter().collect();
        self
    }

    pub fn with_site(mut self, site: SiteId) -> Self {
        self.site_id = Some(site);
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// The page window, when both `page` and `per_page` are set.
    pub fn pagination(&self) -> Option<Pagination> {
        match (self.page, self.per_page) {
            (Some(page), Some(per_page)) => Some(Pagination { page, per_page }),
            _ => None,
        }
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.direction == Direction::Reverse && self.second_degree_property_ids.is_empty() {
            return Err(Error::InvalidConfig(
                "reverse traversal needs at least one second-degree property".into(),
            ));
        }
        if self.page == Some(0) {
            return Err(Error::InvalidConfig("page is 1-indexed, got 0".into()));
        }
        if self.per_page == Some(0) {
            return Err(Error::InvalidConfig("perPage must be at least 1".into()));
        }
        Ok(())
    }
}
