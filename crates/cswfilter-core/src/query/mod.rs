//! Module: query
//! Responsibility: the catalog query request envelope and the transformers
//! that rewrite its filter before execution.
//! Does not own: predicate rewriting rules or query execution.

mod provider;
mod transformer;


pub use provider::{QualifiedName, TransformerProvider};
pub use transformer::{QueryFilterTransformer, QueryRequestTransformer};

use crate::filter::Predicate;
use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

/// Free-form request properties forwarded unchanged to execution.
pub type Properties = BTreeMap<String, serde_json::Value>;

///
/// SortOrder
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

///
/// SortBy
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortBy {
    pub property: String,
    pub order: SortOrder,
}

impl SortBy {
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            order: SortOrder::Descending,
        }
    }
}

///
/// Query
///
/// Paging is CSW-style: `start_index` is 1-based.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub filter: Option<Predicate>,
    pub start_index: u32,
    pub page_size: u32,
    pub sort_by: Vec<SortBy>,
    pub timeout: Option<Duration>,
    pub requests_total_count: bool,
}

impl Query {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    #[must_use]
    pub const fn new(filter: Option<Predicate>) -> Self {
        Self {
            filter,
            start_index: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort_by: Vec::new(),
            timeout: None,
            requests_total_count: false,
        }
    }

    #[must_use]
    pub fn page(mut self, start_index: u32, page_size: u32) -> Self {
        self.start_index = start_index;
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by.push(sort);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_total_count(mut self) -> Self {
        self.requests_total_count = true;
        self
    }

    /// Same query over a different filter.
    #[must_use]
    pub fn with_filter(&self, filter: Option<Predicate>) -> Self {
        Self {
            filter,
            start_index: self.start_index,
            page_size: self.page_size,
            sort_by: self.sort_by.clone(),
            timeout: self.timeout,
            requests_total_count: self.requests_total_count,
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(None)
    }
}

///
/// QueryRequest
///
/// `enterprise` fans the query out to every federated source and takes
/// precedence over `source_ids`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryRequest {
    pub query: Query,
    pub enterprise: bool,
    pub source_ids: BTreeSet<String>,
    pub properties: Properties,
}

impl QueryRequest {
    #[must_use]
    pub fn new(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn enterprise(mut self) -> Self {
        self.enterprise = true;
        self
    }

    #[must_use]
    pub fn source(mut self, id: impl Into<String>) -> Self {
        self.source_ids.insert(id.into());
        self
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
