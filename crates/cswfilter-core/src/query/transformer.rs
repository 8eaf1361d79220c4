use crate::{
    error::RewriteError,
    query::{Properties, QueryRequest},
    rewrite::FilterRewriter,
};
use tracing::debug;

///
/// QueryRequestTransformer
///
/// Pre-execution hook over a catalog query request.
///

pub trait QueryRequestTransformer: Send + Sync {
    fn transform(
        &self,
        request: &QueryRequest,
        properties: &Properties,
    ) -> Result<QueryRequest, RewriteError>;
}

///
/// QueryFilterTransformer
///
/// Rewrites the request's filter and passes every other field through.
///

#[derive(Clone, Debug)]
pub struct QueryFilterTransformer {
    rewriter: FilterRewriter,
}

impl QueryFilterTransformer {
    #[must_use]
    pub const fn new(rewriter: FilterRewriter) -> Self {
        Self { rewriter }
    }

    #[must_use]
    pub const fn rewriter(&self) -> &FilterRewriter {
        &self.rewriter
    }
}

impl QueryRequestTransformer for QueryFilterTransformer {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(enterprise = request.enterprise, sources = request.source_ids.len())
    )]
    fn transform(
        &self,
        request: &QueryRequest,
        properties: &Properties,
    ) -> Result<QueryRequest, RewriteError> {
        let filter = match &request.query.filter {
            Some(filter) => self.rewriter.rewrite(filter)?,
            None => None,
        };

        if filter.is_none() && request.query.filter.is_some() {
            debug!("filter collapsed to no predicate");
        }
        debug!(properties = properties.len(), "query filter rewritten");

        Ok(QueryRequest {
            query: request.query.with_filter(filter),
            enterprise: request.enterprise,
            source_ids: request.source_ids.clone(),
            properties: request.properties.clone(),
        })
    }
}
