//! Module: rewrite
//! Responsibility: translate a CSW predicate tree into the catalog's
//! internal attribute vocabulary, CRS, units, and supported operators.
//! Does not own: predicate decoding, query planning, or execution.
//! Boundary: request transformers call `FilterRewriter::rewrite` once per
//! query; the input tree is never mutated.

mod compare;
mod expression;
mod spatial;

#[cfg(test)]
mod tests;

use crate::{
    ANY_GEO,
    clock::{Clock, SystemClock},
    error::RewriteError,
    filter::{Expression, Predicate},
    geometry::{BuiltinTransforms, Crs, CrsTransform},
    resolver::AttributeResolver,
};
use chrono::TimeDelta;
use std::{fmt, sync::Arc};

///
/// RewriteOptions
///

#[derive(Clone, Debug, PartialEq)]
pub struct RewriteOptions {
    /// CRS every geometry literal is expressed in after rewriting.
    pub target_crs: Crs,

    /// Internal attribute the bounding-box aliases resolve to.
    pub any_geo_attribute: String,

    /// External names that always mean "any geometry", bypassing the resolver.
    pub bounding_box_aliases: Vec<String>,

    /// Step added to a date when `<=` is rewritten as strictly-before.
    pub date_increment: TimeDelta,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            target_crs: Crs::wgs84(),
            any_geo_attribute: ANY_GEO.to_string(),
            bounding_box_aliases: vec!["BoundingBox".to_string(), "ows:BoundingBox".to_string()],
            date_increment: TimeDelta::milliseconds(1),
        }
    }
}

///
/// Context
///
/// What the caller knows about the expression being rewritten.
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum Context<'e> {
    None,

    /// Already-rewritten sibling operand; drives literal coercion.
    Sibling(&'e Expression),

    /// First operand of a spatial predicate; must be geometry-valued.
    SpatialTarget,
}

///
/// FilterRewriter
///
/// Stateless after construction and safe to share across threads.
///

#[derive(Clone)]
pub struct FilterRewriter {
    resolver: Arc<dyn AttributeResolver>,
    transforms: Arc<dyn CrsTransform>,
    clock: Arc<dyn Clock>,
    options: RewriteOptions,
}

impl FilterRewriter {
    #[must_use]
    pub fn new(resolver: Arc<dyn AttributeResolver>) -> Self {
        Self {
            resolver,
            transforms: Arc::new(BuiltinTransforms),
            clock: Arc::new(SystemClock),
            options: RewriteOptions::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_transforms(mut self, transforms: Arc<dyn CrsTransform>) -> Self {
        self.transforms = transforms;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite `predicate` into internal vocabulary.
    ///
    /// `Ok(None)` is the absent filter: every logical branch collapsed away.
    pub fn rewrite(&self, predicate: &Predicate) -> Result<Option<Predicate>, RewriteError> {
        self.rewrite_predicate(predicate)
    }

    fn rewrite_predicate(&self, predicate: &Predicate) -> Result<Option<Predicate>, RewriteError> {
        let rewritten = match predicate {
            Predicate::Include => Predicate::Include,
            Predicate::Exclude => Predicate::Exclude,

            Predicate::And(children) => return self.rewrite_junction(children, Predicate::And),
            Predicate::Or(children) => return self.rewrite_junction(children, Predicate::Or),
            Predicate::Not(inner) => match self.rewrite_predicate(inner)? {
                Some(inner) => Predicate::not(inner),
                // NOT(match-all)
                None => Predicate::Exclude,
            },

            Predicate::Compare(cmp) => self.rewrite_compare(cmp)?,
            Predicate::Between { expr, lower, upper } => {
                let expr = self.rewrite_expression(expr, Context::None)?;
                let lower = self.rewrite_expression(lower, Context::Sibling(&expr))?;
                let upper = self.rewrite_expression(upper, Context::Sibling(&expr))?;
                Predicate::Between { expr, lower, upper }
            }
            Predicate::Like {
                expr,
                pattern,
                wildcard,
                single_char,
                escape,
                match_case,
            } => Predicate::Like {
                expr: self.rewrite_expression(expr, Context::None)?,
                pattern: pattern.clone(),
                wildcard: *wildcard,
                single_char: *single_char,
                escape: *escape,
                match_case: *match_case,
            },
            Predicate::IsNull { expr } => Predicate::IsNull {
                expr: self.rewrite_expression(expr, Context::None)?,
            },

            Predicate::Temporal(temporal) => {
                let (left, right) = self.rewrite_operands(&temporal.left, &temporal.right)?;
                Predicate::temporal(temporal.op, left, right)
            }

            Predicate::Spatial(spatial) => self.rewrite_spatial(spatial)?,
            Predicate::BoundingBox { property, envelope } => {
                self.rewrite_bounding_box(property, envelope)?
            }
            Predicate::Distance(distance) => self.rewrite_distance(distance)?,

            Predicate::Function(function) => Predicate::Function(self.rewrite_function(function)?),
        };

        Ok(Some(rewritten))
    }

    ///
    /// Rewrite an AND / OR node.
    ///
    /// Rules:
    /// - children rewriting to no predicate are dropped
    /// - no survivors        → no predicate
    /// - a single survivor   → that survivor, unwrapped
    /// - otherwise the same node over the survivors, in original order
    ///
    fn rewrite_junction(
        &self,
        children: &[Predicate],
        rebuild: fn(Vec<Predicate>) -> Predicate,
    ) -> Result<Option<Predicate>, RewriteError> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            if let Some(child) = self.rewrite_predicate(child)? {
                out.push(child);
            }
        }

        match out.len() {
            0 => Ok(None),
            1 => Ok(out.pop()),
            _ => Ok(Some(rebuild(out))),
        }
    }

    /// Rewrite a binary node's operands left to right.
    ///
    /// The rewritten left operand is the coercion context for the right one.
    /// Context never flows backwards, so a literal on the left keeps its type.
    pub(crate) fn rewrite_operands(
        &self,
        left: &Expression,
        right: &Expression,
    ) -> Result<(Expression, Expression), RewriteError> {
        let left = self.rewrite_expression(left, Context::None)?;
        let right = self.rewrite_expression(right, Context::Sibling(&left))?;

        Ok((left, right))
    }
}

impl fmt::Debug for FilterRewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRewriter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
