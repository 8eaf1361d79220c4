//! Core runtime for cswfilter: the predicate AST, literal values, geometry,
//! the attribute resolver seam, and the rewriting passes that translate a
//! CSW search predicate into the catalog's internal vocabulary.
#![warn(unreachable_pub)]

pub mod clock;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod query;
pub mod resolver;
pub mod rewrite;
pub mod units;
pub mod value;

///
/// CONSTANTS
///

/// Internal attribute every bounding-box alias resolves to.
pub const ANY_GEO: &str = "anyGeo";

/// Internal attribute carrying the catalog's full-text index.
pub const ANY_TEXT: &str = "anyText";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, clocks, or transforms are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{
            CompareOp, ComparePredicate, DistanceOp, DistancePredicate, Expression, Function,
            Predicate, PropertyRef, SpatialOp, SpatialPredicate, TemporalOp, TemporalPredicate,
        },
        geometry::{Coord, Crs, Geometry, Shape},
        query::{Query, QueryRequest, SortBy, SortOrder},
        resolver::{AttributeResolver, NamespaceContext},
        value::{Period, PrimitiveFormat, Value},
    };
}
