use crate::units::UnitError;
use thiserror::Error as ThisError;

///
/// RewriteError
///
/// Fatal rewrite failures. A predicate either rewrites completely or the
/// call fails with one of these; there are no partial results.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RewriteError {
    #[error("property '{property}' does not resolve to a geometry attribute")]
    UnsupportedSpatialTarget { property: String },

    #[error("unconvertible distance: {0}")]
    UnconvertibleDistanceUnit(#[from] UnitError),
}

impl RewriteError {
    pub(crate) fn unsupported_spatial_target(property: impl Into<String>) -> Self {
        Self::UnsupportedSpatialTarget {
            property: property.into(),
        }
    }
}
