use crate::{
    error::RewriteError,
    filter::{DistancePredicate, Expression, Predicate, SpatialOp, SpatialPredicate},
    rewrite::{Context, FilterRewriter},
    units::{LinearUnit, convert_to_meters},
};

impl FilterRewriter {
    pub(crate) fn rewrite_spatial(
        &self,
        spatial: &SpatialPredicate,
    ) -> Result<Predicate, RewriteError> {
        let (left, right) = self.rewrite_operands(&spatial.left, &spatial.right)?;

        Ok(Predicate::spatial(spatial.op, left, right))
    }

    /// Bounding-box filters are evaluated as `Within` over a geometry-valued
    /// attribute.
    pub(crate) fn rewrite_bounding_box(
        &self,
        property: &Expression,
        envelope: &Expression,
    ) -> Result<Predicate, RewriteError> {
        let property = self.rewrite_expression(property, Context::SpatialTarget)?;
        let envelope = self.rewrite_expression(envelope, Context::Sibling(&property))?;

        Ok(Predicate::spatial(SpatialOp::Within, property, envelope))
    }

    /// Distances are carried in meters downstream.
    pub(crate) fn rewrite_distance(
        &self,
        distance: &DistancePredicate,
    ) -> Result<Predicate, RewriteError> {
        let meters = convert_to_meters(distance.distance, &distance.unit)?;
        let (left, right) = self.rewrite_operands(&distance.left, &distance.right)?;

        Ok(Predicate::Distance(DistancePredicate {
            op: distance.op,
            left,
            right,
            distance: meters,
            unit: LinearUnit::CANONICAL.name().to_string(),
        }))
    }
}
