use crate::{
    error::RewriteError,
    filter::{Expression, Function, PropertyRef},
    rewrite::{Context, FilterRewriter},
    value::Value,
};
use tracing::{debug, warn};

impl FilterRewriter {
    pub(crate) fn rewrite_expression(
        &self,
        expr: &Expression,
        ctx: Context<'_>,
    ) -> Result<Expression, RewriteError> {
        match expr {
            Expression::Property(property) => {
                self.rewrite_property(property, ctx).map(Expression::Property)
            }
            Expression::Literal(value) => Ok(Expression::Literal(self.rewrite_literal(value, ctx))),
            Expression::Function(function) => {
                self.rewrite_function(function).map(Expression::Function)
            }
        }
    }

    fn rewrite_property(
        &self,
        property: &PropertyRef,
        ctx: Context<'_>,
    ) -> Result<PropertyRef, RewriteError> {
        let name = self.resolve_name(property);

        if matches!(ctx, Context::SpatialTarget)
            && name != self.options.any_geo_attribute
            && !self.resolver.is_geometry(&name)
        {
            return Err(RewriteError::unsupported_spatial_target(&property.name));
        }

        Ok(PropertyRef::new(name))
    }

    /// External name → internal attribute name.
    ///
    /// Bounding-box aliases short-circuit to the any-geometry attribute.
    /// Names the resolver does not know pass through unchanged.
    fn resolve_name(&self, property: &PropertyRef) -> String {
        let name = property.name.trim();

        if self
            .options
            .bounding_box_aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
        {
            return self.options.any_geo_attribute.clone();
        }

        match self.resolver.resolve(name, property.namespaces.as_ref()) {
            Some(internal) => internal,
            None => {
                debug!(property = %property.name, "unresolved property name passed through");
                property.name.clone()
            }
        }
    }

    /// Type a literal against its sibling, then bring geometries into the
    /// target CRS. Neither step fails the rewrite.
    fn rewrite_literal(&self, value: &Value, ctx: Context<'_>) -> Value {
        let value = match (value.as_text(), ctx) {
            (Some(text), Context::Sibling(Expression::Property(sibling))) => {
                match self.resolver.primitive_format(&sibling.name) {
                    Some(format) => match format.coerce_text(text) {
                        Ok(coerced) => coerced,
                        Err(err) => {
                            debug!(attribute = %sibling.name, %err, "literal left uncoerced");
                            value.clone()
                        }
                    },
                    None => value.clone(),
                }
            }
            _ => value.clone(),
        };

        self.normalize_crs(value)
    }

    pub(crate) fn normalize_crs(&self, value: Value) -> Value {
        let Value::Geometry(geometry) = value else {
            return value;
        };

        let target = &self.options.target_crs;
        if !geometry.needs_reprojection(target) {
            return Value::Geometry(geometry);
        }

        match self.transforms.transform(&geometry, target) {
            Ok(reprojected) => Value::Geometry(reprojected),
            Err(err) => {
                warn!(%err, %geometry, target = %target, "geometry kept in its source CRS");
                Value::Geometry(geometry)
            }
        }
    }

    /// Fuzzy functions rewrite only their property argument; every other
    /// function rewrites each argument without sibling context.
    pub(crate) fn rewrite_function(&self, function: &Function) -> Result<Function, RewriteError> {
        let args = if function.is_fuzzy() {
            let mut args = function.args.clone();
            if let Some(first) = function.args.first() {
                args[0] = self.rewrite_expression(first, Context::None)?;
            }
            args
        } else {
            function
                .args
                .iter()
                .map(|arg| self.rewrite_expression(arg, Context::None))
                .collect::<Result<_, _>>()?
        };

        Ok(Function {
            name: function.name.clone(),
            args,
            return_format: function.return_format,
        })
    }
}
