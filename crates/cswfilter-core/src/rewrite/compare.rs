use crate::{
    error::RewriteError,
    filter::{CompareOp, ComparePredicate, Expression, Function, Predicate},
    rewrite::FilterRewriter,
    value::{Period, PrimitiveFormat, Value},
};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

///
/// DateBound
///
/// The date-valued property and the date literal of a comparison, in
/// whichever order they appear.
///

struct DateBound {
    property: Expression,
    date: DateTime<Utc>,
}

impl DateBound {
    fn from_operands(left: &Expression, right: &Expression) -> Option<Self> {
        let (property, literal) = match (left, right) {
            (Expression::Property(_), Expression::Literal(value)) => (left, value),
            (Expression::Literal(value), Expression::Property(_)) => (right, value),
            _ => return None,
        };

        literal.as_date().map(|date| Self {
            property: property.clone(),
            date: *date,
        })
    }
}

impl FilterRewriter {
    pub(crate) fn rewrite_compare(
        &self,
        cmp: &ComparePredicate,
    ) -> Result<Predicate, RewriteError> {
        if cmp.op == CompareOp::Eq {
            if let Expression::Function(function) = &cmp.left {
                if let Some(rewritten) =
                    self.rewrite_function_equality(function, &cmp.right, cmp.match_case)?
                {
                    return Ok(rewritten);
                }
            }
        }

        let (left, right) = self.rewrite_operands(&cmp.left, &cmp.right)?;

        let predicate = match cmp.op {
            CompareOp::Eq | CompareOp::Ne => Predicate::Compare(ComparePredicate {
                op: cmp.op,
                left,
                right,
                match_case: cmp.match_case,
            }),
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
                self.downgrade_ordering(cmp.op, left, right, cmp.match_case)
            }
        };

        Ok(predicate)
    }

    /// `function(...) = literal` with a typed function: the literal is read
    /// as the function's return type. Any other shape takes the generic path.
    fn rewrite_function_equality(
        &self,
        function: &Function,
        right: &Expression,
        match_case: bool,
    ) -> Result<Option<Predicate>, RewriteError> {
        let (Some(format), Expression::Literal(value)) = (function.return_format, right) else {
            return Ok(None);
        };

        let function = self.rewrite_function(function)?;
        let typed = match value.convert_to(format) {
            Ok(typed) => typed,
            Err(err) => {
                debug!(function = %function.name, %err, "literal left in its original type");
                value.clone()
            }
        };

        Ok(Some(Predicate::Compare(ComparePredicate {
            op: CompareOp::Eq,
            left: Expression::Function(function),
            right: Expression::Literal(self.normalize_crs(typed)),
            match_case,
        })))
    }

    ///
    /// Ordering comparisons over date attributes become temporal predicates.
    ///
    /// - `>` → After, `<` → Before, operands as given
    /// - `>=` → During `[date, now)` on the property
    /// - `<=` → Before `date + date_increment` on the property
    ///
    /// The inclusive forms pick out the date literal and the property by
    /// kind, not by position. Without a date literal, or with a
    /// non-positive increment, they stay as comparisons.
    ///
    fn downgrade_ordering(
        &self,
        op: CompareOp,
        left: Expression,
        right: Expression,
        match_case: bool,
    ) -> Predicate {
        if !self.is_date_property(&left) && !self.is_date_property(&right) {
            return Self::comparison(op, left, right, match_case);
        }

        match op {
            CompareOp::Gt => Predicate::after(left, right),
            CompareOp::Lt => Predicate::before(left, right),
            CompareOp::Gte | CompareOp::Lte => {
                let Some(bound) = DateBound::from_operands(&left, &right) else {
                    return Self::comparison(op, left, right, match_case);
                };

                if op == CompareOp::Gte {
                    let period = Period::new(bound.date, self.clock.now());
                    return Predicate::during(bound.property, period);
                }

                let increment = self.options.date_increment;
                if increment <= TimeDelta::zero() {
                    return Self::comparison(op, left, right, match_case);
                }

                match bound.date.checked_add_signed(increment) {
                    Some(limit) => Predicate::before(bound.property, Expression::literal(limit)),
                    None => Self::comparison(op, left, right, match_case),
                }
            }
            CompareOp::Eq | CompareOp::Ne => Self::comparison(op, left, right, match_case),
        }
    }

    fn is_date_property(&self, expr: &Expression) -> bool {
        expr.as_property().is_some_and(|property| {
            self.resolver.primitive_format(&property.name) == Some(PrimitiveFormat::Date)
        })
    }

    const fn comparison(
        op: CompareOp,
        left: Expression,
        right: Expression,
        match_case: bool,
    ) -> Predicate {
        Predicate::Compare(ComparePredicate {
            op,
            left,
            right,
            match_case,
        })
    }
}
