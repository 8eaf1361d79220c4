mod expression;


pub use expression::{Expression, FUZZY_FUNCTION, Function, PropertyRef};

use crate::value::{Period, Value};

///
/// Predicate AST
///
/// In-memory search predicate as produced by the CSW request decoder.
/// Nothing here resolves names or types; that is the rewriter's job.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub op: CompareOp,
    pub left: Expression,
    pub right: Expression,

    /// Only meaningful for `Eq` / `Ne`.
    pub match_case: bool,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(op: CompareOp, left: Expression, right: Expression) -> Self {
        Self {
            op,
            left,
            right,
            match_case: true,
        }
    }
}

///
/// TemporalOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TemporalOp {
    After,
    Before,

    /// Right operand is a `Value::Period`.
    During,
}

///
/// TemporalPredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct TemporalPredicate {
    pub op: TemporalOp,
    pub left: Expression,
    pub right: Expression,
}

///
/// SpatialOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpatialOp {
    Contains,
    Crosses,
    Disjoint,
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

///
/// SpatialPredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialPredicate {
    pub op: SpatialOp,
    pub left: Expression,
    pub right: Expression,
}

///
/// DistanceOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DistanceOp {
    Beyond,
    DWithin,
}

///
/// DistancePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct DistancePredicate {
    pub op: DistanceOp,
    pub left: Expression,
    pub right: Expression,
    pub distance: f64,
    pub unit: String,
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Matches every record.
    Include,

    /// Matches no record.
    Exclude,

    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),

    Compare(ComparePredicate),
    Between {
        expr: Expression,
        lower: Expression,
        upper: Expression,
    },
    Like {
        expr: Expression,
        pattern: String,
        wildcard: char,
        single_char: char,
        escape: char,
        match_case: bool,
    },
    IsNull {
        expr: Expression,
    },

    Temporal(TemporalPredicate),

    Spatial(SpatialPredicate),
    BoundingBox {
        property: Expression,
        envelope: Expression,
    },
    Distance(DistancePredicate),

    /// Boolean-valued function applied as a predicate.
    Function(Function),
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub const fn compare(op: CompareOp, left: Expression, right: Expression) -> Self {
        Self::Compare(ComparePredicate::new(op, left, right))
    }

    #[must_use]
    pub const fn eq(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    #[must_use]
    pub const fn ne(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Ne, left, right)
    }

    #[must_use]
    pub const fn gt(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    #[must_use]
    pub const fn gte(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Gte, left, right)
    }

    #[must_use]
    pub const fn lt(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    #[must_use]
    pub const fn lte(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Lte, left, right)
    }

    #[must_use]
    pub const fn between(expr: Expression, lower: Expression, upper: Expression) -> Self {
        Self::Between { expr, lower, upper }
    }

    /// SQL-style `LIKE` with `%`/`_` wildcards and `\` escape.
    #[must_use]
    pub fn like(expr: Expression, pattern: impl Into<String>) -> Self {
        Self::Like {
            expr,
            pattern: pattern.into(),
            wildcard: '%',
            single_char: '_',
            escape: '\\',
            match_case: true,
        }
    }

    #[must_use]
    pub const fn is_null(expr: Expression) -> Self {
        Self::IsNull { expr }
    }

    #[must_use]
    pub const fn temporal(op: TemporalOp, left: Expression, right: Expression) -> Self {
        Self::Temporal(TemporalPredicate { op, left, right })
    }

    #[must_use]
    pub const fn after(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::After, left, right)
    }

    #[must_use]
    pub const fn before(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::Before, left, right)
    }

    #[must_use]
    pub const fn during(expr: Expression, period: Period) -> Self {
        Self::temporal(TemporalOp::During, expr, Expression::Literal(Value::Period(period)))
    }

    #[must_use]
    pub const fn spatial(op: SpatialOp, left: Expression, right: Expression) -> Self {
        Self::Spatial(SpatialPredicate { op, left, right })
    }

    #[must_use]
    pub const fn bbox(property: Expression, envelope: Expression) -> Self {
        Self::BoundingBox { property, envelope }
    }

    #[must_use]
    pub fn distance(
        op: DistanceOp,
        left: Expression,
        right: Expression,
        distance: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self::Distance(DistancePredicate {
            op,
            left,
            right,
            distance,
            unit: unit.into(),
        })
    }

    #[must_use]
    pub fn beyond(
        left: Expression,
        right: Expression,
        distance: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self::distance(DistanceOp::Beyond, left, right, distance, unit)
    }

    #[must_use]
    pub fn dwithin(
        left: Expression,
        right: Expression,
        distance: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self::distance(DistanceOp::DWithin, left, right, distance, unit)
    }

    /// Number of direct children or operands, used for shape checks.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Include | Self::Exclude => 0,
            Self::And(children) | Self::Or(children) => children.len(),
            Self::Not(_) | Self::Like { .. } | Self::IsNull { .. } => 1,
            Self::Compare(_)
            | Self::Temporal(_)
            | Self::Spatial(_)
            | Self::BoundingBox { .. }
            | Self::Distance(_) => 2,
            Self::Between { .. } => 3,
            Self::Function(function) => function.args.len(),
        }
    }
}
