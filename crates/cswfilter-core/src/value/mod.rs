mod format;


use crate::geometry::Geometry;
use chrono::{DateTime, Utc};
use std::fmt;

// re-exports
pub use format::{CoercionError, PrimitiveFormat};

///
/// Value
///
/// Literal payload of a predicate. The variant doubles as the literal's
/// inferred type tag.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
    Geometry(Geometry),
    Period(Period),
}

impl Value {
    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Self::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Short, stable name of the value's variant for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Geometry(_) => "geometry",
            Self::Period(_) => "period",
        }
    }

    /// Convert this value into `format`'s native representation.
    ///
    /// Text is parsed; numbers widen or narrow when the target is numeric and
    /// the value fits; everything else must already match.
    pub fn convert_to(&self, format: PrimitiveFormat) -> Result<Self, CoercionError> {
        match (self, format) {
            (Self::Text(text), _) => format.coerce_text(text),
            (Self::Null, _) => Ok(Self::Null),
            (Self::Int(v), PrimitiveFormat::Double | PrimitiveFormat::Float) => {
                #[expect(clippy::cast_precision_loss)]
                let widened = *v as f64;
                Ok(Self::Float(widened))
            }
            (Self::Int(v), PrimitiveFormat::String) => Ok(Self::Text(v.to_string())),
            (Self::Int(v), _) if format.is_integral() => format.check_integral_range(*v),
            (Self::Float(v), PrimitiveFormat::String) => Ok(Self::Text(v.to_string())),
            (Self::Bool(v), PrimitiveFormat::String) => Ok(Self::Text(v.to_string())),
            (value, format) if format.matches(value) => Ok(value.clone()),
            (value, format) => Err(CoercionError::mismatch(value, format)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Date(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Geometry(v) => write!(f, "{v}"),
            Self::Period(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Geometry> for Value {
    fn from(v: Geometry) -> Self {
        Self::Geometry(v)
    }
}

impl From<Period> for Value {
    fn from(v: Period) -> Self {
        Self::Period(v)
    }
}

///
/// Period
///
/// Half-open instant interval `[begin, end)`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Period {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    #[must_use]
    pub const fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { begin, end }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin.to_rfc3339(), self.end.to_rfc3339())
    }
}
