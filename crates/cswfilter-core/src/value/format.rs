use crate::{geometry::Geometry, value::Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// CoercionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CoercionError {
    #[error("cannot read '{text}' as {format}")]
    Unparseable {
        text: String,
        format: PrimitiveFormat,
    },

    #[error("value {value} is out of range for {format}")]
    OutOfRange { value: i64, format: PrimitiveFormat },

    #[error("{kind} value cannot be represented as {format}")]
    Mismatch {
        kind: &'static str,
        format: PrimitiveFormat,
    },
}

impl CoercionError {
    pub(crate) fn unparseable(text: &str, format: PrimitiveFormat) -> Self {
        Self::Unparseable {
            text: text.to_string(),
            format,
        }
    }

    pub(crate) const fn mismatch(value: &Value, format: PrimitiveFormat) -> Self {
        Self::Mismatch {
            kind: value.kind(),
            format,
        }
    }
}

///
/// PrimitiveFormat
///
/// Declared storage format of an internal catalog attribute.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveFormat {
    String,
    Integer,
    Long,
    Short,
    Double,
    Float,
    Boolean,
    Date,
    Geometry,
}

impl PrimitiveFormat {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Short => "short",
            Self::Double => "double",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Geometry => "geometry",
        }
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Short)
    }

    /// Whether `value` already carries this format's native representation.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::Text(_))
                | (Self::Integer | Self::Long | Self::Short, Value::Int(_))
                | (Self::Double | Self::Float, Value::Float(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Date, Value::Date(_))
                | (Self::Geometry, Value::Geometry(_))
        )
    }

    /// Parse a text literal into this format's native value.
    pub fn coerce_text(self, text: &str) -> Result<Value, CoercionError> {
        let trimmed = text.trim();
        let unparseable = || CoercionError::unparseable(text, self);

        match self {
            Self::String => Ok(Value::Text(text.to_string())),
            Self::Integer => trimmed
                .parse::<i32>()
                .map(|v| Value::Int(v.into()))
                .map_err(|_| unparseable()),
            Self::Long => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| unparseable()),
            Self::Short => trimmed
                .parse::<i16>()
                .map(|v| Value::Int(v.into()))
                .map_err(|_| unparseable()),
            Self::Double => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| unparseable()),
            Self::Float => trimmed
                .parse::<f32>()
                .map(|v| Value::Float(v.into()))
                .map_err(|_| unparseable()),
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(unparseable()),
            },
            Self::Date => parse_date(trimmed).map(Value::Date).ok_or_else(unparseable),
            Self::Geometry => trimmed
                .parse::<Geometry>()
                .map(Value::Geometry)
                .map_err(|_| unparseable()),
        }
    }

    pub(crate) fn check_integral_range(self, value: i64) -> Result<Value, CoercionError> {
        let fits = match self {
            Self::Integer => i32::try_from(value).is_ok(),
            Self::Short => i16::try_from(value).is_ok(),
            _ => true,
        };

        if fits {
            Ok(Value::Int(value))
        } else {
            Err(CoercionError::OutOfRange {
                value,
                format: self,
            })
        }
    }
}

impl fmt::Display for PrimitiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "short" => Self::Short,
            "double" => Self::Double,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "geometry" => Self::Geometry,
            other => return Err(format!("unknown primitive format '{other}'")),
        };

        Ok(format)
    }
}

// RFC 3339, zone-less date-time (read as UTC), or a bare date at midnight UTC.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
