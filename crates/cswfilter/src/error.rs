use crate::{config::ConfigError, core::error::RewriteError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// OWS exception code a CSW endpoint reports for this error.
    #[must_use]
    pub const fn exception_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Filter(_) => "InvalidParameterValue",
            ErrorKind::Config(_) => "NoApplicableCode",
        }
    }
}

impl From<RewriteError> for Error {
    fn from(err: RewriteError) -> Self {
        let kind = match err {
            RewriteError::UnsupportedSpatialTarget { .. } => {
                FilterErrorKind::UnsupportedSpatialTarget
            }
            RewriteError::UnconvertibleDistanceUnit(_) => {
                FilterErrorKind::UnconvertibleDistanceUnit
            }
        };

        Self::new(ErrorKind::Filter(kind), err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ConfigErrorKind::Io,
            ConfigError::Parse(_) => ConfigErrorKind::Parse,
            ConfigError::InvalidCrs(_) => ConfigErrorKind::InvalidCrs,
            ConfigError::Registry(_) => ConfigErrorKind::Registry,
        };

        Self::new(ErrorKind::Config(kind), err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The request's filter cannot be evaluated; the caller can fix it.
    #[display("filter: {_0}")]
    Filter(FilterErrorKind),

    /// The rewriter could not be configured.
    #[display("config: {_0}")]
    Config(ConfigErrorKind),
}

///
/// FilterErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum FilterErrorKind {
    UnsupportedSpatialTarget,
    UnconvertibleDistanceUnit,
}

///
/// ConfigErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ConfigErrorKind {
    Io,
    Parse,
    InvalidCrs,
    Registry,
}
