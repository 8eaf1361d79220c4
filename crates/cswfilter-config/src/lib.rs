//! TOML configuration for the CSW filter rewriter: the attribute vocabulary
//! and the rewrite options, loaded once at startup.


use chrono::TimeDelta;
use cswfilter_core::{
    ANY_GEO,
    geometry::CrsError,
    resolver::{AttributeRegistry, RegistryError},
    rewrite::{FilterRewriter, RewriteOptions},
    value::PrimitiveFormat,
};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid target_crs: {0}")]
    InvalidCrs(#[from] CrsError),

    #[error("invalid attribute mapping: {0}")]
    Registry(#[from] RegistryError),
}

///
/// AttributeConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
    pub name: String,
    pub format: PrimitiveFormat,

    #[serde(default)]
    pub aliases: Vec<String>,
}

///
/// RewriterConfig
///
/// Every key is optional; an empty document yields the CSW record defaults.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RewriterConfig {
    pub target_crs: String,
    pub any_geo_attribute: String,
    pub bounding_box_aliases: Vec<String>,
    /// Step in milliseconds for `<=` over dates; zero is rejected.
    pub date_increment_ms: NonZeroU32,

    /// Start from the built-in Dublin Core / APISO vocabulary.
    pub use_csw_defaults: bool,

    pub namespaces: BTreeMap<String, String>,
    pub attributes: Vec<AttributeConfig>,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        let options = RewriteOptions::default();

        Self {
            target_crs: options.target_crs.to_string(),
            any_geo_attribute: ANY_GEO.to_string(),
            bounding_box_aliases: options.bounding_box_aliases,
            date_increment_ms: NonZeroU32::MIN,
            use_csw_defaults: true,
            namespaces: BTreeMap::new(),
            attributes: Vec::new(),
        }
    }
}

impl RewriterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            attributes = config.attributes.len(),
            "rewriter config loaded"
        );

        Ok(config)
    }

    /// Attribute vocabulary described by this config.
    ///
    /// The built-in bounding-box aliases map to `any_geo_attribute`.
    pub fn registry(&self) -> Result<AttributeRegistry, ConfigError> {
        let mut builder = AttributeRegistry::builder();
        if self.use_csw_defaults {
            builder = builder.with_csw_defaults_for(&self.any_geo_attribute);
        }

        for (prefix, uri) in &self.namespaces {
            builder = builder.namespace(prefix, uri);
        }

        for attribute in &self.attributes {
            builder = builder.attribute(&attribute.name, attribute.format);
            for alias in &attribute.aliases {
                builder = builder.alias(alias, &attribute.name);
            }
        }

        Ok(builder.build()?)
    }

    pub fn options(&self) -> Result<RewriteOptions, ConfigError> {
        Ok(RewriteOptions {
            target_crs: self.target_crs.parse()?,
            any_geo_attribute: self.any_geo_attribute.clone(),
            bounding_box_aliases: self.bounding_box_aliases.clone(),
            date_increment: TimeDelta::milliseconds(i64::from(self.date_increment_ms.get())),
        })
    }

    pub fn build_rewriter(&self) -> Result<FilterRewriter, ConfigError> {
        let registry = self.registry()?;
        let options = self.options()?;

        Ok(FilterRewriter::new(Arc::new(registry)).with_options(options))
    }
}
