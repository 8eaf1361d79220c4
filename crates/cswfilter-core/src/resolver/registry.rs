use crate::{
    ANY_GEO,
    resolver::{AttributeResolver, NamespaceContext, defaults, split_qualified},
    value::PrimitiveFormat,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("alias '{alias}' targets undeclared attribute '{attribute}'")]
    UnknownAttribute { alias: String, attribute: String },

    #[error("alias '{alias}' uses undeclared namespace prefix '{prefix}'")]
    UnknownPrefix { alias: String, prefix: String },

    #[error("alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },
}

///
/// AttributeRegistry
///
/// Static, in-memory attribute vocabulary. Lookups are case-insensitive on
/// external names; internal names are returned exactly as declared.
///
/// Resolution order:
/// 1. the name is itself an internal attribute
/// 2. exact alias
/// 3. `(namespace URI, local)` alias via the request's or registry's prefixes
/// 4. bare local name as an alias or internal attribute
///

#[derive(Clone, Debug, Default)]
pub struct AttributeRegistry {
    formats: BTreeMap<String, PrimitiveFormat>,
    internal: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    qualified: BTreeMap<(String, String), String>,
    namespaces: NamespaceContext,
}

impl AttributeRegistry {
    #[must_use]
    pub fn builder() -> AttributeRegistryBuilder {
        AttributeRegistryBuilder::default()
    }

    /// Standard CSW record / Dublin Core / APISO vocabulary.
    #[must_use]
    pub fn csw_record_defaults() -> Self {
        Self::builder()
            .with_csw_defaults()
            .build()
            .expect("built-in CSW record mapping is consistent")
    }

    #[must_use]
    pub const fn namespaces(&self) -> &NamespaceContext {
        &self.namespaces
    }

    /// Declared internal attributes and their formats.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, PrimitiveFormat)> {
        self.formats.iter().map(|(name, format)| (name.as_str(), *format))
    }

    fn lookup_qualified(
        &self,
        prefix: &str,
        local: &str,
        namespaces: Option<&NamespaceContext>,
    ) -> Option<&String> {
        let uri = namespaces
            .and_then(|ctx| ctx.uri_for(prefix))
            .or_else(|| self.namespaces.uri_for(prefix))?;

        self.qualified
            .get(&(uri.to_string(), local.to_ascii_lowercase()))
    }
}

impl AttributeResolver for AttributeRegistry {
    fn resolve(&self, name: &str, namespaces: Option<&NamespaceContext>) -> Option<String> {
        let key = name.trim().to_ascii_lowercase();

        if let Some(internal) = self.internal.get(&key) {
            return Some(internal.clone());
        }
        if let Some(internal) = self.aliases.get(&key) {
            return Some(internal.clone());
        }

        let (prefix, local) = split_qualified(name.trim());
        let prefix = prefix?;

        if let Some(internal) = self.lookup_qualified(prefix, local, namespaces) {
            return Some(internal.clone());
        }

        let local = local.to_ascii_lowercase();
        self.aliases
            .get(&local)
            .or_else(|| self.internal.get(&local))
            .cloned()
    }

    fn primitive_format(&self, attribute: &str) -> Option<PrimitiveFormat> {
        self.formats.get(attribute).copied()
    }
}

///
/// AttributeRegistryBuilder
///

#[derive(Clone, Debug, Default)]
pub struct AttributeRegistryBuilder {
    namespaces: NamespaceContext,
    formats: BTreeMap<String, PrimitiveFormat>,
    aliases: Vec<(String, String)>,
}

impl AttributeRegistryBuilder {
    #[must_use]
    pub fn namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces = self.namespaces.with(prefix, uri);
        self
    }

    /// Declare an internal attribute. Redeclaring replaces the format.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, format: PrimitiveFormat) -> Self {
        self.formats.insert(name.into(), format);
        self
    }

    #[must_use]
    pub fn alias(mut self, external: impl Into<String>, internal: impl Into<String>) -> Self {
        self.aliases.push((external.into(), internal.into()));
        self
    }

    #[must_use]
    pub fn with_csw_defaults(self) -> Self {
        defaults::install(self, ANY_GEO)
    }

    /// CSW defaults with the bounding-box aliases naming `any_geo`.
    #[must_use]
    pub fn with_csw_defaults_for(self, any_geo: &str) -> Self {
        defaults::install(self, any_geo)
    }

    pub fn build(self) -> Result<AttributeRegistry, RegistryError> {
        let internal = self
            .formats
            .keys()
            .map(|name| (name.to_ascii_lowercase(), name.clone()))
            .collect();

        let mut aliases = BTreeMap::new();
        let mut qualified = BTreeMap::new();

        for (external, attribute) in self.aliases {
            if !self.formats.contains_key(&attribute) {
                return Err(RegistryError::UnknownAttribute {
                    alias: external,
                    attribute,
                });
            }

            let (key, previous) = match split_qualified(&external) {
                (Some(prefix), local) => {
                    let uri = self.namespaces.uri_for(prefix).ok_or_else(|| {
                        RegistryError::UnknownPrefix {
                            alias: external.clone(),
                            prefix: prefix.to_string(),
                        }
                    })?;
                    let key = (uri.to_string(), local.to_ascii_lowercase());
                    let previous = qualified.insert(key, attribute.clone());
                    (external.to_ascii_lowercase(), previous)
                }
                (None, _) => {
                    let key = external.to_ascii_lowercase();
                    let previous = aliases.insert(key.clone(), attribute.clone());
                    (key, previous)
                }
            };

            match previous {
                Some(first) if first != attribute => {
                    return Err(RegistryError::ConflictingAlias {
                        alias: key,
                        first,
                        second: attribute,
                    });
                }
                _ => {}
            }
        }

        Ok(AttributeRegistry {
            formats: self.formats,
            internal,
            aliases,
            qualified,
            namespaces: self.namespaces,
        })
    }
}
