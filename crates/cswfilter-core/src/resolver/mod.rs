mod defaults;
mod registry;


pub use defaults::namespaces;
pub use registry::{AttributeRegistry, AttributeRegistryBuilder, RegistryError};

use crate::value::PrimitiveFormat;
use derive_more::{Deref, From, IntoIterator};
use std::collections::BTreeMap;

///
/// AttributeResolver
///
/// Maps external (protocol) property names onto internal catalog attributes
/// and describes the internal attributes' storage formats. Implementations
/// are long-lived and read-only from the rewriter's point of view.
///

pub trait AttributeResolver: Send + Sync {
    /// Internal attribute for `name`, or `None` when the name is unmapped.
    fn resolve(&self, name: &str, namespaces: Option<&NamespaceContext>) -> Option<String>;

    /// Declared storage format of an internal attribute.
    fn primitive_format(&self, attribute: &str) -> Option<PrimitiveFormat>;

    fn is_geometry(&self, attribute: &str) -> bool {
        self.primitive_format(attribute) == Some(PrimitiveFormat::Geometry)
    }
}

///
/// NamespaceContext
///
/// Prefix → namespace URI bindings in scope where a property name was
/// written.
///

#[derive(Clone, Debug, Default, Deref, Eq, From, IntoIterator, PartialEq)]
pub struct NamespaceContext(BTreeMap<String, String>);

impl NamespaceContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.0.insert(prefix.into(), uri.into());
        self
    }

    #[must_use]
    pub fn uri_for(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }
}

/// Split `prefix:local` into its parts; unprefixed names have no prefix.
#[must_use]
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => (Some(prefix), local),
        _ => (None, name),
    }
}
