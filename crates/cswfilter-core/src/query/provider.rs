use crate::{query::QueryRequestTransformer, resolver::namespaces};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// QualifiedName
///
/// Namespace-qualified XML name of a record type, e.g. `csw:Record`.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QualifiedName {
    pub namespace: String,
    pub local: String,
}

impl QualifiedName {
    #[must_use]
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// `csw:Record`, the default CSW output schema.
    #[must_use]
    pub fn csw_record() -> Self {
        Self::new(namespaces::CSW, "Record")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

///
/// TransformerProvider
///
/// Request transformers keyed by the record type they serve.
///

#[derive(Clone, Default)]
pub struct TransformerProvider {
    transformers: BTreeMap<QualifiedName, Arc<dyn QueryRequestTransformer>>,
}

impl TransformerProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transformer` for `record_type`, returning any transformer it
    /// replaces.
    pub fn register(
        &mut self,
        record_type: QualifiedName,
        transformer: Arc<dyn QueryRequestTransformer>,
    ) -> Option<Arc<dyn QueryRequestTransformer>> {
        self.transformers.insert(record_type, transformer)
    }

    #[must_use]
    pub fn with(
        mut self,
        record_type: QualifiedName,
        transformer: Arc<dyn QueryRequestTransformer>,
    ) -> Self {
        self.register(record_type, transformer);
        self
    }

    #[must_use]
    pub fn get(&self, record_type: &QualifiedName) -> Option<Arc<dyn QueryRequestTransformer>> {
        self.transformers.get(record_type).cloned()
    }

    pub fn record_types(&self) -> impl Iterator<Item = &QualifiedName> {
        self.transformers.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl fmt::Debug for TransformerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.record_types()).finish()
    }
}
