//! ## Crate layout
//! - `core`: predicate AST, values, geometry, attribute resolution, and the
//!   filter rewriter.
//! - `config`: TOML-driven attribute vocabulary and rewrite options.
//! - `error`: public error taxonomy for CSW endpoints.
//!
//! The `prelude` module mirrors what a CSW endpoint needs to rewrite
//! incoming queries.

pub use cswfilter_config as config;
pub use cswfilter_core as core;

pub mod error;

pub use error::{Error, ErrorKind};

use crate::{
    config::RewriterConfig,
    core::query::{QualifiedName, QueryFilterTransformer, TransformerProvider},
};
use std::{path::Path, sync::Arc};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter transformer built from the TOML config at `path`.
pub fn transformer_from_path(path: impl AsRef<Path>) -> Result<QueryFilterTransformer, Error> {
    let rewriter = RewriterConfig::from_path(path)?.build_rewriter()?;

    Ok(QueryFilterTransformer::new(rewriter))
}

/// Provider serving `csw:Record` queries with `transformer`.
#[must_use]
pub fn csw_record_provider(transformer: QueryFilterTransformer) -> TransformerProvider {
    TransformerProvider::new().with(QualifiedName::csw_record(), Arc::new(transformer))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::RewriterConfig,
        core::{
            prelude::*,
            query::{
                Properties, QualifiedName, QueryFilterTransformer, QueryRequestTransformer as _,
                TransformerProvider,
            },
            resolver::AttributeRegistry,
            rewrite::{FilterRewriter, RewriteOptions},
        },
        error::{Error, ErrorKind},
    };
}
