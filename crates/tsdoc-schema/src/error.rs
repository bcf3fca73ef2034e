//! Error types for catalog fetching and schema resolution.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A fatal failure that aborts a resolution pass.
///
/// Unsupported type expressions and unknown type names are not errors: the
/// resolver drops the former and keeps the latter as opaque leaf types.
#[derive(Debug, Error)]
pub enum Error {
    /// A property declaration carried no type expression.
    #[error("property `{property}` has no type expression")]
    MissingTypeExpression { property: String },

    /// A type reference named a declaration the resolver cannot expand.
    #[error("type reference `{name}` points at a `{kind}` declaration")]
    UnresolvedReferenceKind { name: String, kind: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid defaults document: {0}")]
    Defaults(#[source] serde_json::Error),

    #[error("failed to read defaults from `{}`: {source}", path.display())]
    DefaultsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Wraps an error raised while resolving a top-level interface.
    #[error("in interface `{interface}`: {source}")]
    InInterface {
        interface: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the name of the top-level interface being resolved.
    pub(crate) fn in_interface(self, interface: &str) -> Self {
        Error::InInterface {
            interface: interface.to_string(),
            source: Box::new(self),
        }
    }

    /// Strip any interface context and return the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Error::InInterface { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Failure to obtain a declaration catalog for a module.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} doc` exited with {status} for `{module}`: {stderr}")]
    Extractor {
        program: String,
        module: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("malformed catalog for `{module}`: {source}")]
    Json {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no catalog registered for module `{0}`")]
    UnknownModule(String),

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
