//! Error types for a generation run.
//!
//! The two compile errors are fatal for the whole run: callers get either every
//! output type or none of them.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A `$ref` (property, array items, or `allOf` parent) names an identifier
    /// that no definition registered.
    #[error("unresolved reference '{reference}': no definition with identifier '{target}'")]
    UnresolvedReference { reference: String, target: String },

    /// An optional property has a primitive-looking type with no default value.
    #[error("the property '{property}' with type '{kind}' was not recognised to set a default value")]
    UnrecognizedDefaultType { property: String, kind: String },

    #[error("failed to read schema '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode schema '{path}' {message}")]
    Decode { path: PathBuf, message: String },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two outputs (two models, or a model and the base type) map to the same file.
    #[error("refusing to write '{path}' twice: '{name}' collides with another output")]
    FileCollision { path: PathBuf, name: String },

    #[error("emission failed: {0}")]
    Emit(String),
}
