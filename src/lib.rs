//! Compile Swagger-style `definitions` into model type descriptors.
//!
//! Pipeline: [`loader`] reads the schema, [`lower`] classifies it into the
//! typed [`ir`], [`compile`] resolves references through the [`resolve`] Type
//! Map and produces one [`model::OutputType`] per object definition, and
//! [`output`] renders and persists them.
//!
//! ```no_run
//! use std::path::Path;
//! use swagger_models::{config::Settings, output::{write_models, JsonEmitter}};
//!
//! let settings = Settings::default();
//! let run = swagger_models::generate_from_file(Path::new("api.yaml"), &settings)?;
//! write_models(Path::new("out"), run.models(), &settings, &JsonEmitter, false)?;
//! # Ok::<(), swagger_models::Error>(())
//! ```

pub mod compile;
pub mod config;
pub mod defaults;
pub mod error;
pub mod ir;
pub mod loader;
pub mod lower;
pub mod model;
pub mod naming;
pub mod output;
pub mod path_de;
pub mod resolve;
pub mod schema;

use std::path::Path;

pub use compile::{generate, Generation};
pub use error::{Error, Result};

/// Load a schema file and run a full generation over it.
pub fn generate_from_file(path: &Path, settings: &config::Settings) -> Result<Generation> {
    let document = loader::load_document(path)?;
    generate(&document, settings)
}
