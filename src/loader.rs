//! Schema loading: file path → [`Document`].

use std::path::Path;

use crate::error::{Error, Result};
use crate::path_de::{from_json_with_path, from_yaml_with_path};
use crate::schema::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Names ending in `json` decode as JSON; everything else as YAML.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with("json") {
            Format::Json
        } else {
            Format::Yaml
        }
    }
}

pub fn parse_document(source: &str, format: Format) -> Result<Document, String> {
    match format {
        Format::Json => from_json_with_path(source),
        Format::Yaml => from_yaml_with_path(source),
    }
}

pub fn load_document(path: &Path) -> Result<Document> {
    let format = Format::from_path(path);
    let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(&source, format).map_err(|message| Error::Decode {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::info!(path = %path.display(), ?format, definitions = document.definitions.len(), "loaded schema");
    Ok(document)
}
