//! Raw schema document, as decoded from JSON or YAML.
//!
//! Every field is optional: a missing key is read as absent rather than
//! rejected. Maps keep document order so a run is deterministic.
//!
//! Nested nodes (properties, `items`, `allOf` elements) decode leniently. A node
//! that is not a mapping, such as a boolean sub-schema, is kept as a
//! [`SubSchema::Loose`] value instead of failing the whole document.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub definitions: IndexMap<String, RawSchema>,
}

/// One schema node: a definition, a property, an array `items` descriptor or
/// an `allOf` element. They share a shape, so they share a type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Usually a keyword; may be a list of allowed types.
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required: Option<Vec<String>>,
    pub properties: Option<IndexMap<String, SubSchema>>,
    pub items: Option<Items>,
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<SubSchema>>,
}

impl RawSchema {
    pub fn kind_keyword(&self) -> Option<&str> {
        self.kind.as_ref().and_then(Value::as_str)
    }
}

/// A nested node. Anything that does not decode as a [`RawSchema`] lands in
/// `Loose` untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubSchema {
    Schema(RawSchema),
    Loose(Value),
}

impl SubSchema {
    pub fn as_schema(&self) -> Option<&RawSchema> {
        match self {
            SubSchema::Schema(raw) => Some(raw),
            SubSchema::Loose(_) => None,
        }
    }
}

/// `items` is one schema, or the tuple form: one schema per position.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Items {
    // sequences first; a struct would otherwise try to decode one positionally
    Tuple(Vec<SubSchema>),
    Single(Box<SubSchema>),
}
