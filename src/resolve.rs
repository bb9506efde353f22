//! Type Map: definition identifier → resolved type name.
//!
//! Built in one pass over all definitions before any property is compiled, so
//! a `$ref` may point forward or backward. Read-only afterwards.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::ir::{Definition, Kind};
use crate::naming;

/// Keyword used for definitions whose kind cannot be read.
pub const MIXED: &str = "mixed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Resolved {
    /// Type keyword, verbatim.
    Primitive(String),
    /// Derived output type name.
    Model(String),
}

impl Resolved {
    pub fn name(&self) -> &str {
        match self {
            Resolved::Primitive(k) | Resolved::Model(k) => k,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: IndexMap<String, Resolved>,
}

impl TypeMap {
    pub fn build(definitions: &[Definition]) -> Self {
        let mut entries = IndexMap::with_capacity(definitions.len());
        let mut owners: IndexMap<String, &str> = IndexMap::new();

        for def in definitions {
            let resolved = match &def.kind {
                Kind::Object => {
                    let name = output_type_name(def);
                    if let Some(previous) = owners.insert(name.clone(), def.id.as_str()) {
                        tracing::warn!(
                            type_name = %name,
                            first = previous,
                            second = %def.id,
                            "two definitions derive the same output type name; the later one wins"
                        );
                    }
                    Resolved::Model(name)
                }
                Kind::Primitive(keyword) => Resolved::Primitive(keyword.clone()),
                Kind::Mixed => Resolved::Primitive(MIXED.to_string()),
            };
            tracing::trace!(definition = %def.id, resolved = resolved.name(), "registered");
            entries.insert(def.id.clone(), resolved);
        }

        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Resolved> {
        self.entries.get(id)
    }

    /// Strip the path prefix off a `$ref` and look the rest up.
    pub fn type_from_ref(&self, reference: &str) -> Result<&Resolved> {
        let target = ref_target(reference);
        self.entries.get(&target).ok_or_else(|| Error::UnresolvedReference {
            reference: reference.to_string(),
            target,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output type name of an object definition; falls back to the identifier
/// when there is no title, or when the title has nothing to build a name from.
pub fn output_type_name(def: &Definition) -> String {
    if let Some(title) = &def.title {
        let name = naming::type_name(title);
        if !name.is_empty() {
            return name;
        }
        tracing::warn!(definition = %def.id, title = %title, "title yields an empty type name; using the identifier");
    }
    naming::type_name(&def.id)
}

/// `#/definitions/Pet` → `Pet`. JSON-pointer escapes are decoded.
pub fn ref_target(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    last.replace("~1", "/").replace("~0", "~")
}
