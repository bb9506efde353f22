//! Compiled, emission-ready output types.

use std::fmt;

use serde::Serialize;

use crate::defaults::DefaultValue;

/// A type in a namespace, kept as a pair instead of one joined string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.namespace, self.name)
        }
    }
}

/// Resolved type of a field or collection element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FieldType {
    Primitive(String),
    Model(TypeRef),
    Collection(Box<FieldType>),
    Mixed,
    Unknown,
}

impl FieldType {
    /// Documentation type: `number` reads as `float`, collections as `<elem>[]`,
    /// unknown shapes as an empty placeholder.
    pub fn doc_type(&self) -> String {
        match self {
            FieldType::Primitive(k) if k == "number" => "float".to_string(),
            FieldType::Primitive(k) => k.clone(),
            FieldType::Model(r) => r.name.clone(),
            FieldType::Collection(item) => format!("{}[]", item.doc_type()),
            FieldType::Mixed => "mixed".to_string(),
            FieldType::Unknown => String::new(),
        }
    }

    /// Parameter type hint; only model types are enforced.
    pub fn hint(&self) -> Option<&TypeRef> {
        match self {
            FieldType::Model(r) => Some(r),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&FieldType> {
        match self {
            FieldType::Collection(item) => Some(item),
            _ => None,
        }
    }
}

/// A synthesized fluent method taking one parameter and returning the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub param: String,
    pub param_doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub doc_type: String,
    pub required: bool,
    pub default: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub getter: String,
    pub setter: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adder: Option<Method>,
}

impl PropertyDescriptor {
    pub fn is_collection(&self) -> bool {
        matches!(self.ty, FieldType::Collection(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputType {
    pub name: String,
    pub namespace: String,
    /// Set only for `allOf` compositions; otherwise the base model type applies.
    pub parent: Option<TypeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<PropertyDescriptor>,
}

impl OutputType {
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.namespace.clone(), self.name.clone())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}
