// Strongly-typed schema IR. No serde_json::Value here.

/// Closed classification of a property's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// A type keyword, verbatim (`string`, `integer`, `object`, ...). Never `array`.
    Primitive(String),
    /// Raw `$ref` text, prefix included.
    Reference(String),
    ArrayOf(Box<DeclaredType>),
    /// A list of allowed types.
    Mixed,
    /// No usable type information.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Object,
    Primitive(String),
    Mixed,
}

#[derive(Debug, Clone)]
pub struct Definition {
    pub id: String,
    pub kind: Kind,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `$ref` of the first `allOf` element.
    pub parent: Option<String>,
    pub required: Vec<String>,
    pub properties: Vec<Property>,  // declaration order
}

#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: DeclaredType,
    pub description: Option<String>,
}

impl Definition {
    pub fn is_object(&self) -> bool {
        self.kind == Kind::Object
    }

    /// Exact, case-sensitive membership.
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}
