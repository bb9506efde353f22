use crate::model::TypeRef;

pub const DEFAULT_NAMESPACE: &str = "Model";
pub const DEFAULT_BASE_TYPE: &str = "BaseModel";

/// Per-run settings. The CLI fills these from flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Namespace every generated type lives in; `::` separates segments.
    pub namespace: String,
    /// Shared parent of every model that does not compose another.
    pub base_type: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            base_type: DEFAULT_BASE_TYPE.to_string(),
        }
    }
}

impl Settings {
    pub fn type_ref(&self, name: impl Into<String>) -> TypeRef {
        TypeRef::new(self.namespace.clone(), name)
    }

    pub fn base_ref(&self) -> TypeRef {
        self.type_ref(self.base_type.clone())
    }

    pub fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace.split("::").filter(|s| !s.is_empty())
    }
}
