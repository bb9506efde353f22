//! Model compiler: object definitions → output types.
//!
//! A run is two phases. Phase one builds the [`TypeMap`] over every
//! definition; phase two compiles each object definition against that map,
//! read-only. Any fatal error aborts the run and nothing is returned.

use indexmap::IndexMap;

use crate::config::Settings;
use crate::defaults;
use crate::error::Result;
use crate::ir::{DeclaredType, Definition, Property};
use crate::lower::lower_document;
use crate::model::{FieldType, Method, OutputType, PropertyDescriptor};
use crate::naming;
use crate::resolve::{self, Resolved, TypeMap};
use crate::schema::Document;

// ————————————————————————————————————————————————————————————————————————————
// RUN
// ————————————————————————————————————————————————————————————————————————————

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub types: TypeMap,
    /// Keyed by output type name, in first-registration order.
    pub models: IndexMap<String, OutputType>,
}

impl Generation {
    pub fn models(&self) -> impl Iterator<Item = &OutputType> {
        self.models.values()
    }

    pub fn model(&self, name: &str) -> Option<&OutputType> {
        self.models.get(name)
    }
}

pub fn generate(document: &Document, settings: &Settings) -> Result<Generation> {
    compile_definitions(&lower_document(document), settings)
}

pub fn compile_definitions(definitions: &[Definition], settings: &Settings) -> Result<Generation> {
    // 1) register every identifier
    let types = TypeMap::build(definitions);

    // 2) compile against the frozen map
    let compiler = Compiler::new(&types, settings);
    let mut models = IndexMap::new();
    for def in definitions.iter().filter(|d| d.is_object()) {
        let model = compiler.compile_definition(def)?;
        tracing::debug!(definition = %def.id, model = %model.name, fields = model.properties.len(), "compiled");
        models.insert(model.name.clone(), model);
    }

    Ok(Generation { types, models })
}

// ————————————————————————————————————————————————————————————————————————————
// COMPILER
// ————————————————————————————————————————————————————————————————————————————

pub struct Compiler<'a> {
    types: &'a TypeMap,
    settings: &'a Settings,
}

impl<'a> Compiler<'a> {
    pub fn new(types: &'a TypeMap, settings: &'a Settings) -> Self {
        Self { types, settings }
    }

    pub fn compile_definition(&self, def: &Definition) -> Result<OutputType> {
        let name = match self.types.get(&def.id) {
            Some(Resolved::Model(name)) => name.clone(),
            _ => resolve::output_type_name(def),
        };

        let parent = match &def.parent {
            Some(reference) => match self.types.type_from_ref(reference)? {
                Resolved::Model(parent) => Some(self.settings.type_ref(parent.clone())),
                Resolved::Primitive(keyword) => {
                    tracing::warn!(definition = %def.id, parent = %keyword, "allOf parent is not a model; ignored");
                    None
                }
            },
            None => None,
        };

        let properties = def
            .properties
            .iter()
            .map(|p| self.compile_property(p, def.is_required(&p.name)))
            .collect::<Result<Vec<_>>>()?;

        Ok(OutputType {
            name,
            namespace: self.settings.namespace.clone(),
            parent,
            description: def.description.clone().filter(|d| !d.trim().is_empty()),
            properties,
        })
    }

    pub fn compile_property(&self, property: &Property, required: bool) -> Result<PropertyDescriptor> {
        let ty = self.resolve(&property.ty)?;
        let doc_type = ty.doc_type();

        let default = if required {
            None
        } else {
            defaults::default_for(&property.name, &ty)?
        };

        let accessor = naming::accessor_name(&property.name);
        let setter = Method {
            name: naming::setter_name(&accessor),
            param: property.name.clone(),
            param_doc_type: doc_type.clone(),
            hint: ty.hint().cloned(),
        };

        let adder = ty.element().map(|element| Method {
            name: naming::adder_name(naming::singularize(&accessor)),
            param: naming::singularize(&property.name).to_string(),
            param_doc_type: element.doc_type(),
            hint: element.hint().cloned(),
        });

        Ok(PropertyDescriptor {
            name: property.name.clone(),
            getter: naming::getter_name(&accessor),
            doc_type,
            required,
            default,
            description: property.description.clone(),
            setter,
            adder,
            ty,
        })
    }

    /// Turn a declared type into a field type, following references.
    pub fn resolve(&self, declared: &DeclaredType) -> Result<FieldType> {
        Ok(match declared {
            DeclaredType::Reference(reference) => match self.types.type_from_ref(reference)? {
                Resolved::Model(name) => FieldType::Model(self.settings.type_ref(name.clone())),
                Resolved::Primitive(keyword) => keyword_type(keyword),
            },
            DeclaredType::ArrayOf(item) => FieldType::Collection(Box::new(self.resolve(item)?)),
            DeclaredType::Primitive(keyword) => keyword_type(keyword),
            DeclaredType::Mixed => FieldType::Mixed,
            DeclaredType::Unknown => FieldType::Unknown,
        })
    }
}

/// A bare keyword reached through a primitive alias or a `type` key.
fn keyword_type(keyword: &str) -> FieldType {
    match keyword {
        "array" => FieldType::Collection(Box::new(FieldType::Mixed)),
        resolve::MIXED => FieldType::Mixed,
        other => FieldType::Primitive(other.to_string()),
    }
}
