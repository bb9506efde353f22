use serde_json::Value;

use crate::ir::{DeclaredType, Definition, Kind, Property};
use crate::schema::{Document, Items, RawSchema, SubSchema};

/// Lower every raw definition, in document order.
pub fn lower_document(doc: &Document) -> Vec<Definition> {
    doc.definitions
        .iter()
        .map(|(id, raw)| lower_definition(id, raw))
        .collect()
}

pub fn lower_definition(id: &str, raw: &RawSchema) -> Definition {
    let kind = classify_kind(raw);

    // 1) Composition: parent from the first element, own fields from the second
    let (parent, source) = match &raw.all_of {
        Some(parts) => {
            let parent = parts
                .first()
                .and_then(SubSchema::as_schema)
                .and_then(|first| first.reference.clone());
            if parent.is_none() {
                tracing::warn!(definition = id, "allOf without a leading $ref; no parent linked");
            }
            if parts.len() > 2 {
                tracing::debug!(definition = id, extra = parts.len() - 2, "ignoring trailing allOf elements");
            }
            (parent, parts.get(1).and_then(SubSchema::as_schema))
        }
        None => (None, Some(raw)),
    };

    // 2) Own fields; absent keys read as empty
    let required = source
        .and_then(|s| s.required.clone())
        .unwrap_or_default();
    let properties = source
        .and_then(|s| s.properties.as_ref())
        .map(|props| {
            props.iter().map(|(name, p)| Property {
                name: name.clone(),
                ty: classify_node(p),
                description: p.as_schema().and_then(|s| s.description.clone()),
            }).collect()
        })
        .unwrap_or_default();

    Definition {
        id: id.to_string(),
        kind,
        title: raw.title.clone(),
        description: raw.description.clone(),
        parent,
        required,
        properties,
    }
}

/// Classify a property or `items` node. A `$ref` wins over any `type`.
pub fn classify(raw: &RawSchema) -> DeclaredType {
    if let Some(reference) = &raw.reference {
        return DeclaredType::Reference(reference.clone());
    }
    match &raw.kind {
        Some(Value::String(k)) if k == "array" => {
            let item = match &raw.items {
                Some(Items::Single(node)) => classify_node(node),
                // one type per position: no single element type
                Some(Items::Tuple(_)) | None => DeclaredType::Mixed,
            };
            DeclaredType::ArrayOf(Box::new(item))
        }
        Some(Value::String(k)) => DeclaredType::Primitive(k.clone()),
        Some(Value::Array(_)) => DeclaredType::Mixed,
        _ => DeclaredType::Unknown,
    }
}

/// Like [`classify`], for a nested node that may not be a schema at all
/// (`true`, `false`, a bare string).
pub fn classify_node(node: &SubSchema) -> DeclaredType {
    match node {
        SubSchema::Schema(raw) => classify(raw),
        SubSchema::Loose(_) => DeclaredType::Unknown,
    }
}

fn classify_kind(raw: &RawSchema) -> Kind {
    match &raw.kind {
        Some(Value::String(k)) if k == "object" => Kind::Object,
        Some(Value::String(k)) => Kind::Primitive(k.clone()),
        // untyped but clearly structural
        None if raw.all_of.is_some() || raw.properties.is_some() => Kind::Object,
        _ => Kind::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawSchema {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn ref_wins_over_type() {
        let ty = classify(&raw(json!({"$ref": "#/definitions/Owner", "type": "string"})));
        assert_eq!(ty, DeclaredType::Reference("#/definitions/Owner".into()));
    }

    #[test]
    fn arrays_classify_their_items() {
        let ty = classify(&raw(json!({"type": "array", "items": {"type": "string"}})));
        assert_eq!(ty, DeclaredType::ArrayOf(Box::new(DeclaredType::Primitive("string".into()))));

        let nested = classify(&raw(json!({
            "type": "array",
            "items": {"type": "array", "items": {"$ref": "#/definitions/Cell"}}
        })));
        assert_eq!(nested, DeclaredType::ArrayOf(Box::new(DeclaredType::ArrayOf(Box::new(
            DeclaredType::Reference("#/definitions/Cell".into())
        )))));
    }

    #[test]
    fn array_without_items_holds_mixed() {
        let ty = classify(&raw(json!({"type": "array"})));
        assert_eq!(ty, DeclaredType::ArrayOf(Box::new(DeclaredType::Mixed)));
    }

    #[test]
    fn type_lists_are_mixed_and_garbage_is_unknown() {
        assert_eq!(classify(&raw(json!({"type": ["string", "null"]}))), DeclaredType::Mixed);
        assert_eq!(classify(&raw(json!({"type": {"nested": true}}))), DeclaredType::Unknown);
        assert_eq!(classify(&raw(json!({"description": "no type"}))), DeclaredType::Unknown);
    }

    #[test]
    fn tuple_items_hold_mixed() {
        let ty = classify(&raw(json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}]
        })));
        assert_eq!(ty, DeclaredType::ArrayOf(Box::new(DeclaredType::Mixed)));
    }

    #[test]
    fn boolean_sub_schemas_are_unknown() {
        let def = lower_definition("loose", &raw(json!({
            "type": "object",
            "properties": {
                "anything": true,
                "list": {"type": "array", "items": false},
                "name": {"type": "string", "description": "kept"}
            }
        })));
        let types: Vec<_> = def.properties.iter().map(|p| p.ty.clone()).collect();
        assert_eq!(types, [
            DeclaredType::Unknown,
            DeclaredType::ArrayOf(Box::new(DeclaredType::Unknown)),
            DeclaredType::Primitive("string".into()),
        ]);
        assert_eq!(def.properties[0].description, None);
        assert_eq!(def.properties[2].description.as_deref(), Some("kept"));
    }

    #[test]
    fn composition_tolerates_loose_elements() {
        let def = lower_definition("odd", &raw(json!({
            "type": "object",
            "allOf": [true, {"properties": {"x": {"type": "integer"}}}]
        })));
        assert_eq!(def.parent, None);
        assert_eq!(def.properties.len(), 1);
    }

    #[test]
    fn plain_definition_keeps_declaration_order() {
        let def = lower_definition("pet", &raw(json!({
            "type": "object",
            "title": "Pet",
            "required": ["name"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"},
                "color": {"type": "string"}
            }
        })));
        assert!(def.is_object());
        assert!(def.parent.is_none());
        let names: Vec<_> = def.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "age", "color"]);
        assert!(def.is_required("name"));
        assert!(!def.is_required("Name"));
    }

    #[test]
    fn composition_takes_fields_from_second_element_only() {
        let def = lower_definition("dog", &raw(json!({
            "type": "object",
            "title": "Dog",
            "properties": {"ignored": {"type": "string"}},
            "allOf": [
                {"$ref": "#/definitions/pet"},
                {"required": ["bark"], "properties": {"bark": {"type": "boolean"}}}
            ]
        })));
        assert_eq!(def.parent.as_deref(), Some("#/definitions/pet"));
        assert_eq!(def.required, vec!["bark".to_string()]);
        assert_eq!(def.properties.len(), 1);
        assert_eq!(def.properties[0].name, "bark");
    }

    #[test]
    fn composition_with_single_element_has_no_fields() {
        let def = lower_definition("thin", &raw(json!({
            "type": "object",
            "allOf": [{"$ref": "#/definitions/pet"}]
        })));
        assert_eq!(def.parent.as_deref(), Some("#/definitions/pet"));
        assert!(def.properties.is_empty());
        assert!(def.required.is_empty());
    }

    #[test]
    fn kinds() {
        assert_eq!(classify_kind(&raw(json!({"type": "string"}))), Kind::Primitive("string".into()));
        assert_eq!(classify_kind(&raw(json!({"properties": {}}))), Kind::Object);
        assert_eq!(classify_kind(&raw(json!({"allOf": []}))), Kind::Object);
        assert_eq!(classify_kind(&raw(json!({"type": ["string", "integer"]}))), Kind::Mixed);
        assert_eq!(classify_kind(&raw(json!({}))), Kind::Mixed);
    }
}
