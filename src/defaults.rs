//! Default values for optional fields.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::FieldType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    EmptyArray,
    EmptyString,
    Integer(i64),
    Float(OrderedFloat<f64>),
    Boolean(bool),
}

impl DefaultValue {
    pub fn to_json(&self) -> Value {
        match self {
            DefaultValue::EmptyArray => Value::Array(Vec::new()),
            DefaultValue::EmptyString => Value::String(String::new()),
            DefaultValue::Integer(n) => Value::from(*n),
            DefaultValue::Float(f) => Value::from(f.0),
            DefaultValue::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::EmptyArray => f.write_str("[]"),
            DefaultValue::EmptyString => f.write_str("\"\""),
            DefaultValue::Integer(n) => write!(f, "{n}"),
            DefaultValue::Float(x) => write!(f, "{:?}", x.0),
            DefaultValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Default for an optional field.
///
/// Models, `mixed` and unknown shapes are left unset. Any primitive keyword
/// outside the five known ones fails the run.
pub fn default_for(property: &str, ty: &FieldType) -> Result<Option<DefaultValue>> {
    let keyword = match ty {
        FieldType::Collection(_) => return Ok(Some(DefaultValue::EmptyArray)),
        FieldType::Primitive(k) => k.as_str(),
        FieldType::Model(_) | FieldType::Mixed | FieldType::Unknown => return Ok(None),
    };
    let value = match keyword {
        "array" => DefaultValue::EmptyArray,
        "string" => DefaultValue::EmptyString,
        "integer" => DefaultValue::Integer(0),
        "number" => DefaultValue::Float(OrderedFloat(0.0)),
        "boolean" => DefaultValue::Boolean(false),
        other => {
            return Err(Error::UnrecognizedDefaultType {
                property: property.to_string(),
                kind: other.to_string(),
            });
        }
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;

    fn prim(k: &str) -> FieldType {
        FieldType::Primitive(k.to_string())
    }

    #[test]
    fn primitive_table() {
        assert_eq!(default_for("a", &prim("string")).unwrap(), Some(DefaultValue::EmptyString));
        assert_eq!(default_for("a", &prim("integer")).unwrap(), Some(DefaultValue::Integer(0)));
        assert_eq!(default_for("a", &prim("number")).unwrap(), Some(DefaultValue::Float(OrderedFloat(0.0))));
        assert_eq!(default_for("a", &prim("boolean")).unwrap(), Some(DefaultValue::Boolean(false)));
        assert_eq!(default_for("a", &prim("array")).unwrap(), Some(DefaultValue::EmptyArray));
    }

    #[test]
    fn collections_start_empty() {
        let ty = FieldType::Collection(Box::new(prim("string")));
        assert_eq!(default_for("tags", &ty).unwrap(), Some(DefaultValue::EmptyArray));
    }

    #[test]
    fn models_and_placeholders_stay_unset() {
        let model = FieldType::Model(TypeRef::new("Model", "Owner"));
        assert_eq!(default_for("owner", &model).unwrap(), None);
        assert_eq!(default_for("blob", &FieldType::Mixed).unwrap(), None);
        assert_eq!(default_for("blob", &FieldType::Unknown).unwrap(), None);
    }

    #[test]
    fn unrecognized_keyword_names_property_and_type() {
        let err = default_for("payload", &prim("object")).unwrap_err();
        match &err {
            Error::UnrecognizedDefaultType { property, kind } => {
                assert_eq!(property, "payload");
                assert_eq!(kind, "object");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("payload") && msg.contains("object"), "{msg}");
    }

    #[test]
    fn keyword_match_is_exact() {
        assert!(default_for("n", &prim("Integer")).is_err());
        assert!(default_for("n", &prim("int")).is_err());
    }

    #[test]
    fn rendering() {
        assert_eq!(DefaultValue::Float(OrderedFloat(0.0)).to_string(), "0.0");
        assert_eq!(DefaultValue::EmptyString.to_string(), "\"\"");
        assert_eq!(DefaultValue::EmptyArray.to_json(), serde_json::json!([]));
        assert_eq!(serde_json::to_value(DefaultValue::Integer(0)).unwrap(), serde_json::json!(0));
    }
}
