//! Raw schema node shape
//!
//! The input tree is duck-typed (maps/lists/scalars), so it is parsed into
//! this closed, strongly-typed shape before any resolution logic runs. Every
//! downstream match is exhaustive; a missing case is a compile error, not a
//! runtime surprise. Unknown keys are ignored; full JSON Schema validation
//! is a non-goal.

use indexmap::IndexMap;
use serde::Deserialize;

/// The `type` keyword: a single type or an OpenAPI 3.1 type list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawType {
    One(String),
    Many(Vec<String>),
}

/// The `additionalProperties` keyword: a boolean toggle or a value schema
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAdditional {
    Allowed(bool),
    Schema(Box<RawSchema>),
}

/// One raw schema node, as found in `components.schemas` or inline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    #[serde(rename = "type")]
    pub schema_type: Option<RawType>,

    pub format: Option<String>,

    pub description: Option<String>,

    /// OpenAPI 3.0 nullability keyword; 3.1 uses a "null" entry in `type`
    pub nullable: Option<bool>,

    #[serde(default)]
    pub properties: IndexMap<String, RawSchema>,

    #[serde(default)]
    pub required: Vec<String>,

    pub items: Option<Box<RawSchema>>,

    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<RawAdditional>,

    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<RawSchema>>,

    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<RawSchema>>,

    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<RawSchema>>,
}

impl RawSchema {
    /// True if this node is the literal null type (`{"type": "null"}`),
    /// the form a union member takes to signal nullability.
    pub fn is_null_type(&self) -> bool {
        match &self.schema_type {
            Some(RawType::One(t)) => t == "null",
            Some(RawType::Many(ts)) => !ts.is_empty() && ts.iter().all(|t| t == "null"),
            None => false,
        }
    }

    /// True if the node carries no structure at all (bare `{}`)
    pub fn is_empty(&self) -> bool {
        self.ref_path.is_none()
            && self.schema_type.is_none()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.enum_values.is_none()
            && self.additional_properties.is_none()
            && self.any_of.is_none()
            && self.one_of.is_none()
            && self.all_of.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_list_deserializes() {
        let raw: RawSchema = serde_json::from_str(r#"{"type": ["string", "null"]}"#).unwrap();
        match raw.schema_type {
            Some(RawType::Many(ts)) => assert_eq!(ts, vec!["string", "null"]),
            other => panic!("expected type list, got {:?}", other),
        }
    }

    #[test]
    fn test_additional_properties_forms() {
        let raw: RawSchema =
            serde_json::from_str(r#"{"type": "object", "additionalProperties": true}"#).unwrap();
        assert!(matches!(raw.additional_properties, Some(RawAdditional::Allowed(true))));

        let raw: RawSchema = serde_json::from_str(
            r#"{"type": "object", "additionalProperties": {"type": "integer"}}"#,
        )
        .unwrap();
        assert!(matches!(raw.additional_properties, Some(RawAdditional::Schema(_))));
    }

    #[test]
    fn test_null_type_detection() {
        let raw: RawSchema = serde_json::from_str(r#"{"type": "null"}"#).unwrap();
        assert!(raw.is_null_type());

        let raw: RawSchema = serde_json::from_str(r#"{"type": "string"}"#).unwrap();
        assert!(!raw.is_null_type());
    }
}
