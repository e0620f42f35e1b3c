//! # Schema Closedness Audit
//!
//! The release index is a closed document: every object rejects unknown
//! keys. The JSON Schema must say the same thing, which means every object
//! schema in it needs `additionalProperties: false`. An absent
//! `additionalProperties` defaults to `true` in JSON Schema, so it is
//! reported too.
//!
//! The audit walks `properties`, `items`, `prefixItems`, `$defs`,
//! `definitions`, and the `allOf`/`anyOf`/`oneOf` combinators. A schema is
//! treated as an object schema when its `type` is or includes `"object"`,
//! or when it declares `properties` or `required`.

use serde_json::Value;

/// A finding about `additionalProperties` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalPropertiesFinding {
    /// JSON Pointer path to the `additionalProperties` field.
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
    /// Recommended action.
    pub recommendation: String,
}

impl std::fmt::Display for AdditionalPropertiesFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}: {} -> {}",
            self.json_path, self.current_value, self.recommendation
        )
    }
}

/// Audit every object schema in `schema` for `additionalProperties`.
///
/// Returns one finding per object schema that is not closed. Object-valued
/// `additionalProperties` (a schema for extra members) is also reported,
/// since it still admits keys the model does not define.
pub fn audit_additional_properties(schema: &Value) -> Vec<AdditionalPropertiesFinding> {
    let mut findings = Vec::new();
    walk(schema, "", &mut findings);
    findings
}

fn walk(schema: &Value, path: &str, findings: &mut Vec<AdditionalPropertiesFinding>) {
    let Some(obj) = schema.as_object() else {
        return;
    };

    if is_object_schema(schema) {
        check_closed(schema, path, findings);
    }

    for keyword in ["properties", "$defs", "definitions"] {
        if let Some(children) = obj.get(keyword).and_then(Value::as_object) {
            for (name, child) in children {
                walk(child, &format!("{path}/{keyword}/{}", escape(name)), findings);
            }
        }
    }

    if let Some(items) = obj.get("items") {
        walk(items, &format!("{path}/items"), findings);
    }

    for keyword in ["prefixItems", "allOf", "anyOf", "oneOf"] {
        if let Some(variants) = obj.get(keyword).and_then(Value::as_array) {
            for (i, variant) in variants.iter().enumerate() {
                walk(variant, &format!("{path}/{keyword}/{i}"), findings);
            }
        }
    }
}

fn is_object_schema(schema: &Value) -> bool {
    let typed_object = match schema.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t == "object"),
        _ => false,
    };
    typed_object || schema.get("properties").is_some() || schema.get("required").is_some()
}

fn check_closed(schema: &Value, path: &str, findings: &mut Vec<AdditionalPropertiesFinding>) {
    let current_value = match schema.get("additionalProperties") {
        Some(Value::Bool(false)) => return,
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Object(_)) => "(schema, admits extra keys)".to_string(),
        Some(other) => other.to_string(),
        None => "(absent, defaults to true)".to_string(),
    };
    findings.push(AdditionalPropertiesFinding {
        json_path: format!("{path}/additionalProperties"),
        current_value,
        recommendation: "Set to false; release index objects are closed".to_string(),
    });
}

/// RFC 6901 escaping for a pointer segment.
fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
