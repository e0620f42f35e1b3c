//! YAML to JSON value conversion.
//!
//! Release indexes are usually written in YAML, but validation runs over
//! the JSON value tree. Only the JSON-compatible subset of YAML is
//! meaningful here; YAML tags are dropped and the tagged value kept.

use serde_json::Value;

use crate::error::{Violation, ViolationKind};
use crate::path::FieldPath;

/// A YAML document converted for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlDocument {
    /// The converted tree. Each number JSON cannot hold (`.nan`, `.inf`) is
    /// stood in for by `0`.
    pub value: Value,
    /// Where those numbers were, with their YAML spelling.
    pub non_finite: Vec<(FieldPath, String)>,
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys (numbers, booleans) are stringified the way YAML
/// loaders conventionally do. Null or composite keys cannot name a field
/// and are reported as a type mismatch at the owning mapping.
///
/// # Errors
///
/// Returns a [`Violation`] locating the first value that has no JSON
/// counterpart, including non-finite numbers.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, Violation> {
    let document = convert_yaml_document(yaml)?;
    match document.non_finite.into_iter().next() {
        Some((path, spelled)) => Err(Violation {
            path,
            kind: ViolationKind::TypeMismatch,
            expected: "a finite number".to_string(),
            actual: spelled,
        }),
        None => Ok(document.value),
    }
}

/// Convert a YAML document, recording non-finite numbers instead of
/// failing on them.
///
/// # Errors
///
/// Returns a [`Violation`] for a null or composite mapping key.
pub fn convert_yaml_document(yaml: &serde_yaml::Value) -> Result<YamlDocument, Violation> {
    let mut non_finite = Vec::new();
    let value = convert(yaml, &FieldPath::root(), &mut non_finite)?;
    Ok(YamlDocument { value, non_finite })
}

fn convert(
    yaml: &serde_yaml::Value,
    path: &FieldPath,
    non_finite: &mut Vec<(FieldPath, String)>,
) -> Result<Value, Violation> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64().and_then(serde_json::Number::from_f64) {
                Ok(Value::Number(f))
            } else {
                non_finite.push((path.clone(), format!("number {n}")));
                Ok(Value::Number(serde_json::Number::from(0)))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .enumerate()
            .map(|(i, item)| convert(item, &path.index(i), non_finite))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(Violation {
                            path: path.clone(),
                            kind: ViolationKind::TypeMismatch,
                            expected: "mapping with string keys".to_string(),
                            actual: format!("mapping key {other:?}"),
                        })
                    }
                };
                let value = convert(v, &path.key(key.as_str()), non_finite)?;
                json_map.insert(key, value);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => convert(&tagged.value, path, non_finite),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_to_json_conversion() {
        let yaml_str = r#"
rollout:
  pause: false
  skip_days:
    - "2024-02-02"
  stages:
    - subnets: [io67a]
      bake_time: 8h
count: 42
"#;
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();

        assert_eq!(json_value["rollout"]["pause"], false);
        assert_eq!(json_value["rollout"]["skip_days"][0], "2024-02-02");
        assert_eq!(json_value["rollout"]["stages"][0]["subnets"][0], "io67a");
        assert_eq!(json_value["rollout"]["stages"][0]["bake_time"], "8h");
        assert_eq!(json_value["count"], 42);
    }

    #[test]
    fn test_unquoted_date_stays_a_string() {
        // YAML 1.2 core schema has no timestamp type.
        let yaml_value: serde_yaml::Value = serde_yaml::from_str("day: 2024-02-02").unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();
        assert_eq!(json_value["day"], "2024-02-02");
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str("1: a\ntrue: b").unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();
        assert_eq!(json_value["1"], "a");
        assert_eq!(json_value["true"], "b");
    }

    #[test]
    fn test_composite_key_rejected_with_path() {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str("rollout:\n  ? [a, b]\n  : c\n").unwrap();
        let err = yaml_to_json_value(&yaml_value).unwrap_err();
        assert_eq!(err.kind, ViolationKind::TypeMismatch);
        assert_eq!(err.path.to_string(), "rollout");
    }

    #[test]
    fn test_tag_is_dropped() {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str("v: !custom hello").unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();
        assert_eq!(json_value["v"], "hello");
    }

    #[test]
    fn test_non_finite_numbers_are_recorded() {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str("a: .nan
b: [1, -.inf]
").unwrap();
        let document = convert_yaml_document(&yaml_value).unwrap();
        let paths: Vec<String> = document
            .non_finite
            .iter()
            .map(|(path, _)| path.to_string())
            .collect();
        assert_eq!(paths, ["a", "b[1]"]);
        assert_eq!(document.value["b"][0], 1);
    }

    #[test]
    fn test_strict_conversion_rejects_non_finite() {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str("x:
  y: .inf
").unwrap();
        let err = yaml_to_json_value(&yaml_value).unwrap_err();
        assert_eq!(err.kind, ViolationKind::TypeMismatch);
        assert_eq!(err.path.to_string(), "x.y");
    }
}
