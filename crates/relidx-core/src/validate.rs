//! # Release Index Validation
//!
//! Converts a generic decoded document into the typed [`ReleaseIndex`]
//! tree, or reports exactly where it deviates.
//!
//! ## Rules
//!
//! - Every object is closed: a key the model does not define is an
//!   [`ViolationKind::UnknownField`] violation.
//! - Required keys must be present ([`ViolationKind::MissingRequiredField`])
//!   and well-typed. A required key set to `null` is a type mismatch.
//! - Optional keys that are absent or `null` resolve to `None`.
//! - No coercion across types. `5` is not a string and `"true"` is not a
//!   boolean ([`ViolationKind::TypeMismatch`]).
//! - `skip_days` entries must be strict `YYYY-MM-DD` calendar dates
//!   ([`ViolationKind::MalformedScalar`]).
//!
//! ## Error Propagation
//!
//! By default the validator makes one pass over the whole document and
//! reports every violation it finds ([`ValidationMode::Accumulate`]). It
//! does not descend into a value whose own type is wrong, so a `stages`
//! string yields one violation, not one per expected stage field.
//! [`ValidationMode::FailFast`] stops at the first violation.
//!
//! Validation reads its input only. It does no I/O and no logging.

use serde_json::{Map, Value};

use crate::error::{RelidxError, ValidationError, Violation, ViolationKind, Violations};
use crate::model::{Release, ReleaseIndex, Rollout, Stage, Version};
use crate::path::FieldPath;
use crate::temporal::{SkipDay, SkipDayError};
use crate::yaml::convert_yaml_document;

const RELEASE_INDEX_FIELDS: &[&str] = &["rollout", "releases"];
const ROLLOUT_FIELDS: &[&str] = &["pause", "skip_days", "stages"];
const STAGE_FIELDS: &[&str] = &[
    "subnets",
    "bake_time",
    "update_unassigned_nodes",
    "wait_for_next_week",
];
const RELEASE_FIELDS: &[&str] = &["rc_name", "versions"];
const VERSION_FIELDS: &[&str] = &["version", "name", "release_notes_ready", "subnets"];

/// How violations are collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Visit the whole document and report every violation.
    #[default]
    Accumulate,
    /// Stop at the first violation.
    FailFast,
}

/// Validator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
}

impl ValidatorConfig {
    pub fn fail_fast() -> Self {
        Self {
            mode: ValidationMode::FailFast,
        }
    }
}

/// Validate a decoded document with the default configuration.
///
/// # Errors
///
/// Returns [`ValidationError::Invalid`] listing every violation found.
pub fn validate(document: &Value) -> Result<ReleaseIndex, ValidationError> {
    validate_with(document, &ValidatorConfig::default())
}

/// Validate a decoded document.
///
/// On success the result preserves the order of every sequence exactly as
/// given. On failure the error carries the path, expected shape, and
/// actual value of each violation, in the order encountered.
///
/// # Errors
///
/// Returns [`ValidationError::Invalid`] when the document is not a
/// release index.
pub fn validate_with(
    document: &Value,
    config: &ValidatorConfig,
) -> Result<ReleaseIndex, ValidationError> {
    Walker::new(config.mode, Vec::new()).finish(document)
}

/// Validate a decoded YAML document with the default configuration.
///
/// # Errors
///
/// See [`validate_yaml_with`].
pub fn validate_yaml(document: &serde_yaml::Value) -> Result<ReleaseIndex, ValidationError> {
    validate_yaml_with(document, &ValidatorConfig::default())
}

/// Validate a decoded YAML document.
///
/// A non-finite number (`.nan`, `.inf`) is reported as a type mismatch at
/// its own path, alongside every other violation.
///
/// # Errors
///
/// Returns [`ValidationError::Invalid`] when the YAML has no JSON
/// counterpart (a null or composite mapping key) or when the converted
/// document is not a release index.
pub fn validate_yaml_with(
    document: &serde_yaml::Value,
    config: &ValidatorConfig,
) -> Result<ReleaseIndex, ValidationError> {
    let converted = convert_yaml_document(document).map_err(|v| ValidationError::Invalid {
        violations: Violations::new(vec![v]),
    })?;
    Walker::new(config.mode, converted.non_finite).finish(&converted.value)
}

/// Re-emit a release index as a generic document.
///
/// Unset optional fields are omitted, so the output of
/// `serialize(&validate(doc)?)` differs from a hand-written `doc` only
/// where `doc` spelled out a `null`.
///
/// # Errors
///
/// Returns [`RelidxError::Serialization`] if `serde_json` rejects the tree.
pub fn serialize(index: &ReleaseIndex) -> Result<Value, RelidxError> {
    Ok(serde_json::to_value(index)?)
}

/// Short description of a value's type and content for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) if n.is_f64() => format!("number {n}"),
        Value::Number(n) => format!("integer {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} key(s)", map.len()),
    }
}

/// Single-pass, path-tracking walk over the document.
///
/// Each method returns `None` when the value it was given could not be
/// converted; the reason has already been pushed onto `violations`.
struct Walker {
    mode: ValidationMode,
    violations: Vec<Violation>,
    /// Stand-ins for numbers the source format could hold but JSON cannot.
    non_finite: Vec<(FieldPath, String)>,
}

impl Walker {
    fn new(mode: ValidationMode, non_finite: Vec<(FieldPath, String)>) -> Self {
        Self {
            mode,
            violations: Vec::new(),
            non_finite,
        }
    }

    fn finish(mut self, document: &Value) -> Result<ReleaseIndex, ValidationError> {
        let index = self.release_index(document, &FieldPath::root());
        match index {
            Some(index) if self.violations.is_empty() => Ok(index),
            _ => Err(ValidationError::Invalid {
                violations: Violations::new(self.violations),
            }),
        }
    }

    fn halted(&self) -> bool {
        self.mode == ValidationMode::FailFast && !self.violations.is_empty()
    }

    fn push(&mut self, path: &FieldPath, kind: ViolationKind, expected: &str, actual: String) {
        if self.halted() {
            return;
        }
        let actual = match self.non_finite.iter().find(|(p, _)| p == path) {
            Some((_, spelled)) if kind == ViolationKind::TypeMismatch => spelled.clone(),
            _ => actual,
        };
        self.violations.push(Violation {
            path: path.clone(),
            kind,
            expected: expected.to_string(),
            actual,
        });
    }

    /// Type-check an object and reject keys outside `fields`.
    ///
    /// The map is still returned after unknown keys so the known fields
    /// get checked too.
    fn object<'a>(
        &mut self,
        value: &'a Value,
        path: &FieldPath,
        fields: &[&str],
        what: &str,
    ) -> Option<&'a Map<String, Value>> {
        if self.halted() {
            return None;
        }
        let Some(map) = value.as_object() else {
            self.push(path, ViolationKind::TypeMismatch, what, describe(value));
            return None;
        };
        for key in map.keys() {
            if !fields.contains(&key.as_str()) {
                self.push(
                    &path.key(key.as_str()),
                    ViolationKind::UnknownField,
                    &format!("one of: {}", fields.join(", ")),
                    format!("key {key:?}"),
                );
            }
        }
        if self.halted() {
            return None;
        }
        Some(map)
    }

    fn required<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        path: &FieldPath,
        key: &str,
        what: &str,
    ) -> Option<&'a Value> {
        let value = map.get(key);
        if value.is_none() {
            self.push(
                &path.key(key),
                ViolationKind::MissingRequiredField,
                what,
                "nothing".to_string(),
            );
        }
        value
    }

    /// Outer `None`: conversion failed. Inner `None`: absent or `null`.
    fn optional<T>(
        &mut self,
        map: &Map<String, Value>,
        path: &FieldPath,
        key: &str,
        convert: impl FnOnce(&mut Self, &Value, &FieldPath) -> Option<T>,
    ) -> Option<Option<T>> {
        match map.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(value) => convert(self, value, &path.key(key)).map(Some),
        }
    }

    fn string(&mut self, value: &Value, path: &FieldPath) -> Option<String> {
        if self.halted() {
            return None;
        }
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.push(path, ViolationKind::TypeMismatch, "string", describe(other));
                None
            }
        }
    }

    fn boolean(&mut self, value: &Value, path: &FieldPath) -> Option<bool> {
        if self.halted() {
            return None;
        }
        match value {
            Value::Bool(b) => Some(*b),
            other => {
                self.push(path, ViolationKind::TypeMismatch, "boolean", describe(other));
                None
            }
        }
    }

    fn skip_day(&mut self, value: &Value, path: &FieldPath) -> Option<SkipDay> {
        if self.halted() {
            return None;
        }
        let Value::String(s) = value else {
            self.push(
                path,
                ViolationKind::TypeMismatch,
                "date string (YYYY-MM-DD)",
                describe(value),
            );
            return None;
        };
        match SkipDay::parse(s) {
            Ok(day) => Some(day),
            Err(e) => {
                let expected = match e {
                    SkipDayError::Format(_) => "date in YYYY-MM-DD form",
                    SkipDayError::NoSuchDate(_) => "an existing calendar date",
                    SkipDayError::YearOutOfRange(_) => "a year between 0000 and 9999",
                };
                self.push(path, ViolationKind::MalformedScalar, expected, describe(value));
                None
            }
        }
    }

    /// Convert every element of an array, reporting each bad element.
    fn list<T>(
        &mut self,
        value: &Value,
        path: &FieldPath,
        what: &str,
        mut item: impl FnMut(&mut Self, &Value, &FieldPath) -> Option<T>,
    ) -> Option<Vec<T>> {
        if self.halted() {
            return None;
        }
        let Some(items) = value.as_array() else {
            self.push(path, ViolationKind::TypeMismatch, what, describe(value));
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, element) in items.iter().enumerate() {
            match item(self, element, &path.index(i)) {
                Some(converted) => out.push(converted),
                None => ok = false,
            }
            if self.halted() {
                return None;
            }
        }
        ok.then_some(out)
    }

    fn string_list(&mut self, value: &Value, path: &FieldPath) -> Option<Vec<String>> {
        self.list(value, path, "array of strings", Self::string)
    }

    fn version(&mut self, value: &Value, path: &FieldPath) -> Option<Version> {
        let map = self.object(value, path, VERSION_FIELDS, "version object")?;

        let version = self
            .required(map, path, "version", "string")
            .and_then(|v| self.string(v, &path.key("version")));
        let name = self
            .required(map, path, "name", "string")
            .and_then(|v| self.string(v, &path.key("name")));
        let release_notes_ready = self.optional(map, path, "release_notes_ready", Self::boolean);
        let subnets = self.optional(map, path, "subnets", Self::string_list);

        let mut out = Version::new(version?, name?);
        if let Some(ready) = release_notes_ready? {
            out = out.with_release_notes_ready(ready);
        }
        if let Some(subnets) = subnets? {
            out = out.with_subnets(subnets);
        }
        Some(out)
    }

    fn release(&mut self, value: &Value, path: &FieldPath) -> Option<Release> {
        let map = self.object(value, path, RELEASE_FIELDS, "release object")?;

        let rc_name = self
            .required(map, path, "rc_name", "string")
            .and_then(|v| self.string(v, &path.key("rc_name")));
        let versions = self
            .required(map, path, "versions", "array of versions")
            .and_then(|v| {
                self.list(v, &path.key("versions"), "array of versions", Self::version)
            });

        Some(Release::new(rc_name?, versions?))
    }

    fn stage(&mut self, value: &Value, path: &FieldPath) -> Option<Stage> {
        let map = self.object(value, path, STAGE_FIELDS, "stage object")?;

        let subnets = self.optional(map, path, "subnets", Self::string_list);
        let bake_time = self.optional(map, path, "bake_time", Self::string);
        let update_unassigned_nodes =
            self.optional(map, path, "update_unassigned_nodes", Self::boolean);
        let wait_for_next_week = self.optional(map, path, "wait_for_next_week", Self::boolean);

        let mut out = Stage::new();
        if let Some(subnets) = subnets? {
            out = out.with_subnets(subnets);
        }
        if let Some(bake_time) = bake_time? {
            out = out.with_bake_time(bake_time);
        }
        if let Some(update) = update_unassigned_nodes? {
            out = out.with_update_unassigned_nodes(update);
        }
        if let Some(wait) = wait_for_next_week? {
            out = out.with_wait_for_next_week(wait);
        }
        Some(out)
    }

    fn rollout(&mut self, value: &Value, path: &FieldPath) -> Option<Rollout> {
        let map = self.object(value, path, ROLLOUT_FIELDS, "rollout object")?;

        let pause = self.optional(map, path, "pause", Self::boolean);
        let skip_days = self.optional(map, path, "skip_days", |w, v, p| {
            w.list(v, p, "array of date strings", Self::skip_day)
        });
        let stages = self
            .required(map, path, "stages", "array of stages")
            .and_then(|v| self.list(v, &path.key("stages"), "array of stages", Self::stage));

        let mut out = Rollout::new(stages?);
        if let Some(pause) = pause? {
            out = out.with_pause(pause);
        }
        if let Some(skip_days) = skip_days? {
            out = out.with_skip_days(skip_days);
        }
        Some(out)
    }

    fn release_index(&mut self, value: &Value, path: &FieldPath) -> Option<ReleaseIndex> {
        let map = self.object(value, path, RELEASE_INDEX_FIELDS, "release index object")?;

        let rollout = self
            .required(map, path, "rollout", "rollout object")
            .and_then(|v| self.rollout(v, &path.key("rollout")));
        let releases = self
            .required(map, path, "releases", "array of releases")
            .and_then(|v| {
                self.list(v, &path.key("releases"), "array of releases", Self::release)
            });

        Some(ReleaseIndex::new(rollout?, releases?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "rollout": {"stages": []},
            "releases": []
        })
    }

    fn full() -> Value {
        json!({
            "rollout": {
                "pause": false,
                "skip_days": ["2024-02-02", "2024-12-25"],
                "stages": [
                    {"subnets": ["io67a"], "bake_time": "8h"},
                    {"subnets": ["shefu", "uzr34"], "bake_time": "4h"},
                    {"update_unassigned_nodes": true},
                    {"subnets": ["pjljw"], "wait_for_next_week": true, "bake_time": "4h"}
                ]
            },
            "releases": [
                {
                    "rc_name": "rc--2024-02-21_23-01",
                    "versions": [
                        {"version": "2e921c9a", "name": "rc--2024-02-21_23-01", "release_notes_ready": true},
                        {"version": "76521ef7", "name": "rc--2024-02-21_23-01-feat", "subnets": ["io67a"]}
                    ]
                },
                {
                    "rc_name": "rc--2024-02-14_23-01",
                    "versions": [
                        {"version": "85bd56a7", "name": "rc--2024-02-14_23-01", "release_notes_ready": false, "subnets": []}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_minimal_document() {
        let index = validate(&minimal()).unwrap();
        assert!(index.rollout().stages().is_empty());
        assert!(index.releases().is_empty());
        assert_eq!(index.rollout().pause(), None);
        assert_eq!(index.rollout().skip_days(), None);
    }

    #[test]
    fn test_full_document() {
        let index = validate(&full()).unwrap();
        let rollout = index.rollout();
        assert_eq!(rollout.pause(), Some(false));
        assert_eq!(rollout.skip_days().map(<[SkipDay]>::len), Some(2));
        assert_eq!(rollout.stages().len(), 4);
        assert_eq!(rollout.stages()[1].subnets(), Some(&["shefu".to_string(), "uzr34".to_string()][..]));
        assert_eq!(rollout.stages()[2].update_unassigned_nodes(), Some(true));
        assert_eq!(rollout.stages()[2].bake_time(), None);
        assert_eq!(rollout.stages()[3].wait_for_next_week(), Some(true));

        let release = &index.releases()[0];
        assert_eq!(release.rc_name(), "rc--2024-02-21_23-01");
        assert_eq!(release.versions()[0].release_notes_ready(), Some(true));
        assert_eq!(release.versions()[0].subnets(), None);
        assert_eq!(release.versions()[1].subnets(), Some(&["io67a".to_string()][..]));

        let old = &index.releases()[1].versions()[0];
        assert_eq!(old.release_notes_ready(), Some(false));
        assert_eq!(old.subnets(), Some(&[][..]));
    }

    #[test]
    fn test_serialize_is_exact_inverse_for_documents_without_nulls() {
        let doc = full();
        let index = validate(&doc).unwrap();
        assert_eq!(serialize(&index).unwrap(), doc);
    }

    #[test]
    fn test_null_optional_is_unset_and_dropped() {
        let doc = json!({
            "rollout": {"pause": null, "stages": [{"bake_time": null}]},
            "releases": []
        });
        let index = validate(&doc).unwrap();
        assert_eq!(index.rollout().pause(), None);
        assert_eq!(index.rollout().stages()[0].bake_time(), None);
        assert_eq!(
            serialize(&index).unwrap(),
            json!({"rollout": {"stages": [{}]}, "releases": []})
        );
    }

    #[test]
    fn test_null_required_is_type_mismatch() {
        let doc = json!({"rollout": {"stages": null}, "releases": []});
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages"));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = validate(&json!([])).unwrap_err();
        let v = err.violations().first().unwrap();
        assert_eq!(v.kind, ViolationKind::TypeMismatch);
        assert!(v.path.is_root());
        assert_eq!(v.actual, "array of 0 item(s)");
    }

    #[test]
    fn test_unknown_top_level_key() {
        let mut doc = minimal();
        doc["metadata"] = json!({});
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::UnknownField, "metadata"));
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_unknown_nested_keys() {
        let mut doc = full();
        doc["rollout"]["stages"][2]["bake"] = json!("1h");
        doc["releases"][1]["versions"][0]["notes"] = json!("x");
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::UnknownField, "rollout.stages[2].bake"));
        assert!(err.has(ViolationKind::UnknownField, "releases[1].versions[0].notes"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_missing_required_fields() {
        let doc = json!({
            "rollout": {},
            "releases": [{"versions": [{"name": "x"}]}]
        });
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::MissingRequiredField, "rollout.stages"));
        assert!(err.has(ViolationKind::MissingRequiredField, "releases[0].rc_name"));
        assert!(err.has(ViolationKind::MissingRequiredField, "releases[0].versions[0].version"));
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_no_coercion() {
        let doc = json!({
            "rollout": {"pause": "false", "stages": [{"bake_time": 5}]},
            "releases": [{"rc_name": 1, "versions": []}]
        });
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.pause"));
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages[0].bake_time"));
        assert!(err.has(ViolationKind::TypeMismatch, "releases[0].rc_name"));
        let bake = err
            .violations()
            .violations()
            .iter()
            .find(|v| v.path.to_string() == "rollout.stages[0].bake_time")
            .unwrap();
        assert_eq!(bake.expected, "string");
        assert_eq!(bake.actual, "integer 5");
    }

    #[test]
    fn test_wrong_container_type_reported_once() {
        let doc = json!({"rollout": {"stages": "all"}, "releases": []});
        let err = validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages"));
    }

    #[test]
    fn test_subnet_element_type() {
        let doc = json!({"rollout": {"stages": [{"subnets": ["a", 2, "c"]}]}, "releases": []});
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages[0].subnets[1]"));
    }

    #[test]
    fn test_skip_day_format() {
        let doc = json!({
            "rollout": {"skip_days": ["2024-02-02", "2024-02-30", "Feb 2 2024", 20240202], "stages": []},
            "releases": []
        });
        let err = validate(&doc).unwrap_err();
        assert!(err.has(ViolationKind::MalformedScalar, "rollout.skip_days[1]"));
        assert!(err.has(ViolationKind::MalformedScalar, "rollout.skip_days[2]"));
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.skip_days[3]"));
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_fail_fast_stops_at_first() {
        let doc = json!({
            "rollout": {"pause": 1, "stages": [{"bake_time": 5}]},
            "releases": [{"rc_name": 1, "versions": []}],
            "extra": true
        });
        let accumulated = validate(&doc).unwrap_err();
        assert_eq!(accumulated.violations().len(), 4);

        let err = validate_with(&doc, &ValidatorConfig::fail_fast()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.has(ViolationKind::UnknownField, "extra"));
    }

    #[test]
    fn test_validate_yaml() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "rollout:\n  stages:\n    - bake_time: 1h\nreleases: []\n",
        )
        .unwrap();
        let index = validate_yaml(&yaml).unwrap();
        assert_eq!(index.rollout().stages()[0].bake_time(), Some("1h"));
    }

    #[test]
    fn test_validate_yaml_unquoted_number_is_not_a_string() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "rollout:\n  stages: []\nreleases:\n  - rc_name: rc1\n    versions:\n      - version: 1.2\n        name: x\n",
        )
        .unwrap();
        let err = validate_yaml(&yaml).unwrap_err();
        assert!(err.has(ViolationKind::TypeMismatch, "releases[0].versions[0].version"));
    }

    #[test]
    fn test_validate_yaml_non_finite_number_accumulates() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "rollout:\n  pause: 1\n  stages:\n    - bake_time: .nan\nreleases: []\nextra: 1\n",
        )
        .unwrap();
        let err = validate_yaml(&yaml).unwrap_err();
        assert_eq!(err.violations().len(), 3);
        assert!(err.has(ViolationKind::UnknownField, "extra"));
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.pause"));
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages[0].bake_time"));

        let bake_time = err
            .violations()
            .violations()
            .iter()
            .find(|v| v.path.to_string() == "rollout.stages[0].bake_time")
            .unwrap();
        assert_eq!(bake_time.expected, "string");
        assert_eq!(bake_time.actual, "number .nan");
    }

    #[test]
    fn test_validate_yaml_non_finite_in_optional_and_list_positions() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "rollout:\n  skip_days: [.inf]\n  stages:\n    - wait_for_next_week: -.inf\nreleases: []\n",
        )
        .unwrap();
        let err = validate_yaml(&yaml).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.skip_days[0]"));
        assert!(err.has(ViolationKind::TypeMismatch, "rollout.stages[0].wait_for_next_week"));
    }

    #[test]
    fn test_validate_yaml_non_finite_fail_fast() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("rollout: .nan\nreleases: .nan\n").unwrap();
        let err = validate_yaml_with(&yaml, &ValidatorConfig::fail_fast()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.has(ViolationKind::TypeMismatch, "rollout"));
    }
}
