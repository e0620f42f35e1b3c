//! # Error Types — Structured Validation Failures
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - A rejected document is never an opaque message. Each [`Violation`]
//!   names the field path, the kind of problem, the expected shape, and
//!   the value actually found.
//! - Every failure is local and recoverable by the caller. There is no
//!   partial-acceptance mode: any violation means the configuration must
//!   not be used.

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

/// Top-level error type for release index handling.
#[derive(Error, Debug)]
pub enum RelidxError {
    /// The document does not have the release index shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The category of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A required key is absent.
    MissingRequiredField,
    /// A key is present that the closed object does not define.
    UnknownField,
    /// A value has the wrong structural type (e.g. a string where a list
    /// was required).
    TypeMismatch,
    /// A scalar has the right gross type but an invalid format (e.g. an
    /// unparsable date string).
    MalformedScalar,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingRequiredField => "missing required field",
            Self::UnknownField => "unknown field",
            Self::TypeMismatch => "type mismatch",
            Self::MalformedScalar => "malformed value",
        };
        f.write_str(s)
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the offending value (or of the missing key).
    pub path: FieldPath,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Human-readable description of what was expected.
    pub expected: String,
    /// Human-readable description of what was found.
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: expected {}, found {}",
            self.path, self.kind, self.expected, self.actual
        )
    }
}

/// Collection of validation violations, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation found, if any.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Iterate over violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// A document was rejected by [`crate::validate()`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document did not conform to the release index shape.
    #[error("invalid release index ({} violation(s)):\n{violations}", .violations.len())]
    Invalid {
        /// Structured list of individual violations.
        violations: Violations,
    },
}

impl ValidationError {
    /// The violations carried by this error.
    pub fn violations(&self) -> &Violations {
        match self {
            Self::Invalid { violations } => violations,
        }
    }

    /// Returns true if any violation has the given kind at the given path.
    pub fn has(&self, kind: ViolationKind, path: &str) -> bool {
        self.violations()
            .violations()
            .iter()
            .any(|v| v.kind == kind && v.path.to_string() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bake_time_mismatch() -> Violation {
        Violation {
            path: FieldPath::root().key("rollout").key("stages").index(2).key("bake_time"),
            kind: ViolationKind::TypeMismatch,
            expected: "string".to_string(),
            actual: "integer 5".to_string(),
        }
    }

    #[test]
    fn test_violation_display_format() {
        let display = bake_time_mismatch().to_string();
        assert_eq!(
            display,
            "rollout.stages[2].bake_time: type mismatch: expected string, found integer 5"
        );
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            path: FieldPath::root(),
            kind: ViolationKind::TypeMismatch,
            expected: "object".to_string(),
            actual: "array of 0 item(s)".to_string(),
        };
        assert!(v.to_string().starts_with("(root): "));
    }

    #[test]
    fn test_error_message_lists_every_violation() {
        let err = ValidationError::Invalid {
            violations: Violations::new(vec![
                bake_time_mismatch(),
                Violation {
                    path: FieldPath::root().key("releases"),
                    kind: ViolationKind::MissingRequiredField,
                    expected: "array of releases".to_string(),
                    actual: "nothing".to_string(),
                },
            ]),
        };
        let msg = err.to_string();
        assert!(msg.contains("2 violation(s)"));
        assert!(msg.contains("rollout.stages[2].bake_time"));
        assert!(msg.contains("releases: missing required field"));
        assert!(err.has(ViolationKind::MissingRequiredField, "releases"));
        assert!(!err.has(ViolationKind::UnknownField, "releases"));
    }

    #[test]
    fn test_of_kind_filters() {
        let violations = Violations::new(vec![bake_time_mismatch()]);
        assert_eq!(violations.of_kind(ViolationKind::TypeMismatch).count(), 1);
        assert_eq!(violations.of_kind(ViolationKind::UnknownField).count(), 0);
    }
}
