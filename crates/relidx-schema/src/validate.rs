//! # Schema Validation
//!
//! Checks release index documents against `release-index.schema.json`
//! (Draft 2020-12) with format assertions on, so `"format": "date"` is
//! enforced. The schema's `$defs` are resolved in place; no `$ref` is ever
//! fetched from the network.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use relidx_core::{yaml_to_json_value, ValidationError};
use serde_json::Value;
use thiserror::Error;

use crate::loader::DocumentFormat;

/// Filename of the release index schema.
pub const RELEASE_INDEX_SCHEMA_NAME: &str = "release-index.schema.json";

/// The release index schema, embedded at compile time.
pub const RELEASE_INDEX_SCHEMA: &str =
    include_str!("../../../schemas/release-index.schema.json");

/// Answers `$ref` lookups from loaded schemas only.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Relative ids resolve to a URI ending in the schema filename.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("schema {uri_str} is not loaded").into())
    }
}

/// Failure to load a schema or document, or a document that does not
/// conform.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// Rejected by the JSON Schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        schema_name: String,
        violations: ValidationViolations,
    },

    /// Missing or unparsable schema file.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError { schema_name: String, reason: String },

    /// The release index file is unreadable or not YAML/JSON at all.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError { path: String, reason: String },

    /// `jsonschema` refused to compile the schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError { schema_name: String, reason: String },

    /// Decoded, but rejected by the typed validator. `path` is the file
    /// path or `<inline>`.
    #[error("invalid release index '{path}': {source}")]
    InvalidReleaseIndex {
        path: String,
        #[source]
        source: ValidationError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One JSON Schema error, located by JSON Pointers into the document and
/// into the schema.
#[derive(Debug, Clone)]
pub struct Violation {
    pub instance_path: String,
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Every JSON Schema error for one document, in `jsonschema` order.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Instance paths of every error, e.g. `/rollout/stages/0/bake`.
    pub fn instance_paths(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.instance_path.as_str())
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Holds the release index schema (and any sibling `*.schema.json` in the
/// same directory), keyed by filename. A `jsonschema::Validator` is
/// compiled per call.
#[derive(Debug)]
pub struct SchemaValidator {
    /// Directory or `<embedded>`, for error messages.
    source: String,
    schemas: HashMap<String, Value>,
}

impl SchemaValidator {
    /// Create a validator by loading every `*.schema.json` in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory or
    /// any schema file cannot be read or parsed as JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir: PathBuf = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let value = parse_schema(name, &content)?;
            schemas.insert(name.to_string(), value);
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            schema_count = schemas.len(),
            "loaded schema directory"
        );

        Ok(Self {
            source: schema_dir.display().to_string(),
            schemas,
        })
    }

    /// Create a validator holding only the embedded release index schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the embedded
    /// schema is not valid JSON.
    pub fn with_embedded() -> Result<Self, SchemaValidationError> {
        let value = parse_schema(RELEASE_INDEX_SCHEMA_NAME, RELEASE_INDEX_SCHEMA)?;
        let mut schemas = HashMap::new();
        schemas.insert(RELEASE_INDEX_SCHEMA_NAME.to_string(), value);
        Ok(Self {
            source: "<embedded>".to_string(),
            schemas,
        })
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });

        opts
    }

    /// Compile the named schema.
    ///
    /// # Errors
    ///
    /// `SchemaLoadError` for an unknown name, `ValidatorBuildError` if
    /// `jsonschema` rejects the schema.
    pub fn build_validator(&self, schema_name: &str) -> Result<Validator, SchemaValidationError> {
        let schema_value = self.schemas.get(schema_name).ok_or_else(|| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("schema not found in {}", self.source),
            }
        })?;

        self.build_options().build(schema_value).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Validate a parsed JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every
    /// violation if the document is invalid.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let validator = self.build_validator(schema_name)?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: schema_name.to_string(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Validate a document against the release index schema.
    ///
    /// # Errors
    ///
    /// See [`SchemaValidator::validate_document`].
    pub fn validate_release_index(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate_document(instance, RELEASE_INDEX_SCHEMA_NAME)
    }

    /// Validate a YAML or JSON file against a schema.
    ///
    /// `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentLoadError` if the file cannot
    /// be read or decoded, and `ValidationFailed` if it does not conform.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let value = read_document(document_path)?;
        self.validate_document(&value, schema_name)
    }
}

fn parse_schema(name: &str, content: &str) -> Result<Value, SchemaValidationError> {
    serde_json::from_str(content).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name: name.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read and decode a document from disk, picking the decoder by extension.
fn read_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = read_source(path)?;
    decode_document(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

pub(crate) fn read_source(path: &Path) -> Result<String, SchemaValidationError> {
    std::fs::read_to_string(path).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })
}

pub(crate) fn parse_yaml(
    content: &str,
    origin: &str,
) -> Result<serde_yaml::Value, SchemaValidationError> {
    serde_yaml::from_str(content).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: origin.to_string(),
        reason: format!("invalid YAML: {e}"),
    })
}

/// Decode document text into a JSON value tree.
pub(crate) fn decode_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: origin.to_string(),
        reason,
    };
    match format {
        DocumentFormat::Yaml => yaml_to_json_value(&parse_yaml(content, origin)?)
            .map_err(|v| load_error(format!("YAML-to-JSON conversion failed: {v}"))),
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| load_error(format!("invalid JSON: {e}")))
        }
    }
}
