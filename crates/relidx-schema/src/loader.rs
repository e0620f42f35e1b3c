//! # Release Index Loading
//!
//! Reads a release index from disk or from text, decodes it with the
//! off-the-shelf YAML or JSON decoder, and runs the typed validator from
//! `relidx-core`. The typed validator is log-free; this layer reports what
//! it loaded and why a document was rejected.

use std::path::Path;

use relidx_core::{validate_with, validate_yaml_with, ReleaseIndex, ValidatorConfig};

use crate::validate::{decode_document, parse_yaml, read_source, SchemaValidationError};

/// Serialization format of a release index document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Load and validate a release index file.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or decoded, and `SchemaValidationError::InvalidReleaseIndex` with
/// every violation if it is not a valid release index.
pub fn load_release_index(path: &Path) -> Result<ReleaseIndex, SchemaValidationError> {
    load_release_index_with(path, &ValidatorConfig::default())
}

/// [`load_release_index`] with an explicit validator configuration.
pub fn load_release_index_with(
    path: &Path,
    config: &ValidatorConfig,
) -> Result<ReleaseIndex, SchemaValidationError> {
    let origin = path.display().to_string();
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %origin, format = ?format, "loading release index");
    let text = read_source(path)?;
    check(&text, format, &origin, config)
}

/// Decode and validate release index text.
///
/// # Errors
///
/// Same as [`load_release_index`], with `<inline>` as the document path.
pub fn load_release_index_str(
    text: &str,
    format: DocumentFormat,
) -> Result<ReleaseIndex, SchemaValidationError> {
    check(text, format, "<inline>", &ValidatorConfig::default())
}

/// YAML goes to the typed validator unconverted, so numbers JSON cannot
/// hold are reported with the other violations.
fn check(
    text: &str,
    format: DocumentFormat,
    origin: &str,
    config: &ValidatorConfig,
) -> Result<ReleaseIndex, SchemaValidationError> {
    let result = match format {
        DocumentFormat::Yaml => validate_yaml_with(&parse_yaml(text, origin)?, config),
        DocumentFormat::Json => validate_with(&decode_document(text, format, origin)?, config),
    };
    match result {
        Ok(index) => {
            tracing::debug!(
                path = %origin,
                stages = index.rollout().stages().len(),
                releases = index.releases().len(),
                paused = index.rollout().is_paused(),
                "release index loaded"
            );
            Ok(index)
        }
        Err(source) => {
            tracing::warn!(
                path = %origin,
                violations = source.violations().len(),
                "release index rejected"
            );
            Err(SchemaValidationError::InvalidReleaseIndex {
                path: origin.to_string(),
                source,
            })
        }
    }
}
