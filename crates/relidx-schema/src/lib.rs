//! # relidx-schema — Release Index JSON Schema & Loading
//!
//! The release index model in `relidx-core` is the typed rendition of
//! `schemas/release-index.schema.json`. This crate keeps the two honest
//! and gets documents off disk.
//!
//! ## Schema Validation (`validate`)
//!
//! [`SchemaValidator`] loads JSON schemas (from a directory, or the copy
//! embedded at compile time) and validates documents against them with the
//! `jsonschema` crate, reporting JSON Pointer instance and schema paths.
//! Tools that only speak JSON Schema (editors, CI linters) use the same
//! file, so both validators have to agree.
//!
//! ## Closedness Audit (`audit`)
//!
//! [`audit_additional_properties`] walks every object schema in a schema
//! document and reports the ones that accept unknown keys. The release
//! index schema must produce no findings.
//!
//! ## Loading (`loader`)
//!
//! [`load_release_index`] reads a YAML or JSON file, decodes it, and runs
//! the typed validator. This is the only layer that logs.
//!
//! ## Crate Policy
//!
//! - Depends only on `relidx-core` internally.
//! - Invalid documents are rejected with structured errors including
//!   path, field, and expected-vs-actual.

pub mod audit;
pub mod loader;
pub mod validate;

pub use audit::{audit_additional_properties, AdditionalPropertiesFinding};
pub use loader::{
    load_release_index, load_release_index_str, load_release_index_with, DocumentFormat,
};
pub use validate::{
    SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
    RELEASE_INDEX_SCHEMA, RELEASE_INDEX_SCHEMA_NAME,
};
