//! # relidx-core — Typed Release Index Model
//!
//! The release index is the declarative document that drives subnet
//! rollouts: a global rollout policy with ordered stages, plus the list of
//! release candidates and the versions each one ships. This crate is the
//! typed boundary between that document (decoded from YAML or JSON by
//! `serde_yaml` / `serde_json`) and the controller that consumes it.
//!
//! ## Key Design Principles
//!
//! 1. **Closed objects.** Every object level rejects unknown keys. Schema
//!    evolution has to be explicit. The rule is enforced both by the
//!    path-aware [`validate()`] entry point and by
//!    `#[serde(deny_unknown_fields)]` on every model type.
//!
//! 2. **Unset is not false.** Optional fields are `Option<T>`. A stage that
//!    omits `wait_for_next_week` is distinguishable from one that sets it to
//!    `false`, and re-serialization omits unset fields entirely.
//!
//! 3. **Order is data.** `stages` and `releases` keep document order.
//!    Nothing in this crate sorts or deduplicates.
//!
//! 4. **Structured failures.** A rejected document yields a list of
//!    [`Violation`]s, each carrying the field path
//!    (`rollout.stages[2].bake_time`), the expected shape, and what was
//!    actually found.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `relidx-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Validation and serialization perform no I/O and no logging.

pub mod error;
pub mod model;
pub mod path;
pub mod temporal;
pub mod validate;
pub mod yaml;

pub use error::{RelidxError, ValidationError, Violation, ViolationKind, Violations};
pub use model::{Model, Release, ReleaseIndex, Rollout, Stage, Version};
pub use path::FieldPath;
pub use temporal::{SkipDay, SkipDayError};
pub use validate::{
    serialize, validate, validate_with, validate_yaml, validate_yaml_with, ValidationMode,
    ValidatorConfig,
};
pub use yaml::{convert_yaml_document, yaml_to_json_value, YamlDocument};
