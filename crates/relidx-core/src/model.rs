//! # Release Index Model
//!
//! The entity tree of a release index document, leaf to root:
//!
//! ```text
//! ReleaseIndex
//! ├── rollout: Rollout
//! │   ├── pause?, skip_days?
//! │   └── stages: [Stage]          (order = rollout order)
//! └── releases: [Release]
//!     └── versions: [Version]
//! ```
//!
//! Ownership is a strict tree. Values are immutable once built: fields are
//! private and exposed through accessors. The `with_*` constructors consume
//! and return `self` so documents can be assembled in code, but nothing
//! mutates a value in place.
//!
//! Field names are the wire keys verbatim. Every type carries
//! `#[serde(deny_unknown_fields)]`, and unset optional fields are skipped
//! on output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::temporal::SkipDay;

/// Prefix of release candidate names cut by the release pipeline.
pub const RC_NAME_PREFIX: &str = "rc--";

/// One publishable software version within a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Version {
    version: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    release_notes_ready: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subnets: Option<Vec<String>>,
}

impl Version {
    /// A version with only its required fields set.
    pub fn new(version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
            release_notes_ready: None,
            subnets: None,
        }
    }

    /// Set `release_notes_ready`.
    pub fn with_release_notes_ready(mut self, ready: bool) -> Self {
        self.release_notes_ready = Some(ready);
        self
    }

    /// Set the targeted subnets.
    pub fn with_subnets<I, S>(mut self, subnets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subnets = Some(subnets.into_iter().map(Into::into).collect());
        self
    }

    /// Version identifier (typically a commit hash).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether release notes are finalized, if stated.
    pub fn release_notes_ready(&self) -> Option<bool> {
        self.release_notes_ready
    }

    /// Subnets this version targets, if stated.
    pub fn subnets(&self) -> Option<&[String]> {
        self.subnets.as_deref()
    }

    /// Whether this version explicitly targets the subnet whose principal
    /// is given. Entries in `subnets` are short ids matched as prefixes of
    /// the full principal.
    pub fn targets_subnet(&self, principal: &str) -> bool {
        self.subnets
            .iter()
            .flatten()
            .any(|short| !short.is_empty() && principal.starts_with(short.as_str()))
    }
}

/// A named release candidate and the versions it ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Release {
    rc_name: String,
    versions: Vec<Version>,
}

impl Release {
    pub fn new(rc_name: impl Into<String>, versions: Vec<Version>) -> Self {
        Self {
            rc_name: rc_name.into(),
            versions,
        }
    }

    /// Release candidate name.
    pub fn rc_name(&self) -> &str {
        &self.rc_name
    }

    /// Versions in document order.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Look up a version entry by identifier.
    pub fn find_version(&self, version: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// The cut date encoded in an `rc--YYYY-MM-DD_HH-MM` name.
    ///
    /// Returns `None` for names that do not follow the convention; the
    /// name itself is never validated against it.
    pub fn rc_date(&self) -> Option<NaiveDate> {
        let rest = self.rc_name.strip_prefix(RC_NAME_PREFIX)?;
        let date = rest.get(..10)?;
        match rest.get(10..11) {
            None | Some("_") => SkipDay::parse(date).ok().map(|d| d.date()),
            Some(_) => None,
        }
    }
}

/// One step of a multi-stage rollout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subnets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bake_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_unassigned_nodes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wait_for_next_week: Option<bool>,
}

impl Stage {
    /// A stage with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subnets<I, S>(mut self, subnets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subnets = Some(subnets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_bake_time(mut self, bake_time: impl Into<String>) -> Self {
        self.bake_time = Some(bake_time.into());
        self
    }

    pub fn with_update_unassigned_nodes(mut self, update: bool) -> Self {
        self.update_unassigned_nodes = Some(update);
        self
    }

    pub fn with_wait_for_next_week(mut self, wait: bool) -> Self {
        self.wait_for_next_week = Some(wait);
        self
    }

    /// Subnets advanced at this stage, if stated.
    pub fn subnets(&self) -> Option<&[String]> {
        self.subnets.as_deref()
    }

    /// Dwell duration before the next stage, as written. Not interpreted here.
    pub fn bake_time(&self) -> Option<&str> {
        self.bake_time.as_deref()
    }

    pub fn update_unassigned_nodes(&self) -> Option<bool> {
        self.update_unassigned_nodes
    }

    pub fn wait_for_next_week(&self) -> Option<bool> {
        self.wait_for_next_week
    }

    /// True only when `update_unassigned_nodes` is explicitly `true`.
    pub fn is_unassigned_nodes_stage(&self) -> bool {
        self.update_unassigned_nodes == Some(true)
    }
}

/// Global rollout policy plus its ordered stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rollout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pause: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skip_days: Option<Vec<SkipDay>>,
    stages: Vec<Stage>,
}

impl Rollout {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            pause: None,
            skip_days: None,
            stages,
        }
    }

    pub fn with_pause(mut self, pause: bool) -> Self {
        self.pause = Some(pause);
        self
    }

    pub fn with_skip_days(mut self, skip_days: Vec<SkipDay>) -> Self {
        self.skip_days = Some(skip_days);
        self
    }

    /// Whether progression is globally halted, if stated.
    pub fn pause(&self) -> Option<bool> {
        self.pause
    }

    /// Dates on which the rollout must not advance, if stated.
    pub fn skip_days(&self) -> Option<&[SkipDay]> {
        self.skip_days.as_deref()
    }

    /// Stages in rollout order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// True only when `pause` is explicitly `true`.
    pub fn is_paused(&self) -> bool {
        self.pause == Some(true)
    }

    /// Whether `date` is listed in `skip_days`.
    pub fn is_skip_day(&self, date: NaiveDate) -> bool {
        self.skip_days
            .iter()
            .flatten()
            .any(|d| d.date() == date)
    }
}

/// The content of a release index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseIndex {
    rollout: Rollout,
    releases: Vec<Release>,
}

impl ReleaseIndex {
    pub fn new(rollout: Rollout, releases: Vec<Release>) -> Self {
        Self { rollout, releases }
    }

    pub fn rollout(&self) -> &Rollout {
        &self.rollout
    }

    /// Releases in document order.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// The first release, in document order, that ships `version`.
    pub fn release_for_version(&self, version: &str) -> Option<&Release> {
        self.releases
            .iter()
            .find(|r| r.find_version(version).is_some())
    }
}

/// Document root: the whole parsed document is exactly one [`ReleaseIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(ReleaseIndex);

impl Model {
    pub fn into_inner(self) -> ReleaseIndex {
        self.0
    }
}

impl AsRef<ReleaseIndex> for Model {
    fn as_ref(&self) -> &ReleaseIndex {
        &self.0
    }
}

impl From<ReleaseIndex> for Model {
    fn from(index: ReleaseIndex) -> Self {
        Self(index)
    }
}

impl From<Model> for ReleaseIndex {
    fn from(model: Model) -> Self {
        model.0
    }
}
