//! # Field Paths
//!
//! Locates a value inside a release index document so that a violation can
//! be traced back to the exact line a human has to edit.
//!
//! Rendered in dotted form (`rollout.stages[2].bake_time`) for messages,
//! and as an RFC 6901 JSON Pointer (`/rollout/stages/2/bake_time`) for
//! comparison with JSON Schema validator output.

use std::fmt;

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member lookup.
    Key(String),
    /// Array element lookup.
    Index(usize),
}

/// Path from the document root to a value. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to the member `key` of the object at this path.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.into()));
        Self(segments)
    }

    /// Path to element `index` of the array at this path.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual segments, root first.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Render as an RFC 6901 JSON Pointer. The root renders as `""`.
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            match segment {
                Segment::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
                Segment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{k}")?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
