//! Absolute, segment-addressed node paths

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Path separator used by the content store
pub const SEPARATOR: char = '/';

/// Absolute path of a node in the content store
///
/// A path is `/` for the root or a `/`-separated list of non-empty segments:
/// - `/content/dam/projA`
/// - `/content/dam/projA/img.png/jcr:content/metadata`
///
/// Ancestry checks compare whole segments, so `/content/damage` is not a
/// descendant of `/content/dam`.
///
/// # Examples
///
/// ```
/// use assetguard_core::NodePath;
///
/// let path = NodePath::parse("/content/dam/projA").unwrap();
/// assert_eq!(path.name(), Some("projA"));
/// assert_eq!(path.parent().unwrap().as_str(), "/content/dam");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath {
    /// Canonical string form
    raw: String,
    /// Parsed segments (empty for the root)
    segments: Vec<String>,
}

impl NodePath {
    /// The root path `/`
    pub fn root() -> Self {
        Self {
            raw: SEPARATOR.to_string(),
            segments: Vec::new(),
        }
    }

    /// Parses an absolute path
    ///
    /// A single trailing separator is tolerated (`/content/dam/` is
    /// `/content/dam`). Empty, `.` and `..` segments are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        if !s.starts_with(SEPARATOR) {
            return Err(CoreError::InvalidPath(format!("path must be absolute: '{}'", s)));
        }

        let trimmed = if s.len() > 1 {
            s.strip_suffix(SEPARATOR).unwrap_or(s)
        } else {
            s
        };

        if trimmed == "/" {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for segment in trimmed[1..].split(SEPARATOR) {
            validate_segment(segment).map_err(|_| {
                CoreError::InvalidPath(format!("invalid segment '{}' in '{}'", segment, s))
            })?;
            segments.push(segment.to_string());
        }

        Ok(Self::from_segments(segments))
    }

    fn from_segments(segments: Vec<String>) -> Self {
        let raw = if segments.is_empty() {
            SEPARATOR.to_string()
        } else {
            segments.iter().fold(String::new(), |mut acc, s| {
                acc.push(SEPARATOR);
                acc.push_str(s);
                acc
            })
        };
        Self { raw, segments }
    }

    /// Returns the canonical string form
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (0 for the root)
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self::from_segments(
            self.segments[..self.segments.len() - 1].to_vec(),
        ))
    }

    /// Appends a child segment
    pub fn child(&self, name: &str) -> Result<Self> {
        validate_segment(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self::from_segments(segments))
    }

    /// True if `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments.starts_with(&self.segments)
    }

    /// True if `self` equals `other` or lies beneath it
    pub fn is_same_or_descendant_of(&self, other: &NodePath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// True if any segment equals `name`
    pub fn contains_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s == name)
    }

    /// Iterates from the root down to this path, inclusive on both ends
    pub fn lineage(&self) -> impl Iterator<Item = NodePath> + '_ {
        (0..=self.segments.len()).map(move |i| Self::from_segments(self.segments[..i].to_vec()))
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(CoreError::InvalidPath("empty path segment".to_string()));
    }
    if segment == "." || segment == ".." {
        return Err(CoreError::InvalidPath(format!("relative segment '{}'", segment)));
    }
    if segment.contains(SEPARATOR) {
        return Err(CoreError::InvalidPath(format!("segment contains separator: '{}'", segment)));
    }
    Ok(())
}

impl FromStr for NodePath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodePath {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.raw
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
