//! Dotted namespace paths

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dotted namespace path such as `com.bdl.config`.
///
/// The empty path is the root namespace. Namespaces order alphabetically
/// by their dotted text, which is the order generated units list their
/// includes in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// The root (empty) namespace.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Wrap a dotted path. Surrounding whitespace is trimmed; segments are
    /// not validated here (see [`crate::validation::is_dotted_path`]).
    pub fn parse(path: &str) -> Self {
        Self(path.trim().to_string())
    }

    /// Build a namespace from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |ns, segment| ns.child(segment.as_ref()))
    }

    /// The namespace one level below this one.
    pub fn child(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{}", self.0, segment))
        }
    }

    /// Iterate the path segments. The root namespace has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualify a simple name with this namespace (`ns.Name`, or `Name` at the root).
    pub fn qualify(&self, name: &str) -> String {
        if self.0.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.0, name)
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
