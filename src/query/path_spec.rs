//! Attribute/relation paths as requested by `fields` and `include`.

use std::fmt;

/// A path of field names, e.g. `project.owner`. Compared segment by segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSpec {
    elements: Vec<String>,
}

impl PathSpec {
    /// Builds a path from a dotted string. A plain name yields a single-segment path.
    pub fn of(path: &str) -> Self {
        PathSpec {
            elements: path.split('.').map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PathSpec {
            elements: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn first(&self) -> &str {
        self.elements.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.elements.join("."))
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::of(path)
    }
}
