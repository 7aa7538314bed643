//! Diagnostic paths: the names or indices leading to a criterion.

use std::fmt;

use serde::Serialize;

/// One step in a path: a criterion's `name`, or its index in its list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Name(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Name(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Name(name.to_string())
    }
}

/// Stack of segments, pushed before descending into a sub-criterion and
/// popped on return. Displays dot-joined, e.g. `rules.0.age`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorPath(Vec<PathSegment>);

impl ErrorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ErrorPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_dot_joined() {
        let mut path = ErrorPath::new();
        assert_eq!(path.to_string(), "");
        path.push(0usize);
        path.push("bobtest");
        path.push(3usize);
        assert_eq!(path.to_string(), "0.bobtest.3");
        assert_eq!(path.pop(), Some(PathSegment::Index(3)));
        assert_eq!(path.to_string(), "0.bobtest");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn serializes_as_a_list() {
        let path: ErrorPath = [PathSegment::from("top"), PathSegment::Index(1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["top",1]"#);
    }
}
