use serde::Serialize;

/// One segment of a `GraphQLError`'s `path`: either a response key or a list
/// index, mirroring the wire format's `path: [String | Int]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> PathSegment {
        PathSegment::Field(name.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> PathSegment {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> PathSegment {
        PathSegment::Index(index)
    }
}

/// Appends `segment` to `path` and returns the extended path, leaving `path`
/// itself untouched. Used at each level of field completion to build the
/// `path` reported alongside a field error.
pub fn extend_path(path: &[PathSegment], segment: impl Into<PathSegment>) -> Vec<PathSegment> {
    let mut path = path.to_vec();
    path.push(segment.into());
    path
}
