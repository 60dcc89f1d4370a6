use gql_diagnostics::{offset_to_location, SourceLocation};

use super::Source;

/// A byte offset range into a `Source`'s body. `Span::default()` (0..0) is
/// used for synthesized nodes that don't correspond to any source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn collapse_to_start(self) -> Span {
        Span {
            start: self.start,
            end: self.start,
        }
    }

    pub fn join(&mut self, other: Span) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }

    pub fn joined(mut self, other: Span) -> Span {
        self.join(other);
        self
    }

    /// Resolves this span against `source` into a `Location`: the text it
    /// covers plus the start/end `(line, column)` positions.
    pub fn resolve(self, source: &Source) -> Location {
        Location {
            text: source.body[self.start..self.end.min(source.body.len())].to_owned(),
            start: offset_to_location(&source.body, self.start),
            end: offset_to_location(&source.body, self.end),
        }
    }
}

/// A resolved `Span`: the covered source text plus start/end positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub text: String,
    pub start: SourceLocation,
    pub end: SourceLocation,
}
