use std::fmt;

/// An immutable text buffer with an optional logical name. Lexer, parser
/// and printer all borrow a `Source`'s body; error reporting keeps a copy
/// of it around so locations can be resolved after the fact.
#[derive(Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub body: String,
}

impl Source {
    pub fn new(body: impl Into<String>) -> Source {
        Source {
            name: "GraphQL request".to_owned(),
            body: body.into(),
        }
    }

    pub fn named(name: impl Into<String>, body: impl Into<String>) -> Source {
        Source {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish()
    }
}

impl<T> From<T> for Source
where
    T: Into<String>,
{
    fn from(body: T) -> Source {
        Source::new(body)
    }
}
