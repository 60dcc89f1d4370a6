use super::macros::ast_struct;
use crate::lex::Span;

ast_struct!(
    /// A GraphQL name: an identifier for a field, type, argument, directive,
    /// variable, fragment or enum value.
    Name { value: String }
);

ast_struct!(
    /// A type-system definition's optional leading description, captured
    /// from a preceding string or block-string literal.
    Description {
        value: String,
        block: bool,
    }
);
