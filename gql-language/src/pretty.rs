//! Re-exports the caret-style error rendering from `gql-diagnostics`,
//! bound to this crate's [`Source`](crate::lex::Source) so lexer and parser
//! errors can be rendered without importing `gql-diagnostics` directly.

use gql_diagnostics::GraphQLError;

use crate::lex::Source;

pub fn render(error: &GraphQLError, source: &Source) -> String {
    gql_diagnostics::pretty::render(error, &source.name, &source.body)
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    #[test]
    fn renders_a_parse_error_against_its_source() {
        let source = Source::named("test.graphql", "{ a(");
        let tokens = tokenize(&source.body).unwrap();
        let error = parse(&tokens, &source).unwrap_err();
        let rendered = render(&error, &source);
        assert!(!rendered.is_empty());
    }
}
