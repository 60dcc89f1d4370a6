//! A hand-rolled recursive-descent parser over a lexed [`TokenStream`].
//!
//! Nothing here needs error recovery — a syntax error aborts the whole
//! parse with one positioned [`GraphQLError`] — so a direct, hand-written
//! descent is both simpler and easier to reason about for the
//! selection-depth limit and precise error messages this parser needs.

mod cursor;
mod executable;
mod schema;
mod value;

use gql_diagnostics::GraphQLError;

use crate::ast::{Definition, Document};
use crate::lex::{Source, TokenKind, TokenStream};

pub use cursor::{Cursor, MAX_SELECTION_DEPTH};
pub use value::{parse_description, parse_type as parse_type_node, parse_value as parse_value_node};

/// Parses a full document: a sequence of executable definitions (operations
/// and fragments) and/or type-system definitions/extensions.
pub fn parse(tokens: &TokenStream, source: &Source) -> Result<Document, GraphQLError> {
    let mut cursor = Cursor::new(tokens, source);
    let mut definitions = Vec::new();

    while !cursor.at_eof() {
        definitions.push(parse_definition(&mut cursor)?);
    }

    Ok(Document { span: None, definitions })
}

fn parse_definition(cursor: &mut Cursor) -> Result<Definition, GraphQLError> {
    if cursor.is(TokenKind::LBrace)
        || cursor.is_name("query")
        || cursor.is_name("mutation")
        || cursor.is_name("subscription")
    {
        executable::parse_operation_definition(cursor).map(Definition::Operation)
    } else if cursor.is_name("fragment") {
        executable::parse_fragment_definition(cursor).map(Definition::Fragment)
    } else {
        schema::parse_type_system_definition_or_extension(cursor)
    }
}

/// Parses a standalone value literal (as accepted for a variable's JSON
/// value or a default-value argument outside any document context).
pub fn parse_value(tokens: &TokenStream, source: &Source, constant: bool) -> Result<crate::ast::Value, GraphQLError> {
    let mut cursor = Cursor::new(tokens, source);
    let value = value::parse_value(&mut cursor, constant)?;
    if !cursor.at_eof() {
        return Err(cursor.unexpected("end of input"));
    }
    Ok(value)
}

/// Parses a standalone type reference, e.g. `[String!]!`.
pub fn parse_type(tokens: &TokenStream, source: &Source) -> Result<crate::ast::Type, GraphQLError> {
    let mut cursor = Cursor::new(tokens, source);
    let ty = value::parse_type(&mut cursor)?;
    if !cursor.at_eof() {
        return Err(cursor.unexpected("end of input"));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::tokenize;

    #[test]
    fn parses_mixed_document_with_operations_and_sdl() {
        let source = Source::new("query { a }\nscalar DateTime");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 2);
    }

    #[test]
    fn reports_an_unexpected_token_error() {
        let source = Source::new("{ a(");
        let tokens = tokenize(&source.body).unwrap();
        let error = parse(&tokens, &source).unwrap_err();
        assert!(error.message.contains("Expected"));
    }

    #[test]
    fn parse_value_rejects_trailing_tokens() {
        let source = Source::new("1 2");
        let tokens = tokenize(&source.body).unwrap();
        assert!(parse_value(&tokens, &source, true).is_err());
    }
}
