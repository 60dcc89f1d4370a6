#![cfg(test)]

use gql_language::ast::Document;
use gql_language::lex::{tokenize, Source};
use gql_types::Schema;

pub fn parse_document(source: &str) -> Document {
    let src = Source::new(source.to_owned());
    let tokens = tokenize(&src.body).unwrap();
    gql_language::parse(&tokens, &src).unwrap()
}

pub fn schema(sdl: &str) -> Schema {
    gql_types::build(sdl).unwrap()
}
