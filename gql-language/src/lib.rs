//! Lexer, parser, AST and canonical printer for the GraphQL language,
//! independent of any particular schema or execution engine.

pub mod ast;
pub mod lex;
pub mod print;
pub mod syn;

pub use ast::{strip_locations, Document};
pub use print::print;
pub use syn::{parse, parse_type, parse_value};

#[cfg(feature = "pretty-errors")]
pub mod pretty;

#[cfg(test)]
mod tests {
    use super::lex::{tokenize, Source};
    use super::{parse, print};

    #[test]
    fn parses_and_prints_a_document_end_to_end() {
        let source = Source::new("query Greeting { hello world }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 1);
        assert!(print(&document).contains("hello"));
    }
}
