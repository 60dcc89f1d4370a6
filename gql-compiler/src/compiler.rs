//! A `Compiler` pairs a built [`Schema`] with the document validator: one
//! call builds the schema, the other re-runs the rule set against a
//! request document each time one comes in.
//!
//! This compiler is single-shot rather than incremental: it has no
//! dependency-graph machinery for partial recompilation across many source
//! files, because nothing in this workspace's scope (a stateless
//! parse-validate-execute request pipeline) calls for watching and
//! re-linking a multi-file project the way an LSP does.

use gql_diagnostics::GraphQLError;
use gql_language::ast::Document;
use gql_types::{BuildOptions, Schema};

/// Holds a built schema and offers the request-time half of the pipeline
/// (validating a parsed query document against it) without re-parsing or
/// re-building the schema on every request.
#[derive(Debug)]
pub struct Compiler {
    schema: Schema,
}

impl Compiler {
    /// Parses and builds `sdl` into a schema, then wraps it for repeated
    /// request validation.
    pub fn build(sdl: &str) -> Result<Compiler, Vec<GraphQLError>> {
        Ok(Compiler { schema: gql_types::build(sdl)? })
    }

    /// Builds a schema from an already-parsed type-system document.
    pub fn build_ast(document: &Document, options: BuildOptions) -> Result<Compiler, Vec<GraphQLError>> {
        Ok(Compiler { schema: gql_types::build_ast(document, options)? })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates `document` against the wrapped schema. Equivalent to
    /// calling the free function [`crate::validate`] with `self.schema()`.
    pub fn compile(&self, document: &Document) -> Vec<GraphQLError> {
        gql_validation::validate(&self.schema, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_language::lex::{tokenize, Source};

    fn parse_document(source: &str) -> Document {
        let src = Source::new(source.to_owned());
        let tokens = tokenize(&src.body).unwrap();
        gql_language::parse(&tokens, &src).unwrap()
    }

    #[test]
    fn builds_a_schema_and_validates_a_document_against_it() {
        let compiler = Compiler::build("type Query { hello: String }").unwrap();
        let document = parse_document("query { hello }");
        assert!(compiler.compile(&document).is_empty());
    }

    #[test]
    fn reports_validation_errors_without_rebuilding_the_schema() {
        let compiler = Compiler::build("type Query { hello: String }").unwrap();
        let document = parse_document("query { bogus }");
        let errors = compiler.compile(&document);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_an_unbuildable_schema() {
        let result = Compiler::build("type Query { hello: Ghost }");
        assert!(result.is_err());
    }
}
