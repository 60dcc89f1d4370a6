//! Schema-aware validation of a parsed request document: the canonical
//! GraphQL rule set, run additively over the document (every applicable
//! rule runs to completion and reports into the same list; nothing
//! short-circuits on the first error).

mod rules;
mod scope;
#[cfg(test)]
mod test_support;
mod walk;

use gql_diagnostics::GraphQLError;
use gql_language::ast::Document;
use gql_types::Schema;

/// Runs every validation rule against `document` under `schema`, returning
/// every error found. An empty result means the document is safe to
/// execute; a non-empty one never short-circuits the others.
pub fn validate(schema: &Schema, document: &Document) -> Vec<GraphQLError> {
    let mut errors = Vec::new();

    rules::operations::check(document, &mut errors);
    rules::fragments::check(schema, document, &mut errors);
    rules::known_types::check(schema, document, &mut errors);
    rules::fields::check(schema, document, &mut errors);
    rules::arguments::check(schema, document, &mut errors);
    rules::values::check(schema, document, &mut errors);
    rules::variables::check(schema, document, &mut errors);
    rules::directives::check(schema, document, &mut errors);

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn collects_errors_from_more_than_one_rule_at_once() {
        let document = parse_document("query A { hello(bogus: 1) } query A { hello }");
        let schema = schema("type Query { hello(name: String): String }");
        let errors = validate(&schema, &document);

        assert!(errors.iter().any(|error| error.message.contains("Unknown argument")));
        assert!(errors.iter().any(|error| error.message.contains("only one operation named")));
    }

    #[test]
    fn allows_a_fully_valid_document() {
        let document = parse_document("query($name: String) { hello(name: $name) }");
        let schema = schema("type Query { hello(name: String): String }");
        let errors = validate(&schema, &document);
        assert!(errors.is_empty());
    }
}
