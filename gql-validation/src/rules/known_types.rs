//! Known-type-name rule: every type name written out in a document — a
//! fragment's or inline fragment's type condition, a variable's declared
//! type — must name a type the schema actually defines.

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::visit::{Node, Visit};
use gql_language::ast::{Document, InlineFragment, VariableDefinition};
use gql_types::Schema;

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    for fragment in document.fragments() {
        if schema.ty(&fragment.type_condition.value).is_none() {
            errors.push(validation::unknown_type_in_fragment(&fragment.type_condition.value));
        }
    }

    let mut checker = KnownTypeChecker { schema, errors: Vec::new() };
    document.traverse(&mut checker);
    errors.append(&mut checker.errors);
}

struct KnownTypeChecker<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

impl<'a> Visit for KnownTypeChecker<'a> {
    fn visit_inline_fragment(&mut self, node: &InlineFragment) {
        let Some(type_condition) = &node.type_condition else { return };
        if self.schema.ty(&type_condition.value).is_none() {
            self.errors.push(validation::unknown_type_in_fragment(&type_condition.value));
        }
    }

    fn visit_variable_definition(&mut self, node: &VariableDefinition) {
        let name = node.ty.named_type();
        if self.schema.ty(&name.value).is_none() {
            self.errors.push(validation::unknown_type_in_fragment(&name.value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn rejects_a_fragment_conditioned_on_an_undeclared_type() {
        let document = parse_document("query { a { ...F } } fragment F on Ghost { a }");
        let schema = schema("type Query { a: Inner } type Inner { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("Unknown type")));
    }

    #[test]
    fn rejects_a_variable_declared_with_an_undeclared_type() {
        let document = parse_document("query($who: Ghost) { a }");
        let schema = schema("type Query { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("Unknown type")));
    }

    #[test]
    fn allows_every_type_the_schema_declares() {
        let document = parse_document("query($who: String) { a { ...F } } fragment F on Inner { a }");
        let schema = schema("type Query { a: Inner } type Inner { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }
}
