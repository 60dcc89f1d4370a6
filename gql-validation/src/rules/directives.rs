//! Directive rules: every directive used must be declared (by the schema or
//! a built-in), it must be declared for the location it's used in, and a
//! non-repeatable directive must not be applied twice at the same
//! location.

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::visit::{Node, Visit};
use gql_language::ast::{
    Directive, Document, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, VariableDefinition,
};
use gql_types::{DirectiveLocation, Schema};

use crate::scope::TypeInfo;
use crate::walk::{self, Checker};

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    let mut checker = DirectiveChecker { schema, errors: Vec::new() };
    walk::walk(document, schema, &mut checker);
    errors.append(&mut checker.errors);

    let mut repeats = RepeatabilityChecker { schema, errors: Vec::new() };
    document.traverse(&mut repeats);
    errors.append(&mut repeats.errors);
}

struct DirectiveChecker<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

impl<'a> Checker<'a> for DirectiveChecker<'a> {
    fn enter_directive(&mut self, directive: &'a Directive, location: DirectiveLocation, _info: TypeInfo<'a>) {
        let Some(directive_def) = self.schema.directive(&directive.name.value) else {
            self.errors.push(validation::unknown_directive(&directive.name.value));
            return;
        };

        if !directive_def.locations.contains(&location) {
            self.errors.push(validation::misplaced_directive(&directive.name.value, location.name()));
        }
    }
}

struct RepeatabilityChecker<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

impl<'a> RepeatabilityChecker<'a> {
    fn check(&mut self, directives: &[Directive]) {
        for (index, directive) in directives.iter().enumerate() {
            let repeatable = self.schema.directive(&directive.name.value).map(|def| def.is_repeatable).unwrap_or(true);
            if repeatable {
                continue;
            }
            if directives[..index].iter().any(|other| other.name.value == directive.name.value) {
                self.errors.push(validation::duplicate_directive_not_repeatable(&directive.name.value));
            }
        }
    }
}

impl<'a> Visit for RepeatabilityChecker<'a> {
    fn visit_operation_definition(&mut self, node: &OperationDefinition) {
        self.check(&node.directives);
    }

    fn visit_field(&mut self, node: &Field) {
        self.check(&node.directives);
    }

    fn visit_fragment_definition(&mut self, node: &FragmentDefinition) {
        self.check(&node.directives);
    }

    fn visit_fragment_spread(&mut self, node: &FragmentSpread) {
        self.check(&node.directives);
    }

    fn visit_inline_fragment(&mut self, node: &InlineFragment) {
        self.check(&node.directives);
    }

    fn visit_variable_definition(&mut self, node: &VariableDefinition) {
        self.check(&node.directives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn rejects_an_undeclared_directive() {
        let document = parse_document("query { hello @bogus }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("Unknown directive")));
    }

    #[test]
    fn rejects_a_directive_used_in_the_wrong_location() {
        let document = parse_document("query @skip(if: true) { hello }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("may not be used")));
    }

    #[test]
    fn allows_a_built_in_directive_at_a_valid_location() {
        let document = parse_document("query { hello @skip(if: true) }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }
}
