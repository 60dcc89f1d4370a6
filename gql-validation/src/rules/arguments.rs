//! Argument-level rules: every argument name given must be declared on the
//! field or directive it's supplied to, no argument name may repeat within
//! one list, and every argument declared as required (non-null, no default)
//! must be supplied.

use std::collections::HashSet;

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::visit::{Node, Visit};
use gql_language::ast::{Directive, Document, Field};
use gql_types::{FieldType, Schema};

use crate::scope::TypeInfo;
use crate::walk::{self, Checker};

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    let mut checker = ArgumentChecker { errors: Vec::new() };
    walk::walk(document, schema, &mut checker);
    errors.append(&mut checker.errors);

    let mut uniqueness = UniquenessChecker { schema, errors: Vec::new() };
    document.traverse(&mut uniqueness);
    errors.append(&mut uniqueness.errors);
}

struct ArgumentChecker {
    errors: Vec<GraphQLError>,
}

impl<'a> Checker<'a> for ArgumentChecker {
    fn enter_field(&mut self, field_node: &'a Field, info: TypeInfo<'a>, field_def: Option<&'a FieldType>) {
        let Some(field_def) = field_def else { return };

        for argument in &field_node.arguments {
            if !field_def.args.contains_key(&argument.name.value) {
                self.errors.push(validation::unknown_argument(
                    &argument.name.value,
                    &field_node.name.value,
                ));
            }
        }

        for (name, arg_def) in &field_def.args {
            let required = arg_def.ty.is_non_null() && arg_def.default_value.is_none();
            let supplied = field_node.arguments.iter().any(|argument| &argument.name.value == name);
            if required && !supplied {
                self.errors.push(validation::missing_required_argument(name, &arg_def.ty.to_string(), &field_node.name.value));
            }
        }

        let _ = info;
    }
}

struct UniquenessChecker<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

impl<'a> Visit for UniquenessChecker<'a> {
    fn visit_field(&mut self, node: &Field) {
        check_unique_argument_names(&node.arguments, &mut self.errors);
    }

    fn visit_directive(&mut self, node: &Directive) {
        check_unique_argument_names(&node.arguments, &mut self.errors);

        let Some(directive_def) = self.schema.directive(&node.name.value) else { return };

        for argument in &node.arguments {
            if !directive_def.args.contains_key(&argument.name.value) {
                self.errors.push(validation::unknown_argument(&argument.name.value, &format!("@{}", node.name.value)));
            }
        }

        for (name, arg_def) in &directive_def.args {
            let required = arg_def.ty.is_non_null() && arg_def.default_value.is_none();
            let supplied = node.arguments.iter().any(|argument| &argument.name.value == name);
            if required && !supplied {
                self.errors.push(validation::missing_required_argument(
                    name,
                    &arg_def.ty.to_string(),
                    &format!("@{}", node.name.value),
                ));
            }
        }
    }
}

fn check_unique_argument_names(arguments: &[gql_language::ast::Argument], errors: &mut Vec<GraphQLError>) {
    let mut seen = HashSet::new();
    for argument in arguments {
        if !seen.insert(argument.name.value.as_str()) {
            errors.push(validation::duplicate_argument(&argument.name.value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn rejects_an_unknown_argument() {
        let document = parse_document("query { hello(bogus: 1) }");
        let schema = schema("type Query { hello(name: String): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn requires_a_non_null_argument_with_no_default() {
        let document = parse_document("query { hello }");
        let schema = schema("type Query { hello(name: String!): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn allows_a_non_null_argument_with_a_default() {
        let document = parse_document("query { hello }");
        let schema = schema("type Query { hello(name: String! = \"x\"): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }
}
