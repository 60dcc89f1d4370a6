//! Variable rules: every variable used somewhere in an operation (directly,
//! or via a spread fragment) must be declared by that operation; every
//! variable declared must be used at least once; and every use of a
//! variable must sit in a position whose type accepts the variable's
//! declared type.

use std::collections::HashSet;

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::{Document, OperationDefinition, Value, VariableDefinition};
use gql_types::{Schema, TypeRef};

use crate::scope::{is_variable_usage_allowed, TypeInfo};
use crate::walk::{self, Checker};

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    let mut checker = VariableChecker {
        current_operation: None,
        declared: HashSet::new(),
        used: HashSet::new(),
        errors: Vec::new(),
    };
    walk::walk(document, schema, &mut checker);
    errors.append(&mut checker.errors);
}

struct VariableChecker<'doc> {
    current_operation: Option<&'doc OperationDefinition>,
    declared: HashSet<&'doc str>,
    used: HashSet<&'doc str>,
    errors: Vec<GraphQLError>,
}

fn operation_label(operation: &OperationDefinition) -> &str {
    operation.name.as_ref().map(|name| name.value.as_str()).unwrap_or("")
}

impl<'doc> Checker<'doc> for VariableChecker<'doc> {
    fn enter_operation(&mut self, operation: &'doc OperationDefinition, _info: TypeInfo<'doc>) {
        self.current_operation = Some(operation);
        self.declared = operation
            .variable_definitions
            .iter()
            .map(|definition| definition.variable.name.value.as_str())
            .collect();
        self.used.clear();
    }

    fn leave_operation(&mut self, operation: &'doc OperationDefinition) {
        for definition in &operation.variable_definitions {
            if !self.used.contains(definition.variable.name.value.as_str()) {
                self.errors.push(validation::unused_variable(&definition.variable.name.value, operation_label(operation)));
            }
        }
        self.current_operation = None;
    }

    fn enter_fragment_definition(&mut self, _fragment: &'doc gql_language::ast::FragmentDefinition, _info: TypeInfo<'doc>) {
        self.current_operation = None;
    }

    fn enter_variable_definition(&mut self, _variable_definition: &'doc VariableDefinition, _operation: &'doc OperationDefinition) {}

    fn enter_value(&mut self, value: &'doc Value, expected: Option<&'doc TypeRef>, _info: TypeInfo<'doc>) {
        let Value::Variable(variable) = value else { return };
        let Some(operation) = self.current_operation else { return };
        let name = variable.name.value.as_str();

        self.used.insert(name);

        let declaration = operation
            .variable_definitions
            .iter()
            .find(|definition| definition.variable.name.value == name);

        let Some(declaration) = declaration else {
            self.errors.push(validation::undefined_variable(name, operation_label(operation)));
            return;
        };

        if let Some(expected_ty) = expected {
            let actual = TypeRef::from_ast(&declaration.ty);
            if !is_variable_usage_allowed(&actual, expected_ty, declaration.default_value.is_some()) {
                self.errors.push(validation::variable_type_mismatch(name, &actual.to_string(), &expected_ty.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn reports_a_variable_used_but_never_declared() {
        let document = parse_document("query { hello(name: $who) }");
        let schema = schema("type Query { hello(name: String): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("not defined")));
    }

    #[test]
    fn reports_a_variable_declared_but_never_used() {
        let document = parse_document("query($who: String) { hello }");
        let schema = schema("type Query { hello(name: String): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("never used")));
    }

    #[test]
    fn rejects_a_variable_of_the_wrong_type_at_its_use_site() {
        let document = parse_document("query($who: Int) { hello(name: $who) }");
        let schema = schema("type Query { hello(name: String): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("cannot be used")));
    }

    #[test]
    fn allows_a_matching_variable_declaration_and_use() {
        let document = parse_document("query($who: String) { hello(name: $who) }");
        let schema = schema("type Query { hello(name: String): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }
}
