//! Value rules: every literal argument/input value must match the shape and
//! type of the position it's supplied to, and every input object literal
//! must name each of its fields at most once.

use std::collections::HashSet;

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::{Document, ObjectValue, Value};
use gql_types::{NamedType, Schema, TypeRef};

use crate::scope::TypeInfo;
use crate::walk::{self, Checker};

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    let mut checker = ValueChecker { errors: Vec::new() };
    walk::walk(document, schema, &mut checker);
    errors.append(&mut checker.errors);
}

struct ValueChecker {
    errors: Vec<GraphQLError>,
}

impl<'a> Checker<'a> for ValueChecker {
    fn enter_value(&mut self, value: &'a Value, expected: Option<&'a TypeRef>, info: TypeInfo<'a>) {
        let Some(expected) = expected else { return };

        check_value(value, expected, info.schema, &mut self.errors);

        if let Value::Object(object) = value {
            check_object_value(object, expected, info.schema, &mut self.errors);
        }
    }
}

fn check_value(value: &Value, expected: &TypeRef, schema: &Schema, errors: &mut Vec<GraphQLError>) {
    if matches!(value, Value::Variable(_)) {
        // Variable usages are checked by `crate::rules::variables` against
        // the variable's own declared type; a variable can stand for any
        // shape at the AST level.
        return;
    }

    if let Value::Null(_) = value {
        if expected.is_non_null() {
            errors.push(validation::value_of_incorrect_type(&expected.to_string(), "null value provided for a non-null type."));
        }
        return;
    }

    match expected.nullable() {
        TypeRef::List(_) => {
            if !matches!(value, Value::List(_)) {
                errors.push(validation::value_of_incorrect_type(
                    &expected.to_string(),
                    &format!("{} given where a list is expected.", value.describe_kind()),
                ));
            }
            // Element-wise checks happen as `walk` recurses into each item
            // with the list's own element type as `expected`.
        }
        TypeRef::Named(name) => {
            if matches!(value, Value::List(_)) {
                errors.push(validation::value_of_incorrect_type(
                    &expected.to_string(),
                    "list value given where a scalar, enum, or input object is expected.",
                ));
            } else {
                check_named_value(value, name, schema, errors);
            }
        }
        TypeRef::NonNull(_) => unreachable!("TypeRef::nullable() never returns a NonNull"),
    }
}

fn check_named_value(value: &Value, name: &str, schema: &Schema, errors: &mut Vec<GraphQLError>) {
    match schema.ty(name) {
        Some(NamedType::Enum(enum_type)) => match value {
            Value::Enum(member) if enum_type.values.contains_key(&member.value) => {}
            Value::Enum(member) => errors.push(validation::value_of_incorrect_type(
                name,
                &format!("\"{}\" is not a valid value for enum \"{}\".", member.value, name),
            )),
            _ => errors.push(validation::value_of_incorrect_type(
                name,
                &format!("{} given where enum \"{}\" is expected.", value.describe_kind(), name),
            )),
        },
        Some(NamedType::InputObject(_)) => {
            if !matches!(value, Value::Object(_)) {
                errors.push(validation::value_of_incorrect_type(
                    name,
                    &format!("{} given where input object \"{}\" is expected.", value.describe_kind(), name),
                ));
            }
        }
        Some(NamedType::Scalar(_)) | None => {
            if let Err(detail) = gql_types::coerce_literal(name, value) {
                errors.push(validation::value_of_incorrect_type(name, &detail));
            }
        }
        Some(_) => errors.push(validation::value_of_incorrect_type(
            name,
            &format!("\"{}\" is not an input type.", name),
        )),
    }
}

fn check_object_value(object: &ObjectValue, expected: &TypeRef, schema: &Schema, errors: &mut Vec<GraphQLError>) {
    let named = expected.nullable().named_type();
    let Some(NamedType::InputObject(input)) = schema.ty(named) else { return };

    let mut seen = HashSet::new();
    for field in &object.fields {
        if !seen.insert(field.name.value.as_str()) {
            errors.push(validation::duplicate_input_field(&field.name.value));
        }
        if !input.fields.contains_key(&field.name.value) {
            errors.push(validation::value_of_incorrect_type(
                named,
                &format!("\"{}\" is not a field of input type \"{}\".", field.name.value, named),
            ));
        }
    }

    for (name, field_def) in &input.fields {
        let required = field_def.ty.is_non_null() && field_def.default_value.is_none();
        let supplied = object.fields.iter().any(|field| &field.name.value == name);
        if required && !supplied {
            errors.push(validation::missing_required_argument(name, &field_def.ty.to_string(), named));
        }
    }

    if input.is_one_of {
        let fully_literal = object.fields.iter().all(|field| field.value.is_constant());
        if fully_literal && object.fields.len() != 1 {
            errors.push(validation::value_of_incorrect_type(
                named,
                "exactly one field must be supplied for a oneOf input object.",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn rejects_a_string_where_an_int_is_expected() {
        let document = parse_document("query { hello(count: \"x\") }");
        let schema = schema("type Query { hello(count: Int): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_an_unknown_enum_member() {
        let document = parse_document("query { hello(color: PURPLE) }");
        let schema = schema("type Query { hello(color: Color): String } enum Color { RED GREEN }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_a_duplicate_input_object_field() {
        let document = parse_document("query { hello(filter: { name: \"a\" name: \"b\" }) }");
        let schema = schema("type Query { hello(filter: Filter): String } input Filter { name: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("only one input field")));
    }

    #[test]
    fn allows_a_well_typed_literal() {
        let document = parse_document("query { hello(count: 1) }");
        let schema = schema("type Query { hello(count: Int): String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }
}
