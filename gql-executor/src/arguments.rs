//! Coerces a field's or directive's AST argument list against its declared
//! [`InputValueMap`], substituting already-coerced variable values in along
//! the way (the October 2021 GraphQL spec's `CoerceArgumentValues`).
//! Operates on AST literals rather than JSON, unlike [`crate::variables`],
//! because arguments are written as literals in the document and only
//! become JSON once a `$variable` reference or a scalar/enum leaf is
//! resolved.

use gql_diagnostics::{coercion, validation, GraphQLError};
use gql_language::ast::{Argument, Value as AstValue};
use gql_types::{InputValueMap, NamedType, Schema, TypeRef};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

pub fn coerce_argument_values(
    schema: &Schema,
    defs: &InputValueMap,
    provided: &[Argument],
    variables: &IndexMap<String, JsonValue>,
) -> Result<IndexMap<String, JsonValue>, GraphQLError> {
    let mut coerced = IndexMap::new();

    for (name, input_value) in defs {
        let argument = provided.iter().find(|argument| argument.name.value == *name);

        let value = match argument {
            Some(argument) => match &argument.value {
                AstValue::Variable(variable) => match variables.get(&variable.name.value) {
                    Some(value) => Some(value.clone()),
                    None if input_value.ty.is_non_null() && input_value.default_value.is_none() => {
                        return Err(coercion::missing_variable_value(
                            &variable.name.value,
                            &input_value.ty.to_string(),
                        ));
                    }
                    None => None,
                },
                AstValue::Null(_) => {
                    if input_value.ty.is_non_null() {
                        return Err(validation::missing_required_argument(name, &input_value.ty.to_string(), name));
                    }
                    Some(JsonValue::Null)
                }
                literal => Some(
                    coerce_value(schema, &input_value.ty, literal, variables)
                        .map_err(|detail| coercion::invalid_literal(&input_value.ty.to_string(), &detail))?,
                ),
            },
            None => None,
        };

        match value {
            Some(value) => {
                coerced.insert(name.clone(), value);
            }
            None => {
                if let Some(default_value) = &input_value.default_value {
                    coerced.insert(name.clone(), gql_types::literal_to_json(default_value));
                } else if input_value.ty.is_non_null() {
                    return Err(validation::missing_required_argument(name, &input_value.ty.to_string(), name));
                }
            }
        }
    }

    Ok(coerced)
}

fn coerce_value(
    schema: &Schema,
    ty: &TypeRef,
    value: &AstValue,
    variables: &IndexMap<String, JsonValue>,
) -> Result<JsonValue, String> {
    if let AstValue::Variable(variable) = value {
        return variables
            .get(&variable.name.value)
            .cloned()
            .ok_or_else(|| format!("variable \"${}\" was not provided", variable.name.value));
    }

    match ty {
        TypeRef::NonNull(inner) => {
            if matches!(value, AstValue::Null(_)) {
                return Err("must not be null".to_owned());
            }
            coerce_value(schema, inner, value, variables)
        }
        TypeRef::List(inner) => match value {
            AstValue::List(list) => {
                let mut out = Vec::with_capacity(list.values.len());
                for item in &list.values {
                    out.push(coerce_value(schema, inner, item, variables)?);
                }
                Ok(JsonValue::Array(out))
            }
            AstValue::Null(_) => Ok(JsonValue::Null),
            other => Ok(JsonValue::Array(vec![coerce_value(schema, inner, other, variables)?])),
        },
        TypeRef::Named(name) => {
            if matches!(value, AstValue::Null(_)) {
                return Ok(JsonValue::Null);
            }
            match schema.ty(name) {
                Some(NamedType::Scalar(_)) => gql_types::coerce_literal(name, value),
                Some(NamedType::Enum(enum_type)) => match value {
                    AstValue::Enum(enum_value) if enum_type.values.contains_key(&enum_value.value) => {
                        Ok(JsonValue::String(enum_value.value.clone()))
                    }
                    _ => Err(format!("value does not match any value of enum {}", name)),
                },
                Some(NamedType::InputObject(input_object)) => match value {
                    AstValue::Object(object) => coerce_input_object(schema, name, &input_object.fields, object, variables),
                    _ => Err(format!("{} must be an object", name)),
                },
                _ => Err(format!("{} is not a valid input type", name)),
            }
        }
    }
}

fn coerce_input_object(
    schema: &Schema,
    type_name: &str,
    field_definitions: &InputValueMap,
    provided: &gql_language::ast::ObjectValue,
    variables: &IndexMap<String, JsonValue>,
) -> Result<JsonValue, String> {
    for field in &provided.fields {
        if !field_definitions.contains_key(&field.name.value) {
            return Err(format!("{} is not a field of input type {}", field.name.value, type_name));
        }
    }

    let mut out = serde_json::Map::new();
    for (field_name, field) in field_definitions {
        let supplied = provided.fields.iter().find(|f| f.name.value == *field_name);
        match supplied {
            Some(supplied) => {
                out.insert(field_name.clone(), coerce_value(schema, &field.ty, &supplied.value, variables)?);
            }
            None => {
                if let Some(default_value) = &field.default_value {
                    out.insert(field_name.clone(), gql_types::literal_to_json(default_value));
                } else if field.ty.is_non_null() {
                    return Err(format!("{} of required type {} was not provided", field_name, field.ty));
                }
            }
        }
    }

    if let Some(NamedType::InputObject(input_object)) = schema.ty(type_name) {
        if input_object.is_one_of {
            let non_null_count = out.values().filter(|value| !value.is_null()).count();
            if non_null_count != 1 {
                return Err(format!("exactly one field must be set on @oneOf input type {}", type_name));
            }
        }
    }

    Ok(JsonValue::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_language::lex::{tokenize, Source};
    use gql_language::parse;
    use gql_types::build;

    fn field_arguments(operation: &str) -> Vec<Argument> {
        let source = Source::new(operation.to_owned());
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        let operation = document.operations().next().unwrap();
        match &operation.selection_set.selections[0] {
            gql_language::ast::Selection::Field(field) => field.arguments.clone(),
            _ => panic!("expected a field selection"),
        }
    }

    #[test]
    fn applies_argument_defaults_when_omitted() {
        let schema = build("type Query { hello(name: String = \"world\"): String }").unwrap();
        let defs = match schema.query_type().fields() {
            Some(fields) => fields.get("hello").unwrap().args.clone(),
            None => panic!(),
        };
        let coerced = coerce_argument_values(&schema, &defs, &field_arguments("{ hello }"), &IndexMap::new()).unwrap();
        assert_eq!(coerced.get("name"), Some(&JsonValue::String("world".to_owned())));
    }

    #[test]
    fn substitutes_variables_into_literal_arguments() {
        let schema = build("type Query { hello(name: String!): String }").unwrap();
        let defs = match schema.query_type().fields() {
            Some(fields) => fields.get("hello").unwrap().args.clone(),
            None => panic!(),
        };
        let mut variables = IndexMap::new();
        variables.insert("name".to_owned(), JsonValue::String("Ada".to_owned()));
        let coerced =
            coerce_argument_values(&schema, &defs, &field_arguments("query($name: String!) { hello(name: $name) }"), &variables)
                .unwrap();
        assert_eq!(coerced.get("name"), Some(&JsonValue::String("Ada".to_owned())));
    }

    #[test]
    fn rejects_a_one_of_input_object_whose_only_set_field_is_null() {
        let schema = build(
            "type Query { hello(filter: Filter): String }
             input Filter @oneOf { byId: ID byName: String }",
        )
        .unwrap();
        let defs = match schema.query_type().fields() {
            Some(fields) => fields.get("hello").unwrap().args.clone(),
            None => panic!(),
        };
        let coerced = coerce_argument_values(
            &schema,
            &defs,
            &field_arguments("{ hello(filter: { byId: null }) }"),
            &IndexMap::new(),
        );
        assert!(coerced.is_err());
    }
}
