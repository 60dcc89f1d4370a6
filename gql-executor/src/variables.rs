//! Coerces the `variables` JSON object a request supplies against the
//! operation's declared `VariableDefinition`s (graphql-js's
//! `getVariableValues` / the October 2021 GraphQL spec's
//! `CoerceVariableValues`). Defaulting, non-null/list shape, scalar
//! parsing and `@oneOf` input-object checks all live here rather than in
//! `arguments.rs`, since variables are coerced once up front from raw JSON
//! while field/directive arguments are coerced per-use from AST literals
//! with variables already substituted in.

use gql_diagnostics::{coercion, GraphQLError};
use gql_language::ast::VariableDefinition;
use gql_language::print::print_type;
use gql_types::{literal_to_json, NamedType, Schema, TypeRef};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Coerces `provided` (the request's raw `variables` object) against
/// `definitions`, producing the map `execute`/`subscribe` thread through
/// argument coercion. A variable absent from `provided` but carrying a
/// default value takes that default; absent with no default and a
/// nullable type is simply omitted (leaving the argument coercion step to
/// fall back to the argument's own default, if any).
pub fn coerce_variable_values(
    schema: &Schema,
    definitions: &[VariableDefinition],
    provided: &IndexMap<String, JsonValue>,
) -> Result<IndexMap<String, JsonValue>, GraphQLError> {
    let mut coerced = IndexMap::new();

    for definition in definitions {
        let name = definition.variable.name.value.as_str();
        let ty = TypeRef::from_ast(&definition.ty);
        let has_value = provided.contains_key(name);

        if !has_value {
            if let Some(default_value) = &definition.default_value {
                coerced.insert(name.to_owned(), literal_to_json(default_value));
            } else if ty.is_non_null() {
                return Err(coercion::missing_variable_value(name, &print_type(&definition.ty)));
            }
            continue;
        }

        let value = &provided[name];
        if value.is_null() {
            if ty.is_non_null() {
                return Err(coercion::missing_variable_value(name, &print_type(&definition.ty)));
            }
            coerced.insert(name.to_owned(), JsonValue::Null);
            continue;
        }

        let coerced_value = coerce_json_value(schema, &ty, value)
            .map_err(|detail| coercion::wrong_type(name, &print_type(&definition.ty), &detail))?;
        coerced.insert(name.to_owned(), coerced_value);
    }

    Ok(coerced)
}

fn coerce_json_value(schema: &Schema, ty: &TypeRef, value: &JsonValue) -> Result<JsonValue, String> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                return Err("must not be null".to_owned());
            }
            coerce_json_value(schema, inner, value)
        }
        TypeRef::List(inner) => match value {
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(coerce_json_value(schema, inner, item)?);
                }
                Ok(JsonValue::Array(out))
            }
            _ => Ok(JsonValue::Array(vec![coerce_json_value(schema, inner, value)?])),
        },
        TypeRef::Named(name) => match schema.ty(name) {
            Some(NamedType::Scalar(_)) => gql_types::parse_scalar(name, value),
            Some(NamedType::Enum(enum_type)) => match value.as_str() {
                Some(enum_value) if enum_type.values.contains_key(enum_value) => Ok(value.clone()),
                _ => Err(format!("value does not match any value of enum {}", name)),
            },
            Some(NamedType::InputObject(input_object)) => match value {
                JsonValue::Object(fields) => coerce_json_input_object(schema, name, &input_object.fields, fields),
                _ => Err(format!("{} must be an object", name)),
            },
            _ => Err(format!("{} is not a valid input type", name)),
        },
    }
}

fn coerce_json_input_object(
    schema: &Schema,
    type_name: &str,
    field_definitions: &gql_types::InputValueMap,
    provided: &serde_json::Map<String, JsonValue>,
) -> Result<JsonValue, String> {
    for field_name in provided.keys() {
        if !field_definitions.contains_key(field_name) {
            return Err(format!("{} is not a field of input type {}", field_name, type_name));
        }
    }

    let mut out = serde_json::Map::new();
    for (field_name, field) in field_definitions {
        match provided.get(field_name) {
            Some(value) if !value.is_null() => {
                out.insert(field_name.clone(), coerce_json_value(schema, &field.ty, value)?);
            }
            Some(_) if field.ty.is_non_null() => {
                return Err(format!("{} must not be null", field_name));
            }
            Some(_) => {
                out.insert(field_name.clone(), JsonValue::Null);
            }
            None => {
                if let Some(default_value) = &field.default_value {
                    out.insert(field_name.clone(), literal_to_json(default_value));
                } else if field.ty.is_non_null() {
                    return Err(format!("{} of required type {} was not provided", field_name, field.ty));
                }
            }
        }
    }

    let input_object = schema.ty(type_name).and_then(|ty| match ty {
        NamedType::InputObject(input_object) => Some(input_object),
        _ => None,
    });
    if let Some(input_object) = input_object {
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

    fn variable_definitions(operation: &str) -> Vec<VariableDefinition> {
        let source = Source::new(operation.to_owned());
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        document.operations().next().unwrap().variable_definitions.clone()
    }

    #[test]
    fn applies_the_declared_default_when_absent() {
        let schema = build("type Query { hello(name: String): String }").unwrap();
        let definitions = variable_definitions("query($name: String = \"world\") { hello(name: $name) }");
        let coerced = coerce_variable_values(&schema, &definitions, &IndexMap::new()).unwrap();
        assert_eq!(coerced.get("name"), Some(&JsonValue::String("world".to_owned())));
    }

    #[test]
    fn rejects_a_missing_non_null_variable() {
        let schema = build("type Query { hello(name: String!): String }").unwrap();
        let definitions = variable_definitions("query($name: String!) { hello(name: $name) }");
        assert!(coerce_variable_values(&schema, &definitions, &IndexMap::new()).is_err());
    }

    #[test]
    fn coerces_a_list_of_scalars() {
        let schema = build("type Query { hello(ids: [Int!]): String }").unwrap();
        let definitions = variable_definitions("query($ids: [Int!]) { hello(ids: $ids) }");
        let mut provided = IndexMap::new();
        provided.insert("ids".to_owned(), serde_json::json!([1, 2, 3]));
        let coerced = coerce_variable_values(&schema, &definitions, &provided).unwrap();
        assert_eq!(coerced.get("ids"), Some(&serde_json::json!([1, 2, 3])));
    }

    #[test]
    fn enforces_one_of_on_input_object_variables() {
        let schema = build(
            "type Query { hello(filter: Filter): String }
             input Filter @oneOf { byId: ID byName: String }",
        )
        .unwrap();
        let definitions = variable_definitions("query($filter: Filter) { hello(filter: $filter) }");
        let mut provided = IndexMap::new();
        provided.insert("filter".to_owned(), serde_json::json!({"byId": "1", "byName": "a"}));
        assert!(coerce_variable_values(&schema, &definitions, &provided).is_err());
    }

    #[test]
    fn rejects_a_one_of_input_object_whose_only_set_field_is_null() {
        let schema = build(
            "type Query { hello(filter: Filter): String }
             input Filter @oneOf { byId: ID byName: String }",
        )
        .unwrap();
        let definitions = variable_definitions("query($filter: Filter) { hello(filter: $filter) }");
        let mut provided = IndexMap::new();
        provided.insert("filter".to_owned(), serde_json::json!({"byId": null}));
        assert!(coerce_variable_values(&schema, &definitions, &provided).is_err());
    }
}
