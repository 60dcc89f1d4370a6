//! Executes a selection set against an introspection [`Node`], answering
//! one field at a time, synchronously and without a host resolver in the
//! loop: every value an introspection query can ask for is already sitting
//! on the [`Schema`] this module borrows from.

use gql_language::ast::{Directive, Document, Field, Selection, SelectionSet, Value as AstValue};
use gql_types::{NamedType, Schema};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use crate::node::{deprecation_of_directives, Node, TypeWrap};

/// Resolves `__schema`'s value and renders `selection_set` against it.
pub fn schema_value<'a>(schema: &'a Schema) -> Node<'a> {
    Node::Schema(schema)
}

/// Resolves `__type(name: ...)`'s value, `Node::Leaf(Null)` if `name` names
/// no type in the schema.
pub fn type_value<'a>(schema: &'a Schema, name: &str) -> Node<'a> {
    schema.ty(name).map(|ty| Node::Type(TypeWrap::Named(ty))).unwrap_or(Node::Leaf(JsonValue::Null))
}

/// Renders `node`'s selection set (or the bare leaf value, if `node` carries
/// no further sub-fields) to a JSON value, evaluating `@skip`/`@include` and
/// expanding fragments along the way.
pub fn render<'a>(
    node: Node<'a>,
    selection_set: Option<&SelectionSet>,
    document: &Document,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
) -> JsonValue {
    match node {
        Node::Leaf(value) => value,
        Node::List(items) => {
            JsonValue::Array(items.into_iter().map(|item| render(item, selection_set, document, variables, schema)).collect())
        }
        composite => match selection_set {
            Some(selection_set) => {
                let mut out = IndexMap::new();
                let mut visited = HashSet::new();
                walk_selection_set(&composite, selection_set, document, variables, schema, &mut out, &mut visited);
                JsonValue::Object(out.into_iter().collect())
            }
            None => JsonValue::Null,
        },
    }
}

fn walk_selection_set<'a>(
    node: &Node<'a>,
    selection_set: &SelectionSet,
    document: &Document,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
    out: &mut IndexMap<String, JsonValue>,
    visited_fragments: &mut HashSet<String>,
) {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                if is_skipped(&field.directives, variables) {
                    continue;
                }
                if field.name.value == "__typename" {
                    out.insert(field.response_key().to_owned(), JsonValue::String(node.typename().to_owned()));
                    continue;
                }
                let value = resolve_field(node, &field.name.value, field, variables, schema);
                let rendered = render(value, field.selection_set.as_ref(), document, variables, schema);
                out.insert(field.response_key().to_owned(), rendered);
            }
            Selection::FragmentSpread(spread) => {
                if is_skipped(&spread.directives, variables) {
                    continue;
                }
                if !visited_fragments.insert(spread.fragment_name.value.clone()) {
                    continue;
                }
                if let Some(fragment) = document.fragment(&spread.fragment_name.value) {
                    if fragment.type_condition.value == node.typename() {
                        walk_selection_set(node, &fragment.selection_set, document, variables, schema, out, visited_fragments);
                    }
                }
            }
            Selection::InlineFragment(inline) => {
                if is_skipped(&inline.directives, variables) {
                    continue;
                }
                let matches =
                    inline.type_condition.as_ref().map_or(true, |condition| condition.value == node.typename());
                if matches {
                    walk_selection_set(node, &inline.selection_set, document, variables, schema, out, visited_fragments);
                }
            }
        }
    }
}

fn is_skipped(directives: &[Directive], variables: &IndexMap<String, JsonValue>) -> bool {
    for directive in directives {
        let Some(if_value) = directive.argument("if") else { continue };
        let skip_if = argument_to_json(if_value, variables).as_bool().unwrap_or(false);
        match directive.name.value.as_str() {
            "skip" if skip_if => return true,
            "include" if !skip_if => return true,
            _ => {}
        }
    }
    false
}

fn argument_to_json(value: &AstValue, variables: &IndexMap<String, JsonValue>) -> JsonValue {
    match value {
        AstValue::Variable(variable) => variables.get(&variable.name.value).cloned().unwrap_or(JsonValue::Null),
        AstValue::List(list) => JsonValue::Array(list.values.iter().map(|v| argument_to_json(v, variables)).collect()),
        AstValue::Object(object) => {
            let mut map = serde_json::Map::new();
            for field in &object.fields {
                map.insert(field.name.value.clone(), argument_to_json(&field.value, variables));
            }
            JsonValue::Object(map)
        }
        other => gql_types::literal_to_json(other),
    }
}

fn bool_argument(field: &Field, name: &str, variables: &IndexMap<String, JsonValue>, default: bool) -> bool {
    field
        .arguments
        .iter()
        .find(|argument| argument.name.value == name)
        .map(|argument| argument_to_json(&argument.value, variables).as_bool().unwrap_or(default))
        .unwrap_or(default)
}

/// Looks up a string-valued field argument, substituting variables — used
/// by callers dispatching the `__type(name: ...)` root field.
pub fn string_argument(field: &Field, name: &str, variables: &IndexMap<String, JsonValue>) -> Option<String> {
    field
        .arguments
        .iter()
        .find(|argument| argument.name.value == name)
        .and_then(|argument| argument_to_json(&argument.value, variables).as_str().map(str::to_owned))
}

fn leaf_opt_string(value: Option<String>) -> Node<'static> {
    Node::Leaf(value.map(JsonValue::String).unwrap_or(JsonValue::Null))
}

fn resolve_field<'a>(
    node: &Node<'a>,
    field_name: &str,
    field: &Field,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
) -> Node<'a> {
    match node {
        Node::Schema(schema) => resolve_schema_field(schema, field_name),
        Node::Type(wrap) => resolve_type_field(wrap, field_name, field, variables, schema),
        Node::Field(_, field_type, schema) => resolve_field_type_field(field_type, field_name, field, variables, schema),
        Node::InputValue(_, input_value, schema) => resolve_input_value_field(input_value, field_name, schema),
        Node::EnumValue(_, enum_value) => resolve_enum_value_field(enum_value, field_name),
        Node::Directive(directive, schema) => resolve_directive_field(directive, field_name, field, variables, schema),
        Node::List(_) | Node::Leaf(_) => Node::Leaf(JsonValue::Null),
    }
}

fn resolve_schema_field<'a>(schema: &'a Schema, field_name: &str) -> Node<'a> {
    match field_name {
        "description" => leaf_opt_string(schema.description.clone()),
        "types" => Node::List(schema.types().map(|ty| Node::Type(TypeWrap::Named(ty))).collect()),
        "queryType" => Node::Type(TypeWrap::Named(schema.query_type())),
        "mutationType" => schema.mutation_type().map(|ty| Node::Type(TypeWrap::Named(ty))).unwrap_or(Node::Leaf(JsonValue::Null)),
        "subscriptionType" => {
            schema.subscription_type().map(|ty| Node::Type(TypeWrap::Named(ty))).unwrap_or(Node::Leaf(JsonValue::Null))
        }
        "directives" => Node::List(schema.directives().map(|directive| Node::Directive(directive, schema)).collect()),
        _ => Node::Leaf(JsonValue::Null),
    }
}

fn kind_name(wrap: &TypeWrap) -> &'static str {
    match wrap {
        TypeWrap::List(_) => "LIST",
        TypeWrap::NonNull(_) => "NON_NULL",
        TypeWrap::Named(NamedType::Scalar(_)) => "SCALAR",
        TypeWrap::Named(NamedType::Object(_)) => "OBJECT",
        TypeWrap::Named(NamedType::Interface(_)) => "INTERFACE",
        TypeWrap::Named(NamedType::Union(_)) => "UNION",
        TypeWrap::Named(NamedType::Enum(_)) => "ENUM",
        TypeWrap::Named(NamedType::InputObject(_)) => "INPUT_OBJECT",
    }
}

fn input_value_nodes<'a>(
    fields: &'a gql_types::InputValueMap,
    include_deprecated: bool,
    schema: &'a Schema,
) -> Vec<Node<'a>> {
    fields
        .iter()
        .filter(|(_, input_value)| include_deprecated || !deprecation_of_directives(&input_value.directives).0)
        .map(|(name, input_value)| Node::InputValue(name, input_value, schema))
        .collect()
}

fn resolve_type_field<'a>(
    wrap: &TypeWrap<'a>,
    field_name: &str,
    field: &Field,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
) -> Node<'a> {
    match field_name {
        "kind" => Node::Leaf(JsonValue::String(kind_name(wrap).to_owned())),
        "name" => match wrap {
            TypeWrap::Named(ty) => leaf_opt_string(Some(ty.name().to_owned())),
            _ => Node::Leaf(JsonValue::Null),
        },
        "description" => match wrap {
            TypeWrap::Named(ty) => leaf_opt_string(ty.description().map(str::to_owned)),
            _ => Node::Leaf(JsonValue::Null),
        },
        "specifiedByURL" => match wrap {
            TypeWrap::Named(NamedType::Scalar(scalar)) => leaf_opt_string(scalar.specified_by_url.clone()),
            _ => Node::Leaf(JsonValue::Null),
        },
        "fields" => {
            let include_deprecated = bool_argument(field, "includeDeprecated", variables, false);
            match wrap {
                TypeWrap::Named(ty @ (NamedType::Object(_) | NamedType::Interface(_))) => Node::List(
                    ty.fields()
                        .expect("object/interface types carry a field map")
                        .iter()
                        .filter(|(_, field_type)| include_deprecated || field_type.deprecation.is_none())
                        .map(|(name, field_type)| Node::Field(name, field_type, schema))
                        .collect(),
                ),
                _ => Node::Leaf(JsonValue::Null),
            }
        }
        "interfaces" => match wrap {
            TypeWrap::Named(NamedType::Object(object)) => {
                Node::List(object.interfaces.iter().filter_map(|name| schema.ty(name)).map(|ty| Node::Type(TypeWrap::Named(ty))).collect())
            }
            TypeWrap::Named(NamedType::Interface(interface)) => Node::List(
                interface.interfaces.iter().filter_map(|name| schema.ty(name)).map(|ty| Node::Type(TypeWrap::Named(ty))).collect(),
            ),
            _ => Node::Leaf(JsonValue::Null),
        },
        "possibleTypes" => match wrap {
            TypeWrap::Named(NamedType::Union(union)) => Node::List(
                schema.possible_types(&union.name).into_iter().filter_map(|object| schema.ty(&object.name)).map(|ty| Node::Type(TypeWrap::Named(ty))).collect(),
            ),
            TypeWrap::Named(NamedType::Interface(interface)) => Node::List(
                schema
                    .possible_types(&interface.name)
                    .into_iter()
                    .filter_map(|object| schema.ty(&object.name))
                    .map(|ty| Node::Type(TypeWrap::Named(ty)))
                    .collect(),
            ),
            _ => Node::Leaf(JsonValue::Null),
        },
        "enumValues" => {
            let include_deprecated = bool_argument(field, "includeDeprecated", variables, false);
            match wrap {
                TypeWrap::Named(NamedType::Enum(r#enum)) => Node::List(
                    r#enum
                        .values
                        .iter()
                        .filter(|(_, value)| include_deprecated || value.deprecation.is_none())
                        .map(|(name, value)| Node::EnumValue(name, value))
                        .collect(),
                ),
                _ => Node::Leaf(JsonValue::Null),
            }
        }
        "inputFields" => {
            let include_deprecated = bool_argument(field, "includeDeprecated", variables, false);
            match wrap {
                TypeWrap::Named(NamedType::InputObject(input_object)) => {
                    Node::List(input_value_nodes(&input_object.fields, include_deprecated, schema))
                }
                _ => Node::Leaf(JsonValue::Null),
            }
        }
        "ofType" => match wrap {
            TypeWrap::List(inner) | TypeWrap::NonNull(inner) => Node::Type((**inner).clone()),
            TypeWrap::Named(_) => Node::Leaf(JsonValue::Null),
        },
        "isOneOf" => match wrap {
            TypeWrap::Named(NamedType::InputObject(input_object)) => Node::Leaf(JsonValue::Bool(input_object.is_one_of)),
            _ => Node::Leaf(JsonValue::Null),
        },
        _ => Node::Leaf(JsonValue::Null),
    }
}

fn resolve_field_type_field<'a>(
    field_type: &'a gql_types::FieldType,
    field_name: &str,
    field: &Field,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
) -> Node<'a> {
    match field_name {
        "name" => Node::Leaf(JsonValue::String(field_type.name.clone())),
        "description" => leaf_opt_string(field_type.description.clone()),
        "args" => {
            let include_deprecated = bool_argument(field, "includeDeprecated", variables, false);
            Node::List(input_value_nodes(&field_type.args, include_deprecated, schema))
        }
        "type" => TypeWrap::from_type_ref(schema, &field_type.ty).map(Node::Type).unwrap_or(Node::Leaf(JsonValue::Null)),
        "isDeprecated" => Node::Leaf(JsonValue::Bool(field_type.deprecation.is_some())),
        "deprecationReason" => leaf_opt_string(field_type.deprecation.as_ref().map(|d| d.reason.clone())),
        _ => Node::Leaf(JsonValue::Null),
    }
}

fn resolve_input_value_field<'a>(input_value: &'a gql_types::InputValue, field_name: &str, schema: &'a Schema) -> Node<'a> {
    let (is_deprecated, reason) = deprecation_of_directives(&input_value.directives);
    match field_name {
        "name" => Node::Leaf(JsonValue::String(input_value.name.clone())),
        "description" => leaf_opt_string(input_value.description.clone()),
        "type" => TypeWrap::from_type_ref(schema, &input_value.ty).map(Node::Type).unwrap_or(Node::Leaf(JsonValue::Null)),
        "defaultValue" => leaf_opt_string(input_value.default_value.as_ref().map(gql_language::print::print_value)),
        "isDeprecated" => Node::Leaf(JsonValue::Bool(is_deprecated)),
        "deprecationReason" => leaf_opt_string(reason),
        _ => Node::Leaf(JsonValue::Null),
    }
}

fn resolve_enum_value_field<'a>(enum_value: &'a gql_types::EnumValueType, field_name: &str) -> Node<'a> {
    match field_name {
        "name" => Node::Leaf(JsonValue::String(enum_value.name.clone())),
        "description" => leaf_opt_string(enum_value.description.clone()),
        "isDeprecated" => Node::Leaf(JsonValue::Bool(enum_value.deprecation.is_some())),
        "deprecationReason" => leaf_opt_string(enum_value.deprecation.as_ref().map(|d| d.reason.clone())),
        _ => Node::Leaf(JsonValue::Null),
    }
}

fn resolve_directive_field<'a>(
    directive: &'a gql_types::DirectiveType,
    field_name: &str,
    field: &Field,
    variables: &IndexMap<String, JsonValue>,
    schema: &'a Schema,
) -> Node<'a> {
    match field_name {
        "name" => Node::Leaf(JsonValue::String(directive.name.clone())),
        "description" => leaf_opt_string(directive.description.clone()),
        "locations" => Node::Leaf(JsonValue::Array(
            directive.locations.iter().map(|location| JsonValue::String(location.name().to_owned())).collect(),
        )),
        "args" => {
            let include_deprecated = bool_argument(field, "includeDeprecated", variables, false);
            Node::List(input_value_nodes(&directive.args, include_deprecated, schema))
        }
        "isRepeatable" => Node::Leaf(JsonValue::Bool(directive.is_repeatable)),
        _ => Node::Leaf(JsonValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_language::syn::parse;
    use gql_language::lex::{tokenize, Source};
    use gql_types::build;
    use unindent::unindent;

    fn parse_document(source: &str) -> Document {
        let source = Source::new(source);
        let tokens = tokenize(&source.body).unwrap();
        parse(&tokens, &source).unwrap()
    }

    #[test]
    fn schema_query_type_round_trips_through_selection() {
        let schema = build("type Query { hello: String }").unwrap();
        let document = parse_document("{ __typename }");
        let variables = IndexMap::new();
        let op = document.operations().next().unwrap();
        let value = render(
            schema_value(&schema),
            Some(&parse_document("{ queryType { name } }").operations().next().unwrap().selection_set),
            &document,
            &variables,
            &schema,
        );
        assert_eq!(value["queryType"]["name"], JsonValue::String("Query".to_owned()));
        let _ = op;
    }

    #[test]
    fn deprecated_fields_are_hidden_unless_requested() {
        let schema = build(
            &unindent(
                "
                type Query {
                  hello: String
                  bye: String @deprecated(reason: \"unused\")
                }
                ",
            ),
        )
        .unwrap();
        let document = parse_document(
            "{ fields { name } withDeprecated: fields(includeDeprecated: true) { name } }",
        );
        let variables = IndexMap::new();
        let operation = document.operations().next().unwrap();
        let value = render(type_value(&schema, "Query"), Some(&operation.selection_set), &document, &variables, &schema);
        let names: Vec<&str> = value["fields"].as_array().unwrap().iter().map(|v| v["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["hello"]);
        let all_names: Vec<&str> = value["withDeprecated"].as_array().unwrap().iter().map(|v| v["name"].as_str().unwrap()).collect();
        assert_eq!(all_names, vec!["hello", "bye"]);
    }

    #[test]
    fn type_value_is_null_for_unknown_name() {
        let schema = build("type Query { hello: String }").unwrap();
        assert!(matches!(type_value(&schema, "DoesNotExist"), Node::Leaf(JsonValue::Null)));
    }
}
