//! Folds a type-system [`Document`] into a validated, owned [`Schema`].
//!
//! Mirrors `buildASTSchema`/`extendSchema` from the reference JS
//! implementation: directives first, then named types (merging
//! extensions), then root operation wiring, then built-in
//! scalar/introspection injection, then invariant validation.

use std::collections::HashSet;

use gql_diagnostics::{schema as schema_error, GraphQLError};
use gql_language::ast::{self, Definition, Document};
use gql_language::lex::{tokenize, Source};
use gql_language::parse;
use indexmap::IndexMap;
use multimap::MultiMap;

use crate::argument::{InputValue, InputValueMap};
use crate::directive::{DirectiveLocation, DirectiveType};
use crate::directive_use::DirectiveUse;
use crate::enum_type::{EnumType, EnumValueType};
use crate::field::{Deprecation, FieldMap, FieldType};
use crate::input_object::InputObjectType;
use crate::named_type::NamedType;
use crate::object::{InterfaceType, ObjectType, UnionType};
use crate::scalar::ScalarType;
use crate::scalar_coercion::is_builtin_scalar;
use crate::schema::Schema;
use crate::type_ref::TypeRef;

const BUILTIN_SCALAR_NAMES: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Options controlling how strictly [`build_ast`] treats a malformed
/// type-system document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOptions {
    /// When set, structural SDL errors (duplicate names, dangling type
    /// references, input-object cycles, missing query root, ...) are
    /// collected but don't prevent `build_ast` from returning a (possibly
    /// unsound) `Schema` anyway. Intended for schemas a caller has already
    /// validated out-of-band.
    pub assume_valid_sdl: bool,
}

/// Parses `sdl` and builds a [`Schema`] from it in one step. Equivalent to
/// the public `build_schema` entry point.
pub fn build(sdl: &str) -> Result<Schema, Vec<GraphQLError>> {
    let source = Source::new(sdl);
    let tokens = tokenize(&source.body).map_err(|error| vec![error])?;
    let document = parse(&tokens, &source).map_err(|error| vec![error])?;
    build_ast(&document, BuildOptions::default())
}

/// Builds a [`Schema`] from an already-parsed type-system document.
/// Equivalent to the public `build_ast_schema` entry point.
pub fn build_ast(document: &Document, options: BuildOptions) -> Result<Schema, Vec<GraphQLError>> {
    let mut errors = Vec::new();

    // Step 1: directive definitions.
    let mut directives = IndexMap::new();
    for definition in &document.definitions {
        if let Definition::Directive(directive_def) = definition {
            let name = directive_def.name.value.clone();
            if directives.contains_key(&name) {
                errors.push(schema_error::duplicate_directive(&name));
                continue;
            }
            directives.insert(name, build_directive_type(directive_def));
        }
    }
    for builtin in builtin_directives() {
        directives.entry(builtin.name.clone()).or_insert(builtin);
    }

    // Step 2: named type definitions, with extensions merged.
    let mut types: IndexMap<String, NamedType> = IndexMap::new();
    let mut implementers: MultiMap<String, String> = MultiMap::new();

    for definition in &document.definitions {
        let Some((name, named_type)) = build_named_type(definition) else { continue };
        if types.contains_key(&name) {
            errors.push(schema_error::duplicate_type(&name));
            continue;
        }
        types.insert(name, named_type);
    }

    for definition in &document.definitions {
        apply_extension(definition, &mut types, &mut errors);
    }

    for (name, ty) in &types {
        if let NamedType::Object(object) = ty {
            for interface in &object.interfaces {
                implementers.insert(interface.clone(), name.clone());
            }
        }
    }

    // Step 4: root operation types.
    let schema_def = document.definitions.iter().find_map(|definition| match definition {
        Definition::Schema(schema) => Some(schema),
        _ => None,
    });

    let (query_type, mutation_type, subscription_type) = match schema_def {
        Some(schema_def) => {
            let mut query = None;
            let mut mutation = None;
            let mut subscription = None;
            for root in &schema_def.root_operation_types {
                let name = root.named_type.value.clone();
                match root.operation {
                    ast::OperationType::Query => query = Some(name),
                    ast::OperationType::Mutation => mutation = Some(name),
                    ast::OperationType::Subscription => subscription = Some(name),
                }
            }
            (query, mutation, subscription)
        }
        None => (
            types.contains_key("Query").then(|| "Query".to_owned()),
            types.contains_key("Mutation").then(|| "Mutation".to_owned()),
            types.contains_key("Subscription").then(|| "Subscription".to_owned()),
        ),
    };

    let Some(query_type) = query_type else {
        errors.push(schema_error::missing_query_root());
        if !options.assume_valid_sdl {
            return Err(errors);
        }
        // `assume_valid_sdl` promises `Schema`'s invariants hold without
        // re-checking them; synthesize an empty root rather than recording a
        // dangling `query_type` name `Schema::query_type` could panic on.
        types.entry("Query".to_owned()).or_insert_with(|| NamedType::Object(ObjectType {
            name: "Query".to_owned(),
            description: None,
            interfaces: Vec::new(),
            fields: FieldMap::new(),
            directives: Vec::new(),
        }));
        return Ok(Schema {
            types,
            directives,
            query_type: "Query".to_owned(),
            mutation_type,
            subscription_type,
            implementers,
            description: schema_def.and_then(|s| s.description.as_ref().map(|d| d.value.clone())),
        });
    };

    // Step 5: re-inject built-in scalars used but undeclared, plus the
    // introspection meta-types (always present).
    for name in referenced_type_names(&types) {
        if BUILTIN_SCALAR_NAMES.contains(&name.as_str()) && !types.contains_key(&name) {
            types.insert(name.clone(), NamedType::Scalar(ScalarType {
                name,
                description: None,
                specified_by_url: None,
                directives: Vec::new(),
            }));
        }
    }
    for introspection_type in introspection_types() {
        types.entry(introspection_type.name().to_owned()).or_insert(introspection_type);
    }

    let description = schema_def.and_then(|s| s.description.as_ref().map(|d| d.value.clone()));

    let schema = Schema {
        types,
        directives,
        query_type,
        mutation_type,
        subscription_type,
        implementers,
        description,
    };

    // Step 6: invariant checks.
    validate_invariants(&schema, &mut errors);

    if !errors.is_empty() && !options.assume_valid_sdl {
        return Err(errors);
    }

    Ok(schema)
}

fn validate_invariants(schema: &Schema, errors: &mut Vec<GraphQLError>) {
    for operation_name in ["Query", "Mutation", "Subscription"] {
        let root = match operation_name {
            "Query" => Some(&schema.query_type),
            "Mutation" => schema.mutation_type.as_ref(),
            _ => schema.subscription_type.as_ref(),
        };
        if let Some(root) = root {
            match schema.types.get(root) {
                Some(ty) if ty.is_object_type() => {}
                Some(_) => errors.push(schema_error::root_not_object(operation_name, root)),
                None => errors.push(schema_error::unknown_type(root, &format!("schema {{ {} }}", operation_name))),
            }
        }
    }

    for (name, ty) in &schema.types {
        for referenced in type_references(ty) {
            if !schema.types.contains_key(referenced) {
                errors.push(schema_error::unknown_type(referenced, name));
            }
        }
        if let NamedType::Union(union) = ty {
            for member in &union.members {
                match schema.types.get(member) {
                    Some(NamedType::Object(_)) => {}
                    Some(_) => errors.push(GraphQLError::new(format_args!(
                        "Union type {} can only include object types, it cannot include {}.",
                        name, member
                    ))),
                    None => errors.push(schema_error::unknown_type(member, name)),
                }
            }
        }
    }

    for (name, ty) in &schema.types {
        if let NamedType::InputObject(_) = ty {
            detect_input_cycle(schema, name, &mut Vec::new(), &mut HashSet::new(), errors);
        }
    }
}

/// DFS over input-object field types with a visited (on-stack) set, so an
/// input-object field graph that cycles back on itself is caught rather
/// than recursed into forever.
fn detect_input_cycle(
    schema: &Schema,
    name: &str,
    stack: &mut Vec<String>,
    finished: &mut HashSet<String>,
    errors: &mut Vec<GraphQLError>,
) {
    if finished.contains(name) {
        return;
    }
    if let Some(position) = stack.iter().position(|on_stack| on_stack == name) {
        // Every edge walked below is required (a non-null, non-list field),
        // so reaching an on-stack type at all means it's an unbreakable cycle.
        let mut path = stack[position..].to_vec();
        path.push(name.to_owned());
        errors.push(schema_error::input_cycle(&path));
        return;
    }

    let Some(NamedType::InputObject(input)) = schema.types.get(name) else { return };
    stack.push(name.to_owned());
    for field in input.fields.values() {
        if let TypeRef::NonNull(inner) = &field.ty {
            if !inner.is_list() {
                detect_input_cycle(schema, inner.named_type(), stack, finished, errors);
            }
        }
    }
    stack.pop();
    finished.insert(name.to_owned());
}

fn type_references(ty: &NamedType) -> Vec<&str> {
    let mut names = Vec::new();
    match ty {
        NamedType::Object(object) => {
            names.extend(object.interfaces.iter().map(String::as_str));
            for field in object.fields.values() {
                names.push(field.ty.named_type());
                names.extend(field.args.values().map(|arg| arg.ty.named_type()));
            }
        }
        NamedType::Interface(interface) => {
            names.extend(interface.interfaces.iter().map(String::as_str));
            for field in interface.fields.values() {
                names.push(field.ty.named_type());
                names.extend(field.args.values().map(|arg| arg.ty.named_type()));
            }
        }
        NamedType::InputObject(input) => {
            names.extend(input.fields.values().map(|field| field.ty.named_type()));
        }
        NamedType::Union(_) | NamedType::Scalar(_) | NamedType::Enum(_) => {}
    }
    names
}

fn referenced_type_names(types: &IndexMap<String, NamedType>) -> Vec<String> {
    types.values().flat_map(type_references).map(str::to_owned).collect()
}

fn build_named_type(definition: &Definition) -> Option<(String, NamedType)> {
    match definition {
        Definition::ScalarType(def) => Some((
            def.name.value.clone(),
            NamedType::Scalar(ScalarType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                specified_by_url: directive_uses(&def.directives)
                    .iter()
                    .find(|d| d.name == "specifiedBy")
                    .and_then(|d| d.argument("url"))
                    .and_then(string_value),
                directives: directive_uses(&def.directives),
            }),
        )),
        Definition::ObjectType(def) => Some((
            def.name.value.clone(),
            NamedType::Object(ObjectType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                interfaces: def.implements_interfaces.iter().map(|name| name.value.clone()).collect(),
                fields: build_field_map(&def.fields),
                directives: directive_uses(&def.directives),
            }),
        )),
        Definition::InterfaceType(def) => Some((
            def.name.value.clone(),
            NamedType::Interface(InterfaceType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                interfaces: def.implements_interfaces.iter().map(|name| name.value.clone()).collect(),
                fields: build_field_map(&def.fields),
                directives: directive_uses(&def.directives),
            }),
        )),
        Definition::UnionType(def) => Some((
            def.name.value.clone(),
            NamedType::Union(UnionType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                members: def.member_types.iter().map(|name| name.value.clone()).collect(),
                directives: directive_uses(&def.directives),
            }),
        )),
        Definition::EnumType(def) => Some((
            def.name.value.clone(),
            NamedType::Enum(EnumType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                values: def
                    .values
                    .iter()
                    .map(|value| (value.value.value.clone(), build_enum_value(value)))
                    .collect(),
                directives: directive_uses(&def.directives),
            }),
        )),
        Definition::InputObjectType(def) => Some((
            def.name.value.clone(),
            NamedType::InputObject(InputObjectType {
                name: def.name.value.clone(),
                description: description_of(&def.description),
                fields: build_input_value_map(&def.fields),
                directives: directive_uses(&def.directives),
                is_one_of: directive_uses(&def.directives).iter().any(|d| d.name == "oneOf"),
            }),
        )),
        _ => None,
    }
}

fn apply_extension(definition: &Definition, types: &mut IndexMap<String, NamedType>, errors: &mut Vec<GraphQLError>) {
    macro_rules! extend_fields {
        ($name:expr, $variant:ident, $new_fields:expr, $new_directives:expr, $new_interfaces:expr) => {
            match types.get_mut($name) {
                Some(NamedType::$variant(ty)) => {
                    for field in $new_fields {
                        ty.fields.insert(field.name.value.clone(), build_field_type(field));
                    }
                    ty.directives.extend($new_directives);
                    ty.interfaces.extend($new_interfaces);
                }
                _ => errors.push(schema_error::unknown_type($name, "extend")),
            }
        };
    }

    match definition {
        Definition::ObjectTypeExtension(ext) => extend_fields!(
            &ext.name.value,
            Object,
            &ext.fields,
            directive_uses(&ext.directives),
            ext.implements_interfaces.iter().map(|name| name.value.clone())
        ),
        Definition::InterfaceTypeExtension(ext) => extend_fields!(
            &ext.name.value,
            Interface,
            &ext.fields,
            directive_uses(&ext.directives),
            ext.implements_interfaces.iter().map(|name| name.value.clone())
        ),
        Definition::InputObjectTypeExtension(ext) => match types.get_mut(&ext.name.value) {
            Some(NamedType::InputObject(ty)) => {
                for field in &ext.fields {
                    ty.fields.insert(field.name.value.clone(), build_input_value(field));
                }
                ty.directives.extend(directive_uses(&ext.directives));
            }
            _ => errors.push(schema_error::unknown_type(&ext.name.value, "extend")),
        },
        Definition::EnumTypeExtension(ext) => match types.get_mut(&ext.name.value) {
            Some(NamedType::Enum(ty)) => {
                for value in &ext.values {
                    ty.values.insert(value.value.value.clone(), build_enum_value(value));
                }
                ty.directives.extend(directive_uses(&ext.directives));
            }
            _ => errors.push(schema_error::unknown_type(&ext.name.value, "extend")),
        },
        Definition::UnionTypeExtension(ext) => match types.get_mut(&ext.name.value) {
            Some(NamedType::Union(ty)) => {
                ty.members.extend(ext.member_types.iter().map(|name| name.value.clone()));
                ty.directives.extend(directive_uses(&ext.directives));
            }
            _ => errors.push(schema_error::unknown_type(&ext.name.value, "extend")),
        },
        Definition::ScalarTypeExtension(ext) => match types.get_mut(&ext.name.value) {
            Some(NamedType::Scalar(ty)) => ty.directives.extend(directive_uses(&ext.directives)),
            _ => errors.push(schema_error::unknown_type(&ext.name.value, "extend")),
        },
        _ => {}
    }
}

fn build_field_map(fields: &[ast::FieldDefinition]) -> FieldMap {
    fields.iter().map(|field| (field.name.value.clone(), build_field_type(field))).collect()
}

fn build_field_type(field: &ast::FieldDefinition) -> FieldType {
    let directives = directive_uses(&field.directives);
    FieldType {
        name: field.name.value.clone(),
        description: description_of(&field.description),
        args: build_input_value_map(&field.arguments),
        ty: TypeRef::from_ast(&field.ty),
        deprecation: deprecation_of(&directives),
        directives,
    }
}

fn build_input_value_map(values: &[ast::InputValueDefinition]) -> InputValueMap {
    values.iter().map(|value| (value.name.value.clone(), build_input_value(value))).collect()
}

fn build_input_value(value: &ast::InputValueDefinition) -> InputValue {
    InputValue {
        name: value.name.value.clone(),
        description: description_of(&value.description),
        ty: TypeRef::from_ast(&value.ty),
        default_value: value.default_value.clone(),
        directives: directive_uses(&value.directives),
    }
}

fn build_enum_value(value: &ast::EnumValueDefinition) -> EnumValueType {
    let directives = directive_uses(&value.directives);
    EnumValueType {
        name: value.value.value.clone(),
        description: description_of(&value.description),
        deprecation: deprecation_of(&directives),
        directives,
    }
}

fn build_directive_type(def: &ast::DirectiveDefinition) -> DirectiveType {
    DirectiveType {
        name: def.name.value.clone(),
        description: description_of(&def.description),
        args: build_input_value_map(&def.arguments),
        locations: def.locations.iter().filter_map(|name| DirectiveLocation::from_name(&name.value)).collect(),
        is_repeatable: def.repeatable,
    }
}

fn directive_uses(directives: &[ast::Directive]) -> Vec<DirectiveUse> {
    directives
        .iter()
        .map(|directive| DirectiveUse {
            name: directive.name.value.clone(),
            arguments: directive.arguments.iter().map(|arg| (arg.name.value.clone(), arg.value.clone())).collect(),
        })
        .collect()
}

fn deprecation_of(directives: &[DirectiveUse]) -> Option<Deprecation> {
    directives.iter().find(|d| d.name == "deprecated").map(|d| Deprecation {
        reason: d
            .argument("reason")
            .and_then(string_value)
            .unwrap_or_else(|| "No longer supported".to_owned()),
    })
}

fn string_value(value: &ast::Value) -> Option<String> {
    match value {
        ast::Value::String(string) => Some(string.value.clone()),
        _ => None,
    }
}

fn description_of(description: &Option<ast::Description>) -> Option<String> {
    description.as_ref().map(|description| description.value.clone())
}

fn builtin_directives() -> Vec<DirectiveType> {
    use DirectiveLocation::*;

    let if_arg = |description: &str| {
        let mut map = InputValueMap::new();
        map.insert(
            "if".to_owned(),
            InputValue {
                name: "if".to_owned(),
                description: Some(description.to_owned()),
                ty: TypeRef::NonNull(Box::new(TypeRef::Named("Boolean".to_owned()))),
                default_value: None,
                directives: Vec::new(),
            },
        );
        map
    };

    vec![
        DirectiveType {
            name: "skip".to_owned(),
            description: Some("Directs the executor to skip this field or fragment when the `if` argument is true.".to_owned()),
            args: if_arg("Skipped when true."),
            locations: vec![Field, FragmentSpread, InlineFragment],
            is_repeatable: false,
        },
        DirectiveType {
            name: "include".to_owned(),
            description: Some("Directs the executor to include this field or fragment only when the `if` argument is true.".to_owned()),
            args: if_arg("Included when true."),
            locations: vec![Field, FragmentSpread, InlineFragment],
            is_repeatable: false,
        },
        DirectiveType {
            name: "deprecated".to_owned(),
            description: Some("Marks an element of a GraphQL schema as no longer supported.".to_owned()),
            args: {
                let mut map = InputValueMap::new();
                map.insert(
                    "reason".to_owned(),
                    InputValue {
                        name: "reason".to_owned(),
                        description: Some("Explains why this element was deprecated.".to_owned()),
                        ty: TypeRef::Named("String".to_owned()),
                        default_value: Some(ast::Value::String(ast::StringValue {
                            span: None,
                            value: "No longer supported".to_owned(),
                            block: false,
                        })),
                        directives: Vec::new(),
                    },
                );
                map
            },
            locations: vec![FieldDefinition, ArgumentDefinition, InputFieldDefinition, Enum, EnumValue],
            is_repeatable: false,
        },
        DirectiveType {
            name: "specifiedBy".to_owned(),
            description: Some("Exposes a URL that specifies the behavior of this scalar.".to_owned()),
            args: {
                let mut map = InputValueMap::new();
                map.insert(
                    "url".to_owned(),
                    InputValue {
                        name: "url".to_owned(),
                        description: Some("The URL that specifies the behavior of this scalar.".to_owned()),
                        ty: TypeRef::NonNull(Box::new(TypeRef::Named("String".to_owned()))),
                        default_value: None,
                        directives: Vec::new(),
                    },
                );
                map
            },
            locations: vec![Scalar],
            is_repeatable: false,
        },
        DirectiveType {
            name: "oneOf".to_owned(),
            description: Some("Indicates an input object is a oneOf input object.".to_owned()),
            args: InputValueMap::new(),
            locations: vec![InputObject],
            is_repeatable: false,
        },
    ]
}

pub(crate) fn is_builtin_directive(name: &str) -> bool {
    matches!(name, "skip" | "include" | "deprecated" | "specifiedBy" | "oneOf")
}

/// The built-in introspection meta-types (`__Schema`, `__Type`, ...), always
/// present regardless of whether the SDL text mentions them. Written as SDL
/// and run through [`build_named_type`] rather than hand-assembled, so the
/// same field/argument construction code path the rest of this module uses
/// stays the single source of truth.
const INTROSPECTION_SDL: &str = "
    type __Schema {
      description: String
      types: [__Type!]!
      queryType: __Type!
      mutationType: __Type
      subscriptionType: __Type
      directives: [__Directive!]!
    }

    type __Type {
      kind: __TypeKind!
      name: String
      description: String
      specifiedByURL: String
      fields(includeDeprecated: Boolean = false): [__Field!]
      interfaces: [__Type!]
      possibleTypes: [__Type!]
      enumValues(includeDeprecated: Boolean = false): [__EnumValue!]
      inputFields(includeDeprecated: Boolean = false): [__InputValue!]
      ofType: __Type
      isOneOf: Boolean
    }

    type __Field {
      name: String!
      description: String
      args(includeDeprecated: Boolean = false): [__InputValue!]!
      type: __Type!
      isDeprecated: Boolean!
      deprecationReason: String
    }

    type __InputValue {
      name: String!
      description: String
      type: __Type!
      defaultValue: String
      isDeprecated: Boolean!
      deprecationReason: String
    }

    type __EnumValue {
      name: String!
      description: String
      isDeprecated: Boolean!
      deprecationReason: String
    }

    enum __TypeKind {
      SCALAR
      OBJECT
      INTERFACE
      UNION
      ENUM
      INPUT_OBJECT
      LIST
      NON_NULL
    }

    type __Directive {
      name: String!
      description: String
      locations: [__DirectiveLocation!]!
      args(includeDeprecated: Boolean = false): [__InputValue!]!
      isRepeatable: Boolean!
    }

    enum __DirectiveLocation {
      QUERY
      MUTATION
      SUBSCRIPTION
      FIELD
      FRAGMENT_DEFINITION
      FRAGMENT_SPREAD
      INLINE_FRAGMENT
      VARIABLE_DEFINITION
      SCHEMA
      SCALAR
      OBJECT
      FIELD_DEFINITION
      ARGUMENT_DEFINITION
      INTERFACE
      UNION
      ENUM
      ENUM_VALUE
      INPUT_OBJECT
      INPUT_FIELD_DEFINITION
    }
";

fn introspection_types() -> Vec<NamedType> {
    let source = Source::new(INTROSPECTION_SDL);
    let Ok(tokens) = tokenize(&source.body) else { return Vec::new() };
    let Ok(document) = parse(&tokens, &source) else { return Vec::new() };
    document.definitions.iter().filter_map(build_named_type).map(|(_, ty)| ty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_minimal_schema() {
        let schema = build("type Query { hello: String }").unwrap();
        assert_eq!(schema.query_type().name(), "Query");
        assert!(is_builtin_scalar("String"));
        assert!(schema.ty("String").is_some());
    }

    #[test]
    fn merges_type_extensions() {
        let schema = build(
            "type Query { hello: String }
             extend type Query { world: String }",
        )
        .unwrap();
        let fields = schema.query_type().fields().unwrap();
        assert!(fields.contains_key("hello"));
        assert!(fields.contains_key("world"));
    }

    #[test]
    fn rejects_a_self_referential_input_object() {
        let errors = build("type Query { hello: String } input Foo { self: Foo! }").unwrap_err();
        assert!(errors.iter().any(|error| error.message.contains("cycle")));
    }

    #[test]
    fn carries_the_built_in_directives_even_when_undeclared() {
        let schema = build("type Query { hello: String }").unwrap();
        assert!(schema.directive("skip").is_some());
        assert!(schema.directive("deprecated").is_some());
        assert!(schema.directive("oneOf").is_some());
    }

    #[test]
    fn reports_a_missing_query_root() {
        let errors = build("type Foo { bar: String }").unwrap_err();
        assert!(errors.iter().any(|error| error.message.contains("query root")));
    }
}
