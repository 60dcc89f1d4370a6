//! Renders a built [`Schema`] back to SDL text, the inverse of
//! [`crate::builder::build`]. Works by reconstructing the
//! `gql_language::ast::Document` the schema was conceptually built from and
//! handing it to `gql_language`'s own canonical printer, rather than
//! formatting strings directly, so schema and executable documents share
//! one printer.

use gql_language::ast::{
    Definition, Description, Directive, Document, EnumTypeDefinition, EnumValueDefinition, FieldDefinition,
    InputObjectTypeDefinition, InputValueDefinition, InterfaceTypeDefinition, Name, ObjectTypeDefinition,
    OperationType, OperationTypeDefinition, ScalarTypeDefinition, SchemaDefinition, Type as AstType,
    UnionTypeDefinition, Value,
};

use crate::directive_use::DirectiveUse;
use crate::named_type::NamedType;
use crate::scalar_coercion::is_builtin_scalar;
use crate::schema::Schema;
use crate::type_ref::TypeRef;

/// The five directives every schema carries implicitly (`@skip`,
/// `@include`, `@deprecated`, `@specifiedBy`, `@oneOf`); printing these back
/// out alongside user directives would just echo their own built-in
/// definitions, so they're skipped the way graphql-js's `printSchema` skips
/// them. An approximation: a user-defined directive that happens to reuse
/// one of these names is skipped too.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Prints `schema` as an SDL document: every user-defined type and
/// directive, in the order the schema holds them. Built-in scalars and the
/// `__`-prefixed introspection meta-types are omitted, matching how they're
/// never written out by hand in the first place.
pub fn print_schema(schema: &Schema) -> String {
    let mut definitions = Vec::new();

    if let Some(schema_definition) = schema_definition(schema) {
        definitions.push(Definition::Schema(schema_definition));
    }

    for directive in schema.directives() {
        if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
            continue;
        }
        definitions.push(Definition::Directive(gql_language::ast::DirectiveDefinition {
            span: None,
            description: description(&None),
            name: name(&directive.name),
            arguments: directive.args.iter().map(|(_, input_value)| input_value_definition(input_value)).collect(),
            repeatable: directive.is_repeatable,
            locations: directive.locations.iter().map(|location| name(location.name())).collect(),
        }));
    }

    for ty in schema.types() {
        if ty.name().starts_with("__") {
            continue;
        }
        if let NamedType::Scalar(scalar) = ty {
            if is_builtin_scalar(&scalar.name) {
                continue;
            }
        }
        definitions.push(type_definition(ty));
    }

    gql_language::print::print(&Document { span: None, definitions })
}

/// Whether a schema's root types are named by convention (`Query`,
/// `Mutation`, `Subscription`) so a `schema { ... }` block would be
/// redundant, matching graphql-js's own `printSchema` heuristic.
fn root_types_are_conventional(schema: &Schema) -> bool {
    schema.query_type().name() == "Query"
        && schema.mutation_type().map_or(true, |ty| ty.name() == "Mutation")
        && schema.subscription_type().map_or(true, |ty| ty.name() == "Subscription")
}

fn schema_definition(schema: &Schema) -> Option<SchemaDefinition> {
    if schema.description.is_none() && root_types_are_conventional(schema) {
        return None;
    }

    let mut root_operation_types = vec![OperationTypeDefinition {
        span: None,
        operation: OperationType::Query,
        named_type: name(schema.query_type().name()),
    }];
    if let Some(mutation_type) = schema.mutation_type() {
        root_operation_types.push(OperationTypeDefinition {
            span: None,
            operation: OperationType::Mutation,
            named_type: name(mutation_type.name()),
        });
    }
    if let Some(subscription_type) = schema.subscription_type() {
        root_operation_types.push(OperationTypeDefinition {
            span: None,
            operation: OperationType::Subscription,
            named_type: name(subscription_type.name()),
        });
    }

    Some(SchemaDefinition {
        span: None,
        description: description(&schema.description),
        directives: Vec::new(),
        root_operation_types,
    })
}

fn type_definition(ty: &NamedType) -> Definition {
    match ty {
        NamedType::Scalar(scalar) => Definition::ScalarType(ScalarTypeDefinition {
            span: None,
            description: description(&scalar.description),
            name: name(&scalar.name),
            directives: directive_uses(&scalar.directives),
        }),
        NamedType::Object(object) => Definition::ObjectType(ObjectTypeDefinition {
            span: None,
            description: description(&object.description),
            name: name(&object.name),
            implements_interfaces: object.interfaces.iter().map(|n| name(n)).collect(),
            directives: directive_uses(&object.directives),
            fields: object.fields.iter().map(|(_, field)| field_definition(field)).collect(),
        }),
        NamedType::Interface(interface) => Definition::InterfaceType(InterfaceTypeDefinition {
            span: None,
            description: description(&interface.description),
            name: name(&interface.name),
            implements_interfaces: interface.interfaces.iter().map(|n| name(n)).collect(),
            directives: directive_uses(&interface.directives),
            fields: interface.fields.iter().map(|(_, field)| field_definition(field)).collect(),
        }),
        NamedType::Union(union) => Definition::UnionType(UnionTypeDefinition {
            span: None,
            description: description(&union.description),
            name: name(&union.name),
            directives: directive_uses(&union.directives),
            member_types: union.members.iter().map(|n| name(n)).collect(),
        }),
        NamedType::Enum(r#enum) => Definition::EnumType(EnumTypeDefinition {
            span: None,
            description: description(&r#enum.description),
            name: name(&r#enum.name),
            directives: directive_uses(&r#enum.directives),
            values: r#enum
                .values
                .iter()
                .map(|(_, value)| EnumValueDefinition {
                    span: None,
                    description: description(&value.description),
                    value: name(&value.name),
                    directives: directive_uses(&value.directives),
                })
                .collect(),
        }),
        NamedType::InputObject(input_object) => Definition::InputObjectType(InputObjectTypeDefinition {
            span: None,
            description: description(&input_object.description),
            name: name(&input_object.name),
            directives: directive_uses(&input_object.directives),
            fields: input_object.fields.iter().map(|(_, field)| input_value_definition(field)).collect(),
        }),
    }
}

fn field_definition(field: &crate::field::FieldType) -> FieldDefinition {
    FieldDefinition {
        span: None,
        description: description(&field.description),
        name: name(&field.name),
        arguments: field.args.iter().map(|(_, input_value)| input_value_definition(input_value)).collect(),
        ty: type_ref_to_ast(&field.ty),
        directives: directive_uses(&deprecation_directives(field.deprecation.as_ref(), &field.directives)),
    }
}

fn input_value_definition(input_value: &crate::argument::InputValue) -> InputValueDefinition {
    InputValueDefinition {
        span: None,
        description: description(&input_value.description),
        name: name(&input_value.name),
        ty: type_ref_to_ast(&input_value.ty),
        default_value: input_value.default_value.clone(),
        directives: directive_uses(&input_value.directives),
    }
}

/// `FieldType`/`EnumValueType` already fold `@deprecated` into a dedicated
/// `deprecation` field for cheap `isDeprecated` checks during execution, so
/// printing has to fold it back into the directive list to avoid losing it.
fn deprecation_directives(deprecation: Option<&crate::field::Deprecation>, directives: &[DirectiveUse]) -> Vec<DirectiveUse> {
    if directives.iter().any(|d| d.name == "deprecated") {
        return directives.to_vec();
    }
    match deprecation {
        Some(deprecation) => {
            let mut directives = directives.to_vec();
            directives.push(DirectiveUse {
                name: "deprecated".to_owned(),
                arguments: vec![(
                    "reason".to_owned(),
                    Value::String(gql_language::ast::StringValue { span: None, value: deprecation.reason.clone(), block: false }),
                )],
            });
            directives
        }
        None => directives.to_vec(),
    }
}

fn directive_uses(directives: &[DirectiveUse]) -> Vec<Directive> {
    directives
        .iter()
        .map(|directive| Directive {
            span: None,
            name: name(&directive.name),
            arguments: directive
                .arguments
                .iter()
                .map(|(arg_name, value)| gql_language::ast::Argument { span: None, name: name(arg_name), value: value.clone() })
                .collect(),
        })
        .collect()
}

fn type_ref_to_ast(ty: &TypeRef) -> AstType {
    match ty {
        TypeRef::Named(type_name) => AstType::Named(gql_language::ast::NamedType { span: None, name: name(type_name) }),
        TypeRef::List(inner) => {
            AstType::List(gql_language::ast::ListType { span: None, ty: Box::new(type_ref_to_ast(inner)) })
        }
        TypeRef::NonNull(inner) => {
            AstType::NonNull(gql_language::ast::NonNullType { span: None, ty: Box::new(type_ref_to_ast(inner)) })
        }
    }
}

fn name(value: &str) -> Name {
    Name { span: None, value: value.to_owned() }
}

fn description(value: &Option<String>) -> Option<Description> {
    value.as_ref().map(|value| Description { span: None, value: value.clone(), block: value.contains('\n') })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;

    #[test]
    fn omits_conventionally_named_schema_block() {
        let schema = build("type Query { hello: String }").unwrap();
        let printed = print_schema(&schema);
        assert!(!printed.contains("schema {"));
        assert!(printed.contains("type Query"));
    }

    #[test]
    fn keeps_schema_block_for_nonconventional_root_names() {
        let schema = build("schema { query: RootQuery } type RootQuery { hello: String }").unwrap();
        let printed = print_schema(&schema);
        assert!(printed.contains("schema {"));
        assert!(printed.contains("query: RootQuery"));
    }

    #[test]
    fn omits_builtin_scalars_and_introspection_types() {
        let schema = build("type Query { hello: String }").unwrap();
        let printed = print_schema(&schema);
        assert!(!printed.contains("scalar String"));
        assert!(!printed.contains("__Schema"));
    }

    #[test]
    fn round_trips_deprecated_field_directive() {
        let schema = build("type Query { hello: String @deprecated(reason: \"use bye\") }").unwrap();
        let printed = print_schema(&schema);
        assert!(printed.contains("@deprecated(reason: \"use bye\")"));
    }
}
