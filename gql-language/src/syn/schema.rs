use gql_diagnostics::GraphQLError;

use super::cursor::Cursor;
use super::executable::parse_directives;
use super::value::{parse_description, parse_type, parse_value};
use crate::ast::*;
use crate::lex::TokenKind;

/// Dispatches on the keyword that follows an optional leading description to
/// decide which type-system definition or extension to parse.
pub fn parse_type_system_definition_or_extension(cursor: &mut Cursor) -> Result<Definition, GraphQLError> {
    let description = parse_description(cursor);

    if description.is_some() {
        return parse_definition_after_description(cursor, description);
    }

    if cursor.is_name("extend") {
        return parse_extension(cursor);
    }

    parse_definition_after_description(cursor, None)
}

fn parse_definition_after_description(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<Definition, GraphQLError> {
    if cursor.eat_keyword("schema") {
        parse_schema_definition(cursor, description).map(Definition::Schema)
    } else if cursor.eat_keyword("scalar") {
        parse_scalar_type_definition(cursor, description).map(Definition::ScalarType)
    } else if cursor.eat_keyword("type") {
        parse_object_type_definition(cursor, description).map(Definition::ObjectType)
    } else if cursor.eat_keyword("interface") {
        parse_interface_type_definition(cursor, description).map(Definition::InterfaceType)
    } else if cursor.eat_keyword("union") {
        parse_union_type_definition(cursor, description).map(Definition::UnionType)
    } else if cursor.eat_keyword("enum") {
        parse_enum_type_definition(cursor, description).map(Definition::EnumType)
    } else if cursor.eat_keyword("input") {
        parse_input_object_type_definition(cursor, description).map(Definition::InputObjectType)
    } else if cursor.eat_keyword("directive") {
        parse_directive_definition(cursor, description).map(Definition::Directive)
    } else {
        Err(cursor.unexpected("a type system definition"))
    }
}

fn parse_extension(cursor: &mut Cursor) -> Result<Definition, GraphQLError> {
    cursor.expect_keyword("extend")?;
    if cursor.eat_keyword("schema") {
        parse_schema_extension(cursor).map(Definition::SchemaExtension)
    } else if cursor.eat_keyword("scalar") {
        parse_scalar_type_extension(cursor).map(Definition::ScalarTypeExtension)
    } else if cursor.eat_keyword("type") {
        parse_object_type_extension(cursor).map(Definition::ObjectTypeExtension)
    } else if cursor.eat_keyword("interface") {
        parse_interface_type_extension(cursor).map(Definition::InterfaceTypeExtension)
    } else if cursor.eat_keyword("union") {
        parse_union_type_extension(cursor).map(Definition::UnionTypeExtension)
    } else if cursor.eat_keyword("enum") {
        parse_enum_type_extension(cursor).map(Definition::EnumTypeExtension)
    } else if cursor.eat_keyword("input") {
        parse_input_object_type_extension(cursor).map(Definition::InputObjectTypeExtension)
    } else {
        Err(cursor.unexpected("a type to extend"))
    }
}

fn parse_schema_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<SchemaDefinition, GraphQLError> {
    let directives = parse_directives(cursor, true)?;
    let root_operation_types = parse_operation_type_definitions(cursor)?;
    Ok(SchemaDefinition { span: None, description, directives, root_operation_types })
}

fn parse_schema_extension(cursor: &mut Cursor) -> Result<SchemaExtension, GraphQLError> {
    let directives = parse_directives(cursor, true)?;
    let root_operation_types =
        if cursor.is(TokenKind::LBrace) { parse_operation_type_definitions(cursor)? } else { Vec::new() };
    Ok(SchemaExtension { span: None, directives, root_operation_types })
}

fn parse_operation_type_definitions(cursor: &mut Cursor) -> Result<Vec<OperationTypeDefinition>, GraphQLError> {
    cursor.expect_punctuator(TokenKind::LBrace)?;
    let mut definitions = Vec::new();
    while !cursor.is(TokenKind::RBrace) {
        let operation = if cursor.eat_keyword("query") {
            OperationType::Query
        } else if cursor.eat_keyword("mutation") {
            OperationType::Mutation
        } else if cursor.eat_keyword("subscription") {
            OperationType::Subscription
        } else {
            return Err(cursor.unexpected("query, mutation or subscription"));
        };
        cursor.expect_punctuator(TokenKind::Colon)?;
        let (value, span) = cursor.expect_name()?;
        definitions.push(OperationTypeDefinition {
            span: None,
            operation,
            named_type: Name { span: Some(span), value },
        });
    }
    cursor.expect_punctuator(TokenKind::RBrace)?;
    Ok(definitions)
}

fn parse_name(cursor: &mut Cursor) -> Result<Name, GraphQLError> {
    let (value, span) = cursor.expect_name()?;
    Ok(Name { span: Some(span), value })
}

fn parse_scalar_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<ScalarTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    Ok(ScalarTypeDefinition { span: None, description, name, directives })
}

fn parse_scalar_type_extension(cursor: &mut Cursor) -> Result<ScalarTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    if directives.is_empty() {
        return Err(cursor.unexpected("at least one directive"));
    }
    Ok(ScalarTypeExtension { span: None, name, directives })
}

fn parse_implements_interfaces(cursor: &mut Cursor) -> Result<Vec<Name>, GraphQLError> {
    let mut interfaces = Vec::new();
    if cursor.eat_keyword("implements") {
        cursor.eat_punctuator(TokenKind::Amp);
        interfaces.push(parse_name(cursor)?);
        while cursor.eat_punctuator(TokenKind::Amp) {
            interfaces.push(parse_name(cursor)?);
        }
    }
    Ok(interfaces)
}

fn parse_fields_definition(cursor: &mut Cursor) -> Result<Vec<FieldDefinition>, GraphQLError> {
    let mut fields = Vec::new();
    if cursor.is(TokenKind::LBrace) {
        cursor.expect_punctuator(TokenKind::LBrace)?;
        while !cursor.is(TokenKind::RBrace) {
            fields.push(parse_field_definition(cursor)?);
        }
        cursor.expect_punctuator(TokenKind::RBrace)?;
    }
    Ok(fields)
}

fn parse_field_definition(cursor: &mut Cursor) -> Result<FieldDefinition, GraphQLError> {
    let description = parse_description(cursor);
    let name = parse_name(cursor)?;
    let arguments = parse_argument_definitions(cursor)?;
    cursor.expect_punctuator(TokenKind::Colon)?;
    let ty = parse_type(cursor)?;
    let directives = parse_directives(cursor, true)?;
    Ok(FieldDefinition { span: None, description, name, arguments, ty, directives })
}

fn parse_argument_definitions(cursor: &mut Cursor) -> Result<Vec<InputValueDefinition>, GraphQLError> {
    let mut arguments = Vec::new();
    if cursor.is(TokenKind::LParen) {
        cursor.expect_punctuator(TokenKind::LParen)?;
        while !cursor.is(TokenKind::RParen) {
            arguments.push(parse_input_value_definition(cursor)?);
        }
        cursor.expect_punctuator(TokenKind::RParen)?;
    }
    Ok(arguments)
}

fn parse_input_value_definition(cursor: &mut Cursor) -> Result<InputValueDefinition, GraphQLError> {
    let description = parse_description(cursor);
    let name = parse_name(cursor)?;
    cursor.expect_punctuator(TokenKind::Colon)?;
    let ty = parse_type(cursor)?;
    let default_value =
        if cursor.eat_punctuator(TokenKind::Equals) { Some(parse_value(cursor, true)?) } else { None };
    let directives = parse_directives(cursor, true)?;
    Ok(InputValueDefinition { span: None, description, name, ty, default_value, directives })
}

fn parse_object_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<ObjectTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let implements_interfaces = parse_implements_interfaces(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_fields_definition(cursor)?;
    Ok(ObjectTypeDefinition { span: None, description, name, implements_interfaces, directives, fields })
}

fn parse_object_type_extension(cursor: &mut Cursor) -> Result<ObjectTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let implements_interfaces = parse_implements_interfaces(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_fields_definition(cursor)?;
    if implements_interfaces.is_empty() && directives.is_empty() && fields.is_empty() {
        return Err(cursor.unexpected("an interface list, directive or field set to extend with"));
    }
    Ok(ObjectTypeExtension { span: None, name, implements_interfaces, directives, fields })
}

fn parse_interface_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<InterfaceTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let implements_interfaces = parse_implements_interfaces(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_fields_definition(cursor)?;
    Ok(InterfaceTypeDefinition { span: None, description, name, implements_interfaces, directives, fields })
}

fn parse_interface_type_extension(cursor: &mut Cursor) -> Result<InterfaceTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let implements_interfaces = parse_implements_interfaces(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_fields_definition(cursor)?;
    Ok(InterfaceTypeExtension { span: None, name, implements_interfaces, directives, fields })
}

fn parse_union_member_types(cursor: &mut Cursor) -> Result<Vec<Name>, GraphQLError> {
    let mut members = Vec::new();
    if cursor.eat_punctuator(TokenKind::Equals) {
        cursor.eat_punctuator(TokenKind::Pipe);
        members.push(parse_name(cursor)?);
        while cursor.eat_punctuator(TokenKind::Pipe) {
            members.push(parse_name(cursor)?);
        }
    }
    Ok(members)
}

fn parse_union_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<UnionTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let member_types = parse_union_member_types(cursor)?;
    Ok(UnionTypeDefinition { span: None, description, name, directives, member_types })
}

fn parse_union_type_extension(cursor: &mut Cursor) -> Result<UnionTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let member_types = parse_union_member_types(cursor)?;
    Ok(UnionTypeExtension { span: None, name, directives, member_types })
}

fn parse_enum_values_definition(cursor: &mut Cursor) -> Result<Vec<EnumValueDefinition>, GraphQLError> {
    let mut values = Vec::new();
    if cursor.is(TokenKind::LBrace) {
        cursor.expect_punctuator(TokenKind::LBrace)?;
        while !cursor.is(TokenKind::RBrace) {
            let description = parse_description(cursor);
            let value = parse_name(cursor)?;
            let directives = parse_directives(cursor, true)?;
            values.push(EnumValueDefinition { span: None, description, value, directives });
        }
        cursor.expect_punctuator(TokenKind::RBrace)?;
    }
    Ok(values)
}

fn parse_enum_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<EnumTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let values = parse_enum_values_definition(cursor)?;
    Ok(EnumTypeDefinition { span: None, description, name, directives, values })
}

fn parse_enum_type_extension(cursor: &mut Cursor) -> Result<EnumTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let values = parse_enum_values_definition(cursor)?;
    Ok(EnumTypeExtension { span: None, name, directives, values })
}

fn parse_input_fields_definition(cursor: &mut Cursor) -> Result<Vec<InputValueDefinition>, GraphQLError> {
    let mut fields = Vec::new();
    if cursor.is(TokenKind::LBrace) {
        cursor.expect_punctuator(TokenKind::LBrace)?;
        while !cursor.is(TokenKind::RBrace) {
            fields.push(parse_input_value_definition(cursor)?);
        }
        cursor.expect_punctuator(TokenKind::RBrace)?;
    }
    Ok(fields)
}

fn parse_input_object_type_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<InputObjectTypeDefinition, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_input_fields_definition(cursor)?;
    Ok(InputObjectTypeDefinition { span: None, description, name, directives, fields })
}

fn parse_input_object_type_extension(cursor: &mut Cursor) -> Result<InputObjectTypeExtension, GraphQLError> {
    let name = parse_name(cursor)?;
    let directives = parse_directives(cursor, true)?;
    let fields = parse_input_fields_definition(cursor)?;
    Ok(InputObjectTypeExtension { span: None, name, directives, fields })
}

fn parse_directive_definition(
    cursor: &mut Cursor,
    description: Option<Description>,
) -> Result<DirectiveDefinition, GraphQLError> {
    cursor.expect_punctuator(TokenKind::At)?;
    let name = parse_name(cursor)?;
    let arguments = parse_argument_definitions(cursor)?;
    let repeatable = cursor.eat_keyword("repeatable");
    cursor.expect_keyword("on")?;
    cursor.eat_punctuator(TokenKind::Pipe);
    let mut locations = vec![parse_name(cursor)?];
    while cursor.eat_punctuator(TokenKind::Pipe) {
        locations.push(parse_name(cursor)?);
    }
    Ok(DirectiveDefinition { span: None, description, name, arguments, repeatable, locations })
}

#[cfg(test)]
mod tests {
    use unindent::unindent;

    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    #[test]
    fn parses_a_full_sdl_document() {
        let source = Source::new(unindent(
            r#"
            "A user of the system."
            type User implements Node {
              id: ID!
              name: String
              posts(first: Int = 10): [Post!]!
            }

            interface Node {
              id: ID!
            }

            union SearchResult = User | Post

            enum Role {
              ADMIN
              MEMBER
            }

            input CreateUserInput {
              name: String!
            }

            directive @auth(role: Role = MEMBER) on FIELD_DEFINITION

            schema {
              query: Query
            }
            "#,
        ));
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 7);
    }

    #[test]
    fn parses_type_extension() {
        let source = Source::new("extend type User @deprecated(reason: \"legacy\")");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 1);
    }
}
