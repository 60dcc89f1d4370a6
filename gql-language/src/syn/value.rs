use gql_diagnostics::GraphQLError;

use super::cursor::Cursor;
use crate::ast::*;
use crate::lex::TokenKind;

/// Parses a value literal. `constant` forbids `Variable`, matching the two
/// grammar productions `Value[Const]`/`Value[?Const]`: constant values
/// appear in default-value position and inside other constant values,
/// non-constant ones appear in arguments and list/object literals there.
pub fn parse_value(cursor: &mut Cursor, constant: bool) -> Result<Value, GraphQLError> {
    match cursor.kind() {
        TokenKind::Dollar if !constant => parse_variable(cursor).map(Value::Variable),
        TokenKind::Dollar => Err(cursor.unexpected("constant value")),
        TokenKind::Int => {
            let (value, span) = cursor.expect_int()?;
            Ok(Value::Int(IntValue { span: Some(span), value }))
        }
        TokenKind::Float => {
            let (value, span) = cursor.expect_float()?;
            Ok(Value::Float(FloatValue { span: Some(span), value }))
        }
        TokenKind::String | TokenKind::BlockString => {
            let (value, block, span) = cursor.expect_string()?;
            Ok(Value::String(StringValue { span: Some(span), value, block }))
        }
        TokenKind::Name if cursor.is_name("true") => {
            let span = cursor.expect_keyword("true")?;
            Ok(Value::Boolean(BooleanValue { span: Some(span), value: true }))
        }
        TokenKind::Name if cursor.is_name("false") => {
            let span = cursor.expect_keyword("false")?;
            Ok(Value::Boolean(BooleanValue { span: Some(span), value: false }))
        }
        TokenKind::Name if cursor.is_name("null") => {
            let span = cursor.expect_keyword("null")?;
            Ok(Value::Null(NullValue { span: Some(span) }))
        }
        TokenKind::Name => {
            let (value, span) = cursor.expect_name()?;
            Ok(Value::Enum(EnumValue { span: Some(span), value }))
        }
        TokenKind::LBracket => parse_list_value(cursor, constant).map(Value::List),
        TokenKind::LBrace => parse_object_value(cursor, constant).map(Value::Object),
        _ => Err(cursor.unexpected("Value")),
    }
}

pub fn parse_variable(cursor: &mut Cursor) -> Result<Variable, GraphQLError> {
    let start = cursor.expect_punctuator(TokenKind::Dollar)?;
    let (value, end) = cursor.expect_name()?;
    Ok(Variable { span: Some(start.joined(end)), name: Name { span: Some(end), value } })
}

fn parse_list_value(cursor: &mut Cursor, constant: bool) -> Result<ListValue, GraphQLError> {
    let start = cursor.expect_punctuator(TokenKind::LBracket)?;
    let mut values = Vec::new();
    while !cursor.is(TokenKind::RBracket) {
        values.push(parse_value(cursor, constant)?);
    }
    let end = cursor.expect_punctuator(TokenKind::RBracket)?;
    Ok(ListValue { span: Some(start.joined(end)), values })
}

fn parse_object_value(cursor: &mut Cursor, constant: bool) -> Result<ObjectValue, GraphQLError> {
    let start = cursor.expect_punctuator(TokenKind::LBrace)?;
    let mut fields = Vec::new();
    while !cursor.is(TokenKind::RBrace) {
        fields.push(parse_object_field(cursor, constant)?);
    }
    let end = cursor.expect_punctuator(TokenKind::RBrace)?;
    Ok(ObjectValue { span: Some(start.joined(end)), fields })
}

fn parse_object_field(cursor: &mut Cursor, constant: bool) -> Result<ObjectField, GraphQLError> {
    let (value, start) = cursor.expect_name()?;
    let name = Name { span: Some(start), value };
    cursor.expect_punctuator(TokenKind::Colon)?;
    let value = parse_value(cursor, constant)?;
    let span = start.joined(value.span().unwrap_or(start));
    Ok(ObjectField { span: Some(span), name, value })
}

pub fn parse_type(cursor: &mut Cursor) -> Result<Type, GraphQLError> {
    let ty = if cursor.is(TokenKind::LBracket) {
        let start = cursor.expect_punctuator(TokenKind::LBracket)?;
        let inner = parse_type(cursor)?;
        let end = cursor.expect_punctuator(TokenKind::RBracket)?;
        Type::List(ListType { span: Some(start.joined(end)), ty: Box::new(inner) })
    } else {
        let (value, span) = cursor.expect_name()?;
        Type::Named(NamedType { span: Some(span), name: Name { span: Some(span), value } })
    };

    if cursor.is(TokenKind::Bang) {
        let bang = cursor.expect_punctuator(TokenKind::Bang)?;
        let span = ty.span().unwrap_or(bang).joined(bang);
        Ok(Type::NonNull(NonNullType { span: Some(span), ty: Box::new(ty) }))
    } else {
        Ok(ty)
    }
}

pub fn parse_description(cursor: &mut Cursor) -> Option<Description> {
    if matches!(cursor.kind(), TokenKind::String | TokenKind::BlockString) {
        let (value, block, span) = cursor.expect_string().ok()?;
        Some(Description { span: Some(span), value, block })
    } else {
        None
    }
}
