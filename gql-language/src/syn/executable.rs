use gql_diagnostics::GraphQLError;

use super::cursor::Cursor;
use super::value::{parse_type, parse_value, parse_variable};
use crate::ast::*;
use crate::lex::TokenKind;

pub fn parse_operation_definition(cursor: &mut Cursor) -> Result<OperationDefinition, GraphQLError> {
    let start = cursor.span();

    let operation = if cursor.is(TokenKind::LBrace) {
        OperationType::Query
    } else if cursor.eat_keyword("query") {
        OperationType::Query
    } else if cursor.eat_keyword("mutation") {
        OperationType::Mutation
    } else if cursor.eat_keyword("subscription") {
        OperationType::Subscription
    } else {
        return Err(cursor.unexpected("query, mutation or subscription"));
    };

    let name = if cursor.is(TokenKind::Name) {
        let (value, span) = cursor.expect_name()?;
        Some(Name { span: Some(span), value })
    } else {
        None
    };

    let variable_definitions = if cursor.is(TokenKind::LParen) {
        parse_variable_definitions(cursor)?
    } else {
        Vec::new()
    };

    let directives = parse_directives(cursor, false)?;
    let selection_set = parse_selection_set(cursor)?;
    let span = start.joined(selection_set.span.unwrap_or(start));

    Ok(OperationDefinition {
        span: Some(span),
        operation,
        name,
        variable_definitions,
        directives,
        selection_set,
    })
}

fn parse_variable_definitions(cursor: &mut Cursor) -> Result<Vec<VariableDefinition>, GraphQLError> {
    cursor.expect_punctuator(TokenKind::LParen)?;
    let mut definitions = Vec::new();
    while !cursor.is(TokenKind::RParen) {
        definitions.push(parse_variable_definition(cursor)?);
    }
    cursor.expect_punctuator(TokenKind::RParen)?;
    Ok(definitions)
}

fn parse_variable_definition(cursor: &mut Cursor) -> Result<VariableDefinition, GraphQLError> {
    let variable = parse_variable(cursor)?;
    cursor.expect_punctuator(TokenKind::Colon)?;
    let ty = parse_type(cursor)?;
    let default_value = if cursor.eat_punctuator(TokenKind::Equals) {
        Some(parse_value(cursor, true)?)
    } else {
        None
    };
    let directives = parse_directives(cursor, true)?;
    let span = variable.span.unwrap_or_default().joined(ty.span().unwrap_or_default());
    Ok(VariableDefinition { span: Some(span), variable, ty, default_value, directives })
}

pub fn parse_fragment_definition(cursor: &mut Cursor) -> Result<FragmentDefinition, GraphQLError> {
    let start = cursor.expect_keyword("fragment")?;
    let (value, name_span) = cursor.expect_name()?;
    if value == "on" {
        return Err(cursor.unexpected("fragment name (not `on`)"));
    }
    let name = Name { span: Some(name_span), value };
    cursor.expect_keyword("on")?;
    let (type_name, type_span) = cursor.expect_name()?;
    let type_condition = Name { span: Some(type_span), value: type_name };
    let directives = parse_directives(cursor, false)?;
    let selection_set = parse_selection_set(cursor)?;
    let span = start.joined(selection_set.span.unwrap_or(start));
    Ok(FragmentDefinition { span: Some(span), name, type_condition, directives, selection_set })
}

pub fn parse_selection_set(cursor: &mut Cursor) -> Result<SelectionSet, GraphQLError> {
    cursor.enter_selection_set()?;
    let result = (|| {
        let start = cursor.expect_punctuator(TokenKind::LBrace)?;
        let mut selections = Vec::new();
        while !cursor.is(TokenKind::RBrace) {
            selections.push(parse_selection(cursor)?);
        }
        let end = cursor.expect_punctuator(TokenKind::RBrace)?;
        Ok(SelectionSet { span: Some(start.joined(end)), selections })
    })();
    cursor.exit_selection_set();
    result
}

fn parse_selection(cursor: &mut Cursor) -> Result<Selection, GraphQLError> {
    if cursor.eat_punctuator(TokenKind::Spread) {
        if cursor.is_name("on") || cursor.is(TokenKind::At) || cursor.is(TokenKind::LBrace) {
            parse_inline_fragment(cursor).map(Selection::InlineFragment)
        } else {
            parse_fragment_spread(cursor).map(Selection::FragmentSpread)
        }
    } else {
        parse_field(cursor).map(Selection::Field)
    }
}

fn parse_fragment_spread(cursor: &mut Cursor) -> Result<FragmentSpread, GraphQLError> {
    let (value, span) = cursor.expect_name()?;
    if value == "on" {
        return Err(cursor.unexpected("fragment name (not `on`)"));
    }
    let fragment_name = Name { span: Some(span), value };
    let directives = parse_directives(cursor, false)?;
    Ok(FragmentSpread { span: Some(span), fragment_name, directives })
}

fn parse_inline_fragment(cursor: &mut Cursor) -> Result<InlineFragment, GraphQLError> {
    let type_condition = if cursor.eat_keyword("on") {
        let (value, span) = cursor.expect_name()?;
        Some(Name { span: Some(span), value })
    } else {
        None
    };
    let directives = parse_directives(cursor, false)?;
    let selection_set = parse_selection_set(cursor)?;
    let span = type_condition
        .as_ref()
        .and_then(|name| name.span)
        .unwrap_or(selection_set.span.unwrap_or_default())
        .joined(selection_set.span.unwrap_or_default());
    Ok(InlineFragment { span: Some(span), type_condition, directives, selection_set })
}

fn parse_field(cursor: &mut Cursor) -> Result<Field, GraphQLError> {
    let (first, first_span) = cursor.expect_name()?;
    let (alias, name) = if cursor.eat_punctuator(TokenKind::Colon) {
        let (value, span) = cursor.expect_name()?;
        (Some(Name { span: Some(first_span), value: first }), Name { span: Some(span), value })
    } else {
        (None, Name { span: Some(first_span), value: first })
    };

    let arguments = if cursor.is(TokenKind::LParen) { parse_arguments(cursor)? } else { Vec::new() };
    let directives = parse_directives(cursor, false)?;
    let selection_set = if cursor.is(TokenKind::LBrace) { Some(parse_selection_set(cursor)?) } else { None };

    let end = selection_set
        .as_ref()
        .and_then(|set| set.span)
        .or_else(|| directives.last().and_then(|directive| directive.span))
        .or_else(|| arguments.last().and_then(|argument| argument.span))
        .unwrap_or(name.span.unwrap_or(first_span));
    let span = first_span.joined(end);

    Ok(Field { span: Some(span), alias, name, arguments, directives, selection_set })
}

fn parse_arguments(cursor: &mut Cursor) -> Result<Vec<Argument>, GraphQLError> {
    cursor.expect_punctuator(TokenKind::LParen)?;
    let mut arguments = Vec::new();
    while !cursor.is(TokenKind::RParen) {
        arguments.push(parse_argument(cursor)?);
    }
    cursor.expect_punctuator(TokenKind::RParen)?;
    Ok(arguments)
}

fn parse_argument(cursor: &mut Cursor) -> Result<Argument, GraphQLError> {
    let (value, start) = cursor.expect_name()?;
    let name = Name { span: Some(start), value };
    cursor.expect_punctuator(TokenKind::Colon)?;
    let value = parse_value(cursor, false)?;
    let span = start.joined(value.span().unwrap_or(start));
    Ok(Argument { span: Some(span), name, value })
}

pub fn parse_directives(cursor: &mut Cursor, constant: bool) -> Result<Vec<Directive>, GraphQLError> {
    let mut directives = Vec::new();
    while cursor.is(TokenKind::At) {
        directives.push(parse_directive(cursor, constant)?);
    }
    Ok(directives)
}

fn parse_directive(cursor: &mut Cursor, constant: bool) -> Result<Directive, GraphQLError> {
    let start = cursor.expect_punctuator(TokenKind::At)?;
    let (value, name_span) = cursor.expect_name()?;
    let name = Name { span: Some(name_span), value };
    let arguments = if cursor.is(TokenKind::LParen) {
        cursor.expect_punctuator(TokenKind::LParen)?;
        let mut arguments = Vec::new();
        while !cursor.is(TokenKind::RParen) {
            let (value, arg_start) = cursor.expect_name()?;
            let arg_name = Name { span: Some(arg_start), value };
            cursor.expect_punctuator(TokenKind::Colon)?;
            let value = parse_value(cursor, constant)?;
            let span = arg_start.joined(value.span().unwrap_or(arg_start));
            arguments.push(Argument { span: Some(span), name: arg_name, value });
        }
        cursor.expect_punctuator(TokenKind::RParen)?;
        arguments
    } else {
        Vec::new()
    };
    let span = start.joined(arguments.last().and_then(|argument| argument.span).unwrap_or(name_span));
    Ok(Directive { span: Some(span), name, arguments })
}

#[cfg(test)]
mod tests {
    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    #[test]
    fn parses_shorthand_query_with_nested_selections() {
        let source = Source::new("{ a { b c } }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 1);
    }

    #[test]
    fn parses_named_operation_with_variables_and_directives() {
        let source = Source::new(
            "query Greeting($name: String = \"world\") @cached {\n  hello(name: $name) @skip(if: false)\n}",
        );
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 1);
    }

    #[test]
    fn parses_fragment_spreads_and_inline_fragments() {
        let source = Source::new(
            "{ ...Frag ... on Type { a } }\nfragment Frag on Type { b }",
        );
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(document.definitions.len(), 2);
    }

    #[test]
    fn rejects_fragment_named_on() {
        let source = Source::new("fragment on on Type { a }");
        let tokens = tokenize(&source.body).unwrap();
        assert!(parse(&tokens, &source).is_err());
    }

    #[test]
    fn selection_set_depth_limit_is_enforced() {
        let mut query = String::new();
        for _ in 0..600 {
            query.push_str("{ a");
        }
        for _ in 0..600 {
            query.push('}');
        }
        let source = Source::new(query);
        let tokens = tokenize(&source.body).unwrap();
        assert!(parse(&tokens, &source).is_err());
    }
}
