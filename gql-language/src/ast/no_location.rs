//! `no_location`: clears every [`Span`] in a parsed executable document, the
//! way graphql-js's `parse(source, { noLocation: true })` produces a
//! document with no `loc` property on any node. Implemented as an
//! [`Editor`] rather than a bespoke recursive function so it reuses the
//! same splice-back machinery every other AST rewrite goes through.
//!
//! Equality already ignores `span` (`ast_struct!`'s generated `PartialEq`
//! skips it), so this only matters to a caller that serializes or inspects
//! locations directly — e.g. the public API's `{ no_location: true }` parse
//! option.

use super::editor::{edit_document, Action, Ancestors, Editor};
use super::*;

struct LocationStripper;

fn clear_name(name: Name) -> Name {
    Name { span: None, ..name }
}

fn clear_type(ty: Type) -> Type {
    match ty {
        Type::Named(named) => Type::Named(NamedType { span: None, name: clear_name(named.name) }),
        Type::List(list) => Type::List(ListType { span: None, ty: Box::new(clear_type(*list.ty)) }),
        Type::NonNull(non_null) => Type::NonNull(NonNullType { span: None, ty: Box::new(clear_type(*non_null.ty)) }),
    }
}

fn clear_value(value: Value) -> Value {
    match value {
        Value::Variable(variable) => Value::Variable(Variable { span: None, name: clear_name(variable.name) }),
        Value::Int(value) => Value::Int(IntValue { span: None, ..value }),
        Value::Float(value) => Value::Float(FloatValue { span: None, ..value }),
        Value::String(value) => Value::String(StringValue { span: None, ..value }),
        Value::Boolean(value) => Value::Boolean(BooleanValue { span: None, ..value }),
        Value::Null(value) => Value::Null(NullValue { span: None, ..value }),
        Value::Enum(value) => Value::Enum(EnumValue { span: None, ..value }),
        Value::List(value) => {
            Value::List(ListValue { span: None, values: value.values.into_iter().map(clear_value).collect() })
        }
        Value::Object(object) => Value::Object(ObjectValue {
            span: None,
            fields: object
                .fields
                .into_iter()
                .map(|field| ObjectField { span: None, name: clear_name(field.name), value: clear_value(field.value) })
                .collect(),
        }),
    }
}

fn clear_variable_definitions(definitions: Vec<VariableDefinition>) -> Vec<VariableDefinition> {
    definitions
        .into_iter()
        .map(|definition| VariableDefinition {
            span: None,
            variable: Variable { span: None, name: clear_name(definition.variable.name) },
            ty: clear_type(definition.ty),
            default_value: definition.default_value.map(clear_value),
            directives: definition.directives,
        })
        .collect()
}

impl Editor for LocationStripper {
    fn enter_operation_definition(&mut self, node: &OperationDefinition, _ancestors: &Ancestors) -> Action<OperationDefinition> {
        let node = node.clone();
        Action::Replace(OperationDefinition {
            span: None,
            name: node.name.map(clear_name),
            variable_definitions: clear_variable_definitions(node.variable_definitions),
            ..node
        })
    }

    fn enter_fragment_definition(&mut self, node: &FragmentDefinition, _ancestors: &Ancestors) -> Action<FragmentDefinition> {
        let node = node.clone();
        Action::Replace(FragmentDefinition {
            span: None,
            name: clear_name(node.name),
            type_condition: clear_name(node.type_condition),
            ..node
        })
    }

    fn enter_selection_set(&mut self, node: &SelectionSet, _ancestors: &Ancestors) -> Action<SelectionSet> {
        Action::Replace(SelectionSet { span: None, ..node.clone() })
    }

    fn enter_field(&mut self, node: &Field, _ancestors: &Ancestors) -> Action<Field> {
        let node = node.clone();
        Action::Replace(Field { span: None, alias: node.alias.map(clear_name), name: clear_name(node.name), ..node })
    }

    fn enter_fragment_spread(&mut self, node: &FragmentSpread, _ancestors: &Ancestors) -> Action<FragmentSpread> {
        let node = node.clone();
        Action::Replace(FragmentSpread { span: None, fragment_name: clear_name(node.fragment_name), ..node })
    }

    fn enter_inline_fragment(&mut self, node: &InlineFragment, _ancestors: &Ancestors) -> Action<InlineFragment> {
        let node = node.clone();
        Action::Replace(InlineFragment { span: None, type_condition: node.type_condition.map(clear_name), ..node })
    }

    fn enter_argument(&mut self, node: &Argument, _ancestors: &Ancestors) -> Action<Argument> {
        let node = node.clone();
        Action::Replace(Argument { span: None, name: clear_name(node.name), ..node })
    }

    fn enter_directive(&mut self, node: &Directive, _ancestors: &Ancestors) -> Action<Directive> {
        let node = node.clone();
        Action::Replace(Directive { span: None, name: clear_name(node.name), ..node })
    }

    fn enter_value(&mut self, node: &Value, _ancestors: &Ancestors) -> Action<Value> {
        Action::Replace(clear_value(node.clone()))
    }
}

/// Clears every [`Span`] in `document`'s executable definitions (operations
/// and fragments). Type-system definitions pass through unchanged, since
/// the document either is wholly executable or wholly SDL (see
/// [`Document`]'s own doc comment) and `no_location` only ever applies to a
/// request document.
pub fn strip_locations(document: Document) -> Document {
    let document = edit_document(document, &mut LocationStripper);
    Document { span: None, ..document }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    #[test]
    fn clears_every_span_in_an_executable_document() {
        let source = Source::new("{ a }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert!(document.span.is_some());

        let stripped = strip_locations(document);
        assert!(stripped.span.is_none());
        for operation in stripped.operations() {
            assert!(operation.span.is_none());
            assert!(operation.selection_set.span.is_none());
            for selection in &operation.selection_set.selections {
                if let Selection::Field(field) = selection {
                    assert!(field.span.is_none());
                    assert!(field.name.span.is_none());
                }
            }
        }
    }

    #[test]
    fn preserves_structural_equality_with_the_located_document() {
        let source = Source::new("query Greeting($name: String) { hello(name: $name) }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        let stripped = strip_locations(document.clone());
        assert_eq!(document, stripped);
    }
}
