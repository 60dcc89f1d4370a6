//! A single schema-aware traversal shared by every rule that needs type
//! context: one `Checker` trait of no-op callbacks, driven by `walk`, which
//! threads a [`TypeInfo`] down through selection sets. The accumulator
//! lives on the checker itself (always a `Vec<GraphQLError>` here) rather
//! than as a generic type parameter, since every rule in this crate reports
//! the same error type. The trait carries the document's own lifetime so a
//! checker can borrow into the AST across calls (e.g. to remember "the
//! operation currently in scope") without running into the higher-ranked
//! lifetime a fully elided signature would otherwise demand.
//!
//! Fragment spreads are expanded in place against the type condition in
//! scope at the spread site, with a visited-name guard so a cyclic fragment
//! (already reported by [`crate::rules::fragments`]) can't recurse forever
//! while other rules are walking the same document.

use gql_language::ast::{
    Argument, Directive, Document, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, OperationType, Selection, SelectionSet, Value, VariableDefinition,
};
use gql_types::{DirectiveLocation, FieldType, InputValue, NamedType, RootOperation, Schema, TypeRef};

use crate::scope::TypeInfo;

#[allow(unused_variables)]
pub trait Checker<'a> {
    fn enter_operation(&mut self, operation: &'a OperationDefinition, info: TypeInfo<'a>) {}
    fn leave_operation(&mut self, operation: &'a OperationDefinition) {}
    fn enter_variable_definition(&mut self, variable_definition: &'a VariableDefinition, operation: &'a OperationDefinition) {}
    fn enter_fragment_definition(&mut self, fragment: &'a FragmentDefinition, info: TypeInfo<'a>) {}
    fn enter_field(&mut self, field: &'a Field, info: TypeInfo<'a>, field_def: Option<&'a FieldType>) {}
    fn enter_fragment_spread(&mut self, spread: &'a FragmentSpread, info: TypeInfo<'a>) {}
    fn enter_inline_fragment(&mut self, fragment: &'a InlineFragment, info: TypeInfo<'a>) {}
    fn enter_directive(&mut self, directive: &'a Directive, location: DirectiveLocation, info: TypeInfo<'a>) {}
    fn enter_argument(&mut self, argument: &'a Argument, arg_def: Option<&'a InputValue>) {}
    fn enter_value(&mut self, value: &'a Value, expected: Option<&'a TypeRef>, info: TypeInfo<'a>) {}
}

pub fn walk<'a>(document: &'a Document, schema: &'a Schema, checker: &mut impl Checker<'a>) {
    for operation in document.operations() {
        let root_operation = RootOperation::from(operation.operation);
        let info = TypeInfo::for_root(schema, schema.root_type(root_operation));

        checker.enter_operation(operation, info);

        for variable_definition in &operation.variable_definitions {
            checker.enter_variable_definition(variable_definition, operation);
            walk_value_opt(variable_definition.default_value.as_ref(), None, info, checker);
            walk_directives(&variable_definition.directives, DirectiveLocation::VariableDefinition, info, schema, checker);
        }

        let location = match operation.operation {
            OperationType::Query => DirectiveLocation::Query,
            OperationType::Mutation => DirectiveLocation::Mutation,
            OperationType::Subscription => DirectiveLocation::Subscription,
        };
        walk_directives(&operation.directives, location, info, schema, checker);

        walk_selection_set(&operation.selection_set, info, schema, document, checker, &mut Vec::new());

        checker.leave_operation(operation);
    }

    for fragment in document.fragments() {
        let info = TypeInfo::for_root(schema, schema.ty(&fragment.type_condition.value));
        checker.enter_fragment_definition(fragment, info);
        walk_directives(&fragment.directives, DirectiveLocation::FragmentDefinition, info, schema, checker);
        walk_selection_set(&fragment.selection_set, info, schema, document, checker, &mut Vec::new());
    }
}

fn walk_selection_set<'a>(
    selection_set: &'a SelectionSet,
    info: TypeInfo<'a>,
    schema: &'a Schema,
    document: &'a Document,
    checker: &mut impl Checker<'a>,
    visited_fragments: &mut Vec<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                let field_def = info.field(&field.name.value);
                checker.enter_field(field, info, field_def);

                for argument in &field.arguments {
                    let arg_def = field_def.and_then(|def| def.args.get(&argument.name.value));
                    checker.enter_argument(argument, arg_def);
                    walk_value_opt(Some(&argument.value), arg_def.map(|def| &def.ty), info, checker);
                }

                walk_directives(&field.directives, DirectiveLocation::Field, info, schema, checker);

                if let Some(selection_set) = &field.selection_set {
                    let field_info = info.for_field(&field.name.value);
                    walk_selection_set(selection_set, field_info, schema, document, checker, visited_fragments);
                }
            }
            Selection::FragmentSpread(spread) => {
                checker.enter_fragment_spread(spread, info);
                walk_directives(&spread.directives, DirectiveLocation::FragmentSpread, info, schema, checker);

                let name = spread.fragment_name.value.as_str();
                if visited_fragments.contains(&name) {
                    continue;
                }
                if let Some(fragment) = document.fragment(name) {
                    visited_fragments.push(name);
                    let fragment_info = info.for_type_condition(&fragment.type_condition.value);
                    walk_selection_set(&fragment.selection_set, fragment_info, schema, document, checker, visited_fragments);
                    visited_fragments.pop();
                }
            }
            Selection::InlineFragment(inline) => {
                checker.enter_inline_fragment(inline, info);
                walk_directives(&inline.directives, DirectiveLocation::InlineFragment, info, schema, checker);

                let inline_info = match &inline.type_condition {
                    Some(type_condition) => info.for_type_condition(&type_condition.value),
                    None => info,
                };
                walk_selection_set(&inline.selection_set, inline_info, schema, document, checker, visited_fragments);
            }
        }
    }
}

fn walk_directives<'a>(
    directives: &'a [Directive],
    location: DirectiveLocation,
    info: TypeInfo<'a>,
    schema: &'a Schema,
    checker: &mut impl Checker<'a>,
) {
    for directive in directives {
        checker.enter_directive(directive, location, info);

        let directive_def = schema.directive(&directive.name.value);
        for argument in &directive.arguments {
            let arg_def = directive_def.and_then(|def| def.args.get(&argument.name.value));
            checker.enter_argument(argument, arg_def);
            walk_value_opt(Some(&argument.value), arg_def.map(|def| &def.ty), info, checker);
        }
    }
}

fn walk_value_opt<'a>(value: Option<&'a Value>, expected: Option<&'a TypeRef>, info: TypeInfo<'a>, checker: &mut impl Checker<'a>) {
    if let Some(value) = value {
        walk_value(value, expected, info, checker);
    }
}

fn walk_value<'a>(value: &'a Value, expected: Option<&'a TypeRef>, info: TypeInfo<'a>, checker: &mut impl Checker<'a>) {
    checker.enter_value(value, expected, info);

    let inner_expected = expected.map(TypeRef::nullable);
    match value {
        Value::List(list) => {
            let element_expected = match inner_expected {
                Some(TypeRef::List(element)) => Some(&**element),
                _ => None,
            };
            for item in &list.values {
                walk_value(item, element_expected, info, checker);
            }
        }
        Value::Object(object) => {
            let fields = inner_expected
                .and_then(|ty| info.schema.ty(ty.named_type()))
                .and_then(|ty| match ty {
                    NamedType::InputObject(input) => Some(&input.fields),
                    _ => None,
                });
            for field in &object.fields {
                let field_expected = fields.and_then(|fields| fields.get(&field.name.value)).map(|def| &def.ty);
                walk_value(&field.value, field_expected, info, checker);
            }
        }
        _ => {}
    }
}
