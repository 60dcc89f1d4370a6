//! Fragment-level rules: every fragment must be used by some operation,
//! fragment spreads must not form a cycle, and a fragment (or inline
//! fragment)'s type condition must name a composite type (object,
//! interface, or union).

use std::collections::HashSet;

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::visit::{Node, Visit};
use gql_language::ast::{Document, FragmentDefinition, FragmentSpread, InlineFragment};
use gql_types::Schema;

pub fn check(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    check_unused_fragments(document, errors);
    check_fragment_cycles(document, errors);
    check_type_conditions(schema, document, errors);
}

/// Collects every fragment spread name reachable from the document's
/// operations (not from other fragments in isolation — a fragment is "used"
/// only if some chain of spreads starting at an operation reaches it).
fn check_unused_fragments(document: &Document, errors: &mut Vec<GraphQLError>) {
    #[derive(Default)]
    struct SpreadCollector {
        names: Vec<String>,
    }

    impl Visit for SpreadCollector {
        fn visit_fragment_spread(&mut self, node: &FragmentSpread) {
            self.names.push(node.fragment_name.value.clone());
        }
    }

    let mut used = HashSet::new();
    let mut frontier = Vec::new();

    for operation in document.operations() {
        let mut collector = SpreadCollector::default();
        operation.selection_set.traverse(&mut collector);
        frontier.extend(collector.names);
    }

    while let Some(name) = frontier.pop() {
        if !used.insert(name.clone()) {
            continue;
        }
        if let Some(fragment) = document.fragment(&name) {
            let mut collector = SpreadCollector::default();
            fragment.selection_set.traverse(&mut collector);
            frontier.extend(collector.names);
        }
    }

    for fragment in document.fragments() {
        if !used.contains(&fragment.name.value) {
            errors.push(validation::unused_fragment(&fragment.name.value));
        }
    }
}

fn check_fragment_cycles(document: &Document, errors: &mut Vec<GraphQLError>) {
    for fragment in document.fragments() {
        let mut path = vec![fragment.name.value.clone()];
        detect_cycle(document, fragment, &mut path, errors);
    }
}

fn detect_cycle(document: &Document, fragment: &FragmentDefinition, path: &mut Vec<String>, errors: &mut Vec<GraphQLError>) {
    #[derive(Default)]
    struct SpreadCollector {
        names: Vec<String>,
    }

    impl Visit for SpreadCollector {
        fn visit_fragment_spread(&mut self, node: &FragmentSpread) {
            self.names.push(node.fragment_name.value.clone());
        }
    }

    let mut collector = SpreadCollector::default();
    fragment.selection_set.traverse(&mut collector);

    for name in collector.names {
        if name == path[0] {
            path.push(name);
            errors.push(validation::fragment_cycle(path));
            path.pop();
            continue;
        }
        if path.contains(&name) {
            continue;
        }
        if let Some(next) = document.fragment(&name) {
            path.push(name);
            detect_cycle(document, next, path, errors);
            path.pop();
        }
    }
}

fn check_type_conditions(schema: &Schema, document: &Document, errors: &mut Vec<GraphQLError>) {
    for fragment in document.fragments() {
        if let Some(ty) = schema.ty(&fragment.type_condition.value) {
            if !ty.is_composite() {
                errors.push(validation::fragment_on_non_composite_type(&fragment.name.value, ty.name()));
            }
        }
    }

    struct InlineFragmentChecker<'a> {
        schema: &'a Schema,
        errors: Vec<GraphQLError>,
    }

    impl<'a> Visit for InlineFragmentChecker<'a> {
        fn visit_inline_fragment(&mut self, node: &InlineFragment) {
            if let Some(type_condition) = &node.type_condition {
                if let Some(ty) = self.schema.ty(&type_condition.value) {
                    if !ty.is_composite() {
                        self.errors.push(validation::inline_fragment_on_non_composite_type(ty.name()));
                    }
                }
            }
        }
    }

    let mut checker = InlineFragmentChecker { schema, errors: Vec::new() };
    document.traverse(&mut checker);
    errors.append(&mut checker.errors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn reports_a_fragment_never_spread_anywhere() {
        let document = parse_document("query { a } fragment Unused on Query { a }");
        let schema = schema("type Query { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn detects_a_fragment_that_spreads_itself() {
        let document = parse_document("query { ...A } fragment A on Query { ...A }");
        let schema = schema("type Query { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("within itself")));
    }

    #[test]
    fn rejects_a_fragment_on_a_scalar() {
        let document = parse_document("query { a { ...F } } fragment F on String { a }");
        let schema = schema("type Query { a: Inner } type Inner { a: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.iter().any(|error| error.message.contains("non composite")));
    }
}
