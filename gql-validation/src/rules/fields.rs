//! Fields exist on type: every selected field must be declared (or be the
//! meta-field `__typename`) on the composite type the selection is made
//! against.

use gql_diagnostics::{field, GraphQLError};
use gql_language::ast::Field;
use gql_types::{FieldType, Schema};

use crate::scope::TypeInfo;
use crate::walk::{self, Checker};

pub fn check(schema: &Schema, document: &gql_language::ast::Document, errors: &mut Vec<GraphQLError>) {
    let mut checker = FieldChecker { schema, errors: Vec::new() };
    walk::walk(document, schema, &mut checker);
    errors.append(&mut checker.errors);
}

struct FieldChecker<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

impl<'a> Checker<'a> for FieldChecker<'a> {
    fn enter_field(&mut self, field_node: &'a Field, info: TypeInfo<'a>, field_def: Option<&'a FieldType>) {
        let Some(parent_type) = info.parent_type else { return };
        if field_node.name.value == "__typename" || field_def.is_some() {
            return;
        }
        let is_root_meta_field = (field_node.name.value == "__schema" || field_node.name.value == "__type")
            && parent_type.name() == self.schema.query_type().name();
        if is_root_meta_field {
            return;
        }
        self.errors.push(field::unknown_field(parent_type.name(), &field_node.name.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_document, schema};

    #[test]
    fn rejects_a_field_not_declared_on_the_type() {
        let document = parse_document("query { nope }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn allows_the_typename_meta_field_anywhere() {
        let document = parse_document("query { __typename }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn checks_fields_through_nested_selections_and_fragments() {
        let document = parse_document(
            "query { parent { ...F } } fragment F on Child { missing }",
        );
        let schema = schema("type Query { parent: Child } type Child { present: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn allows_the_schema_and_type_meta_fields_on_the_query_root() {
        let document = parse_document("query { __schema { queryType { name } } __type(name: \"Query\") { name } }");
        let schema = schema("type Query { hello: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn rejects_the_schema_meta_field_off_the_query_root() {
        let document = parse_document("query { parent { __schema { queryType { name } } } }");
        let schema = schema("type Query { parent: Child } type Child { present: String }");
        let mut errors = Vec::new();
        check(&schema, &document, &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
