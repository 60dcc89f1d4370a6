//! Unique operation names, and the lone-anonymous-operation rule: an
//! anonymous operation is only legal when it is the document's only
//! operation.

use std::collections::HashMap;

use gql_diagnostics::{validation, GraphQLError};
use gql_language::ast::Document;

pub fn check(document: &Document, errors: &mut Vec<GraphQLError>) {
    let operations: Vec<_> = document.operations().collect();

    if operations.len() > 1 {
        for operation in &operations {
            if operation.name.is_none() {
                errors.push(validation::anonymous_operation_not_alone());
            }
        }
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for operation in &operations {
        if let Some(name) = &operation.name {
            let count = seen.entry(name.value.as_str()).or_insert(0);
            *count += 1;
            if *count > 1 {
                errors.push(validation::duplicate_operation_name(&name.value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse_document as parsed;

    #[test]
    fn rejects_duplicate_operation_names() {
        let document = parsed("query A { a } query A { b }");
        let mut errors = Vec::new();
        check(&document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_an_anonymous_operation_alongside_another() {
        let document = parsed("{ a } query Named { b }");
        let mut errors = Vec::new();
        check(&document, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn allows_a_single_anonymous_operation() {
        let document = parsed("{ a }");
        let mut errors = Vec::new();
        check(&document, &mut errors);
        assert!(errors.is_empty());
    }
}
