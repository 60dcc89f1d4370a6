//! Picks the single operation an execution runs: the schema-independent
//! first step of `execute`/`subscribe`. Selects the operation matching
//! `operationName` when given, or the lone operation in the document
//! otherwise, erroring when the document has more than one operation and
//! no name was given to disambiguate.

use gql_diagnostics::GraphQLError;
use gql_language::ast::{Document, OperationDefinition};

pub fn select_operation<'a>(
    document: &'a Document,
    operation_name: Option<&str>,
) -> Result<&'a OperationDefinition, GraphQLError> {
    let operations: Vec<&OperationDefinition> = document.operations().collect();
    let names: Vec<&str> =
        operations.iter().filter_map(|operation| operation.name.as_ref().map(|name| name.value.as_str())).collect();

    match operation_name {
        Some(name) => operations
            .into_iter()
            .find(|operation| operation.name.as_ref().map(|n| n.value.as_str()) == Some(name))
            .ok_or_else(|| {
                GraphQLError::new(format_args!("Unknown operation named \"{}\", expected one of {:?}.", name, names))
            }),
        None => match operations.len() {
            0 => Err(GraphQLError::new("Document does not contain any operations.")),
            1 => Ok(operations[0]),
            _ => Err(GraphQLError::new(format_args!(
                "Document contains multiple operations ({:?}); an operation name must be specified.",
                names
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_language::lex::{tokenize, Source};
    use gql_language::parse;

    fn parse_document(source: &str) -> Document {
        let source = Source::new(source.to_owned());
        let tokens = tokenize(&source.body).unwrap();
        parse(&tokens, &source).unwrap()
    }

    #[test]
    fn picks_the_lone_operation_when_unnamed() {
        let document = parse_document("{ hello }");
        assert!(select_operation(&document, None).is_ok());
    }

    #[test]
    fn requires_a_name_when_several_operations_are_present() {
        let document = parse_document("query A { hello } query B { hello }");
        assert!(select_operation(&document, None).is_err());
        assert!(select_operation(&document, Some("A")).is_ok());
        assert!(select_operation(&document, Some("Missing")).is_err());
    }
}
