//! The public, language-neutral API: parse GraphQL source into an AST,
//! print it back, walk/edit it with a visitor, build a [`Schema`] from
//! SDL, validate a request document against one, and execute or subscribe
//! to it. Each function here is a thin wrapper tying two or three of the
//! workspace's crates together into the single request pipeline: Source →
//! Lexer → Parser → AST → Validator → Executor.

pub use gql_compiler::Compiler;
pub use gql_diagnostics::{GraphQLError, PathSegment, SourceLocation};
pub use gql_language::ast::{
    editor::{edit_document as visit, Action, Ancestors, AstNode, Editor},
    Document,
};
pub use gql_language::lex::{tokenize, Source};
pub use gql_language::print::{print, print_type, print_value};
pub use gql_types::{
    build as build_schema, build_ast as build_ast_schema, print_schema, BuildOptions, Schema,
};
pub use gql_validation::validate;

pub use gql_executor::{
    execute, select_operation, subscribe, CancellationToken, EventResolver, ExecutionInput,
    ExecutionOutcome, Info, Instrumentation, Intermediate, NoopInstrumentation, Resolver, Typename,
};

use gql_language::ast::{strip_locations, Type, Value};
use gql_language::syn;

#[doc(inline)]
pub use gql_compiler as compiler;
#[doc(inline)]
pub use gql_executor as executor;
#[doc(inline)]
pub use gql_introspection as introspection;
#[doc(inline)]
pub use gql_language as language;
#[doc(inline)]
pub use gql_types as types;
#[doc(inline)]
pub use gql_validation as validation;

/// Options accepted by [`parse`], mirroring the single knob graphql-js's
/// own `parse(source, options)` exposes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// When set, every [`gql_language::lex::Span`] in the resulting
    /// document's executable definitions is cleared, the way
    /// `parse(source, { noLocation: true })` omits `loc` from every node.
    pub no_location: bool,
}

/// Tokenizes and parses `source` into a [`Document`].
pub fn parse(source: impl Into<Source>, options: ParseOptions) -> Result<Document, GraphQLError> {
    let source = source.into();
    let tokens = tokenize(&source.body)?;
    let document = syn::parse(&tokens, &source)?;
    Ok(if options.no_location { strip_locations(document) } else { document })
}

/// Parses a standalone value literal, e.g. as accepted for a default value
/// or a JSON variable.
pub fn parse_value(source: &str) -> Result<Value, GraphQLError> {
    let source = Source::new(source.to_owned());
    let tokens = tokenize(&source.body)?;
    syn::parse_value(&tokens, &source, true)
}

/// Parses a standalone type reference, e.g. `[String!]!`.
pub fn parse_type(source: &str) -> Result<Type, GraphQLError> {
    let source = Source::new(source.to_owned());
    let tokens = tokenize(&source.body)?;
    syn::parse_type(&tokens, &source)
}

/// Parses `query` and reports whether its selected (or lone) operation is a
/// subscription — the wire-format `isSubscription` predicate a transport
/// uses to route a request to `subscribe` instead of `execute`.
pub fn is_subscription(query: &str, operation_name: Option<&str>) -> Result<bool, GraphQLError> {
    let document = parse(query, ParseOptions::default())?;
    let operation = select_operation(&document, operation_name)?;
    Ok(operation.operation == gql_language::ast::OperationType::Subscription)
}

/// A convenience entry point: `graphql(schema, request_string, ...)` —
/// parse, validate and execute a request in one call, short-circuiting
/// with no `data` the moment any phase fails. Equivalent to running
/// [`parse`], [`validate`] and [`execute`] by hand, for callers that don't
/// need to inspect the intermediate document.
pub async fn graphql<R: Resolver>(
    schema: &Schema,
    request: &str,
    input: ExecutionInput<'_, R>,
) -> ExecutionOutcome {
    let document = match parse(request, ParseOptions::default()) {
        Ok(document) => document,
        Err(error) => return ExecutionOutcome { data: None, errors: vec![error] },
    };

    let errors = validate(schema, &document);
    if !errors.is_empty() {
        return ExecutionOutcome { data: None, errors };
    }

    execute(schema, &document, input).await
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value as JsonValue};
    use std::borrow::Cow;
    use std::future::Future;
    use std::pin::Pin;

    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn parse_with_no_location_clears_spans() {
        let document = parse("{ a }", ParseOptions { no_location: true }).unwrap();
        assert!(document.span.is_none());
        assert_eq!(document.operations().count(), 1);
    }

    #[test]
    fn parse_keeps_locations_by_default() {
        let document = parse("{ a }", ParseOptions::default()).unwrap();
        assert!(document.span.is_some());
    }

    #[test]
    fn print_round_trips_a_parsed_document() {
        let document = parse("query Greeting { hello world }", ParseOptions::default()).unwrap();
        let printed = print(&document);
        let reparsed = parse(printed.as_str(), ParseOptions::default()).unwrap();
        assert_eq!(document, reparsed);
    }

    #[test]
    fn print_schema_round_trips_through_build_schema() {
        let schema = build_schema("type Query { hello: String }").unwrap();
        let sdl = print_schema(&schema);
        let rebuilt = build_schema(&sdl).unwrap();
        assert_eq!(rebuilt.types().count(), schema.types().count());
    }

    #[test]
    fn is_subscription_distinguishes_operation_kinds() {
        assert!(!is_subscription("{ hello }", None).unwrap());
        assert!(is_subscription("subscription { countUp }", None).unwrap());
    }

    #[derive(Debug)]
    struct World;

    impl Typename for World {
        fn typename(&self) -> Cow<'_, str> {
            "Query".into()
        }
    }

    struct Hello;

    impl Resolver for Hello {
        type Context = ();
        type Value = World;

        fn can_resolve(&self, _object_value: &World, _field_name: &str, _context: &()) -> bool {
            true
        }

        fn resolve<'a>(
            &'a self,
            _object_value: &'a World,
            field_name: &'a str,
            _arguments: &'a IndexMap<String, JsonValue>,
            _context: &'a (),
            _info: &'a Info<'a>,
        ) -> Pin<Box<dyn Future<Output = Result<Intermediate<World>, GraphQLError>> + 'a>> {
            assert_eq!(field_name, "hello");
            Box::pin(async move { Ok(Intermediate::Value(json!("world"))) })
        }
    }

    #[test]
    fn graphql_convenience_function_parses_validates_and_executes() {
        futures::executor::block_on(async {
            let schema = build_schema("type Query { hello: String }").unwrap();
            let root = World;
            let input = ExecutionInput::new(&Hello, &root, &());

            let outcome = graphql(&schema, "{ hello }", input).await;

            assert!(outcome.errors.is_empty());
            assert_eq!(outcome.data, Some(json!({"hello": "world"})));
        });
    }

    #[test]
    fn graphql_convenience_function_reports_validation_errors_without_executing() {
        futures::executor::block_on(async {
            let schema = build_schema("type Query { hello: String }").unwrap();
            let root = World;
            let input = ExecutionInput::new(&Hello, &root, &());

            let outcome = graphql(&schema, "{ bogus }", input).await;

            assert!(outcome.data.is_none());
            assert!(!outcome.errors.is_empty());
        });
    }
}
