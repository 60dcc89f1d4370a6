//! Subscriptions: resolving the subscription root field produces a lazy
//! *event source* rather than a value; each event that source emits then
//! runs through the same selection-set completion pipeline
//! [`crate::executor::execute`] uses for any other field, producing one
//! result map per event.
//!
//! Backpressure: the returned stream pulls one source event at a time and
//! only starts completing it once polled, so nothing buffers beyond the
//! single in-flight result.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{Stream, StreamExt};
use gql_diagnostics::{field, GraphQLError};
use gql_language::ast::{Document, FragmentDefinition, OperationType};
use gql_types::Schema;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::arguments::coerce_argument_values;
use crate::executor::{Execution, ExecutionInput, ExecutionOutcome};
use crate::operation::select_operation;
use crate::resolver::{Info, Resolver};
use crate::variables::coerce_variable_values;

/// Implemented by a resolver that can additionally produce a subscription
/// root field's event source. Kept as its own trait (rather than a third
/// [`Resolver`](crate::Resolver) method every query/mutation-only resolver
/// would have to stub out) since only servers that actually expose
/// subscriptions need to implement `CreateSourceEventStream`.
pub trait EventResolver: Resolver {
    /// Resolves `field_name` on the subscription root to an asynchronous
    /// sequence of source values. Each emitted value re-enters
    /// [`Resolver::resolve`] as the object being selected against, the same
    /// way the subscription root field's own resolved value would for an
    /// ordinary query.
    fn subscribe<'a>(
        &'a self,
        root_value: &'a Self::Value,
        field_name: &'a str,
        arguments: &'a IndexMap<String, JsonValue>,
        context: &'a Self::Context,
        info: &'a Info<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<Pin<Box<dyn Stream<Item = Self::Value> + 'a>>, GraphQLError>> + 'a>>;
}

/// Runs the `CreateSourceEventStream` half of a subscription: selects the
/// operation, coerces variables, resolves the lone root field
/// to its event source, and returns a lazy sequence of [`ExecutionOutcome`]
/// — one per event, each produced by re-running the ordinary selection-set
/// completion pipeline against that event's payload.
pub async fn subscribe<'a, R: EventResolver>(
    schema: &'a Schema,
    document: &'a Document,
    input: ExecutionInput<'a, R>,
) -> Result<Pin<Box<dyn Stream<Item = ExecutionOutcome> + 'a>>, GraphQLError> {
    let operation = select_operation(document, input.operation_name.as_deref())?;

    if operation.operation != OperationType::Subscription {
        return Err(GraphQLError::new("subscribe() requires a subscription operation; use execute() instead"));
    }

    let subscription_type = schema
        .subscription_type()
        .ok_or_else(|| GraphQLError::new("Schema is not configured for subscriptions."))?;

    let variables = coerce_variable_values(schema, &operation.variable_definitions, &input.variables)?;

    let fragments: IndexMap<&str, &FragmentDefinition> =
        document.fragments().map(|fragment| (fragment.name.value.as_str(), fragment)).collect();

    let execution = Execution {
        schema,
        document,
        fragments,
        variables,
        resolver: input.resolver,
        cancellation: input.cancellation.clone(),
        instrumentation: input.instrumentation,
        errors: std::sync::Mutex::new(Vec::new()),
    };

    let mut grouped = execution.collect_fields(subscription_type.name(), &operation.selection_set, &mut Default::default());
    if grouped.len() != 1 {
        return Err(GraphQLError::new("Subscription operation must select exactly one root field."));
    }
    let (_, fields) = grouped.shift_remove_index(0).expect("grouped has exactly one entry");
    let field_node = fields[0];
    let field_name = field_node.name.value.as_str();

    let field_def = subscription_type
        .fields()
        .and_then(|map| map.get(field_name))
        .ok_or_else(|| field::unknown_field(subscription_type.name(), field_name))?;

    let arguments = coerce_argument_values(schema, &field_def.args, &field_node.arguments, &execution.variables)?;
    let info = Info { schema, field_name, return_type: &field_def.ty, path: &[] };

    let source_stream = input
        .resolver
        .subscribe(input.root_value, field_name, &arguments, input.context, &info)
        .await?;

    let selection_set = field_node.selection_set.clone();
    let root_type_name = subscription_type.name().to_owned();
    let context = input.context;
    let resolver = input.resolver;
    let cancellation = input.cancellation;
    let instrumentation = input.instrumentation;

    let outcomes = source_stream.then(move |event_value| {
        let fragments: IndexMap<&str, &FragmentDefinition> =
            document.fragments().map(|fragment| (fragment.name.value.as_str(), fragment)).collect();
        let event_execution = Execution {
            schema,
            document,
            fragments,
            variables: execution.variables.clone(),
            resolver,
            cancellation: cancellation.clone(),
            instrumentation,
            errors: std::sync::Mutex::new(Vec::new()),
        };
        let selection_set = selection_set.clone();
        let root_type_name = root_type_name.clone();
        async move {
            let Some(selection_set) = selection_set.as_ref() else {
                return ExecutionOutcome {
                    data: None,
                    errors: vec![GraphQLError::new("subscription root field requires a selection set")],
                };
            };
            let result =
                event_execution.execute_selection_set(&event_value, &root_type_name, selection_set, context, Vec::new(), true).await;
            let errors = event_execution.errors.into_inner().unwrap_or_default();
            ExecutionOutcome { data: Some(result.unwrap_or(JsonValue::Null)), errors }
        }
    });

    Ok(Box::pin(outcomes))
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use futures::stream::{self, Stream, StreamExt};
    use gql_diagnostics::GraphQLError;
    use gql_language::lex::{tokenize, Source};
    use gql_language::parse;
    use indexmap::IndexMap;
    use serde_json::{json, Value as JsonValue};

    use super::*;
    use crate::{Intermediate, Typename};

    #[derive(Debug)]
    struct Event(i64);

    impl Typename for Event {
        fn typename(&self) -> std::borrow::Cow<'_, str> {
            "Subscription".into()
        }
    }

    struct CounterResolver;

    impl Resolver for CounterResolver {
        type Context = ();
        type Value = Event;

        fn can_resolve(&self, _object_value: &Event, _field_name: &str, _context: &()) -> bool {
            true
        }

        fn resolve<'a>(
            &'a self,
            object_value: &'a Event,
            field_name: &'a str,
            _arguments: &'a IndexMap<String, JsonValue>,
            _context: &'a (),
            _info: &'a Info<'a>,
        ) -> Pin<Box<dyn Future<Output = Result<Intermediate<Event>, GraphQLError>> + 'a>> {
            assert_eq!(field_name, "count");
            Box::pin(async move { Ok(Intermediate::Value(json!(object_value.0))) })
        }
    }

    impl EventResolver for CounterResolver {
        fn subscribe<'a>(
            &'a self,
            _root_value: &'a Event,
            field_name: &'a str,
            _arguments: &'a IndexMap<String, JsonValue>,
            _context: &'a (),
            _info: &'a Info<'a>,
        ) -> Pin<Box<dyn Future<Output = Result<Pin<Box<dyn Stream<Item = Event> + 'a>>, GraphQLError>> + 'a>> {
            assert_eq!(field_name, "countUp");
            Box::pin(async move {
                let events: Pin<Box<dyn Stream<Item = Event>>> = Box::pin(stream::iter([Event(1), Event(2), Event(3)]));
                Ok(events)
            })
        }
    }

    fn parse_document(source: &str) -> Document {
        let source = Source::new(source.to_owned());
        let tokens = tokenize(&source.body).unwrap();
        parse(&tokens, &source).unwrap()
    }

    #[test]
    fn yields_one_result_per_event() {
        futures::executor::block_on(async {
            let schema = gql_types::build("type Query { hello: String } type Subscription { countUp: Int }").unwrap();
            let document = parse_document("subscription { countUp }");
            let root = Event(0);
            let input = ExecutionInput::new(&CounterResolver, &root, &());

            let stream = subscribe(&schema, &document, input).await.unwrap();
            let outcomes: Vec<ExecutionOutcome> = stream.collect().await;

            assert_eq!(outcomes.len(), 3);
            assert_eq!(outcomes[0].data, Some(json!({"countUp": 1})));
            assert_eq!(outcomes[2].data, Some(json!({"countUp": 3})));
        });
    }

    #[test]
    fn rejects_a_query_operation() {
        futures::executor::block_on(async {
            let schema = gql_types::build("type Query { hello: String } type Subscription { countUp: Int }").unwrap();
            let document = parse_document("{ hello }");
            let root = Event(0);
            let input = ExecutionInput::new(&CounterResolver, &root, &());

            assert!(subscribe(&schema, &document, input).await.is_err());
        });
    }
}
