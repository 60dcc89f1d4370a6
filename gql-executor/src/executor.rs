//! The asynchronous execution engine: `execute` walks a validated document
//! against a schema and a host [`Resolver`], producing an
//! [`ExecutionOutcome`] by running the full field-collection,
//! argument-coercion, and non-null/list propagation algorithm.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Instant;

use async_recursion::async_recursion;
use futures::future::join_all;
use gql_diagnostics::{extend_path, field, GraphQLError, PathSegment};
use gql_language::ast::{Directive, Document, Field, FragmentDefinition, OperationType, Selection, SelectionSet, Value as AstValue};
use gql_types::{NamedType, Schema, TypeRef};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::arguments::coerce_argument_values;
use crate::cancellation::CancellationToken;
use crate::instrumentation::{Instrumentation, NOOP};
use crate::operation::select_operation;
use crate::resolver::{Info, Resolver};
use crate::variables::coerce_variable_values;
use crate::{Intermediate, Typename};

/// Everything one call to [`execute`] (or [`crate::subscribe::subscribe`])
/// needs besides the schema and document: the resolver and root value it
/// walks, the variables supplied with the request, and the knobs a host
/// rarely needs to touch. Built with the same "required fields up front,
/// optional knobs via `with_*`" shape `kono_executor`'s own request types
/// use.
pub struct ExecutionInput<'a, R: Resolver> {
    pub(crate) resolver: &'a R,
    pub(crate) root_value: &'a R::Value,
    pub(crate) context: &'a R::Context,
    pub(crate) variables: IndexMap<String, JsonValue>,
    pub(crate) operation_name: Option<String>,
    pub(crate) cancellation: CancellationToken,
    pub(crate) instrumentation: &'a dyn Instrumentation,
}

impl<'a, R: Resolver> ExecutionInput<'a, R> {
    pub fn new(resolver: &'a R, root_value: &'a R::Value, context: &'a R::Context) -> ExecutionInput<'a, R> {
        ExecutionInput {
            resolver,
            root_value,
            context,
            variables: IndexMap::new(),
            operation_name: None,
            cancellation: CancellationToken::new(),
            instrumentation: &NOOP,
        }
    }

    pub fn with_variables(mut self, variables: IndexMap<String, JsonValue>) -> ExecutionInput<'a, R> {
        self.variables = variables;
        self
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> ExecutionInput<'a, R> {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> ExecutionInput<'a, R> {
        self.cancellation = cancellation;
        self
    }

    pub fn with_instrumentation(mut self, instrumentation: &'a dyn Instrumentation) -> ExecutionInput<'a, R> {
        self.instrumentation = instrumentation;
        self
    }
}

/// The result of a single request: a `data` tree (absent only when the
/// whole operation failed before execution began, e.g. an unknown
/// operation name) alongside whatever errors accumulated along the way.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub data: Option<JsonValue>,
    pub errors: Vec<GraphQLError>,
}

/// Runs `document` (optionally narrowed to `operation_name`) against
/// `schema`, using `input`'s resolver and root value, returning the
/// complete response.
pub async fn execute<'a, R: Resolver>(
    schema: &'a Schema,
    document: &'a Document,
    input: ExecutionInput<'a, R>,
) -> ExecutionOutcome {
    let start = Instant::now();

    let operation = match select_operation(document, input.operation_name.as_deref()) {
        Ok(operation) => operation,
        Err(error) => {
            input.instrumentation.on_execute(start.elapsed(), std::slice::from_ref(&error));
            return ExecutionOutcome { data: None, errors: vec![error] };
        }
    };

    let variables = match coerce_variable_values(schema, &operation.variable_definitions, &input.variables) {
        Ok(variables) => variables,
        Err(error) => {
            input.instrumentation.on_execute(start.elapsed(), std::slice::from_ref(&error));
            return ExecutionOutcome { data: None, errors: vec![error] };
        }
    };

    let fragments: IndexMap<&str, &FragmentDefinition> =
        document.fragments().map(|fragment| (fragment.name.value.as_str(), fragment)).collect();

    let execution = Execution {
        schema,
        document,
        fragments,
        variables,
        resolver: input.resolver,
        cancellation: input.cancellation,
        instrumentation: input.instrumentation,
        errors: Mutex::new(Vec::new()),
    };

    let root_type_name = match operation.operation {
        OperationType::Query => schema.query_type().name(),
        OperationType::Mutation => match schema.mutation_type() {
            Some(ty) => ty.name(),
            None => {
                let error = GraphQLError::new("Schema is not configured for mutations.");
                input.instrumentation.on_execute(start.elapsed(), std::slice::from_ref(&error));
                return ExecutionOutcome { data: None, errors: vec![error] };
            }
        },
        OperationType::Subscription => match schema.subscription_type() {
            Some(ty) => ty.name(),
            None => {
                let error = GraphQLError::new("Schema is not configured for subscriptions.");
                input.instrumentation.on_execute(start.elapsed(), std::slice::from_ref(&error));
                return ExecutionOutcome { data: None, errors: vec![error] };
            }
        },
    };

    let concurrent = operation.operation != OperationType::Mutation;
    let result = execution
        .execute_selection_set(
            input.root_value,
            root_type_name,
            &operation.selection_set,
            input.context,
            Vec::new(),
            concurrent,
        )
        .await;

    let errors = execution.errors.into_inner().unwrap_or_default();
    input.instrumentation.on_execute(start.elapsed(), &errors);

    ExecutionOutcome { data: Some(result.unwrap_or(JsonValue::Null)), errors }
}

/// Owns everything held in common across one request's recursive walk:
/// the schema, the parsed document and its fragments, the coerced
/// variables, and the accumulating error list every field-level failure
/// is reported into.
pub(crate) struct Execution<'a, R: Resolver> {
    pub(crate) schema: &'a Schema,
    pub(crate) document: &'a Document,
    pub(crate) fragments: IndexMap<&'a str, &'a FragmentDefinition>,
    pub(crate) variables: IndexMap<String, JsonValue>,
    pub(crate) resolver: &'a R,
    pub(crate) cancellation: CancellationToken,
    pub(crate) instrumentation: &'a dyn Instrumentation,
    pub(crate) errors: Mutex<Vec<GraphQLError>>,
}

impl<'a, R: Resolver> Execution<'a, R> {
    pub(crate) fn push_error(&self, error: GraphQLError, path: &[PathSegment]) {
        let error = if error.path.is_none() { error.with_path(path.to_vec()) } else { error };
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(error);
        }
    }

    /// Records `error` and returns the value this field or list element
    /// must take: `Err(())` if `non_null` (propagate the failure to the
    /// nearest nullable ancestor), `Ok(Null)` otherwise (absorbed here).
    pub(crate) fn fail(&self, error: GraphQLError, path: &[PathSegment], non_null: bool) -> Result<JsonValue, ()> {
        self.push_error(error, path);
        if non_null {
            Err(())
        } else {
            Ok(JsonValue::Null)
        }
    }

    fn is_skipped(&self, directives: &[Directive]) -> bool {
        for directive in directives {
            let included = match directive.name.value.as_str() {
                "skip" => !self.directive_if_argument(directive),
                "include" => self.directive_if_argument(directive),
                _ => continue,
            };
            if !included {
                return true;
            }
        }
        false
    }

    fn directive_if_argument(&self, directive: &Directive) -> bool {
        match directive.argument("if") {
            Some(AstValue::Variable(variable)) => {
                self.variables.get(&variable.name.value).and_then(JsonValue::as_bool).unwrap_or(false)
            }
            Some(AstValue::Boolean(value)) => value.value,
            _ => false,
        }
    }

    /// CollectFields: groups a selection set's fields by response key,
    /// expanding fragment spreads and inline fragments whose type
    /// condition applies to `object_type_name`, honoring `@skip`/
    /// `@include` along the way.
    pub(crate) fn collect_fields<'b>(
        &'b self,
        object_type_name: &str,
        selection_set: &'b SelectionSet,
        visited_fragments: &mut HashSet<&'b str>,
    ) -> IndexMap<&'b str, Vec<&'b Field>> {
        let mut grouped: IndexMap<&str, Vec<&Field>> = IndexMap::new();

        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => {
                    if self.is_skipped(&field.directives) {
                        continue;
                    }
                    grouped.entry(field.response_key()).or_default().push(field);
                }
                Selection::FragmentSpread(spread) => {
                    if self.is_skipped(&spread.directives) {
                        continue;
                    }
                    let name = spread.fragment_name.value.as_str();
                    if !visited_fragments.insert(name) {
                        continue;
                    }
                    let Some(fragment) = self.fragments.get(name) else { continue };
                    if !self.schema.is_possible_type(&fragment.type_condition.value, object_type_name) {
                        continue;
                    }
                    for (key, fields) in self.collect_fields(object_type_name, &fragment.selection_set, visited_fragments) {
                        grouped.entry(key).or_default().extend(fields);
                    }
                }
                Selection::InlineFragment(fragment) => {
                    if self.is_skipped(&fragment.directives) {
                        continue;
                    }
                    if let Some(type_condition) = &fragment.type_condition {
                        if !self.schema.is_possible_type(&type_condition.value, object_type_name) {
                            continue;
                        }
                    }
                    for (key, fields) in self.collect_fields(object_type_name, &fragment.selection_set, visited_fragments) {
                        grouped.entry(key).or_default().extend(fields);
                    }
                }
            }
        }

        grouped
    }

    #[async_recursion(?Send)]
    pub(crate) async fn execute_selection_set<'b>(
        &'b self,
        object_value: &'b R::Value,
        object_type_name: &'b str,
        selection_set: &'b SelectionSet,
        context: &'b R::Context,
        path: Vec<PathSegment>,
        concurrent: bool,
    ) -> Result<JsonValue, ()>
    where
        'b: 'async_recursion,
    {
        let grouped_fields = self.collect_fields(object_type_name, selection_set, &mut HashSet::new());
        let keys: Vec<&str> = grouped_fields.keys().copied().collect();
        let futures = grouped_fields.iter().map(|(key, fields)| {
            let field_path = extend_path(&path, (*key).to_owned());
            self.execute_field(object_value, object_type_name, fields[0], context, field_path)
        });

        let results: Vec<Result<JsonValue, ()>> = if concurrent {
            join_all(futures).await
        } else {
            let mut results = Vec::with_capacity(grouped_fields.len());
            for future in futures {
                results.push(future.await);
            }
            results
        };

        let mut map = IndexMap::new();
        for (key, result) in keys.into_iter().zip(results) {
            match result {
                Ok(value) => {
                    map.insert(key.to_owned(), value);
                }
                Err(()) => return Err(()),
            }
        }

        Ok(JsonValue::Object(map.into_iter().collect()))
    }

    #[async_recursion(?Send)]
    async fn execute_field<'b>(
        &'b self,
        object_value: &'b R::Value,
        object_type_name: &'b str,
        field_node: &'b Field,
        context: &'b R::Context,
        path: Vec<PathSegment>,
    ) -> Result<JsonValue, ()>
    where
        'b: 'async_recursion,
    {
        if self.cancellation.is_cancelled() {
            return self.fail(field::cancelled(), &path, true);
        }

        let field_name = field_node.name.value.as_str();

        if field_name == "__typename" {
            return Ok(JsonValue::String(object_value.typename().into_owned()));
        }

        if object_type_name == self.schema.query_type().name() {
            if field_name == "__schema" {
                let node = gql_introspection::schema_value(self.schema);
                return Ok(gql_introspection::render(
                    node,
                    field_node.selection_set.as_ref(),
                    self.document,
                    &self.variables,
                    self.schema,
                ));
            }
            if field_name == "__type" {
                let name = gql_introspection::string_argument(field_node, "name", &self.variables).unwrap_or_default();
                let node = gql_introspection::type_value(self.schema, &name);
                return Ok(gql_introspection::render(
                    node,
                    field_node.selection_set.as_ref(),
                    self.document,
                    &self.variables,
                    self.schema,
                ));
            }
        }

        let field_def = match self.schema.ty(object_type_name).and_then(|ty| ty.fields()).and_then(|fields| fields.get(field_name))
        {
            Some(field_def) => field_def,
            None => return self.fail(field::unknown_field(object_type_name, field_name), &path, true),
        };

        let arguments = match coerce_argument_values(self.schema, &field_def.args, &field_node.arguments, &self.variables) {
            Ok(arguments) => arguments,
            Err(error) => return self.fail(error, &path, field_def.ty.is_non_null()),
        };

        let info = Info { schema: self.schema, field_name, return_type: &field_def.ty, path: &path };

        let start = Instant::now();
        let resolved = self.resolver.resolve(object_value, field_name, &arguments, context, &info).await;
        self.instrumentation.on_resolve_field(field_name, start.elapsed(), resolved.is_ok());

        let intermediate = match resolved {
            Ok(intermediate) => intermediate,
            Err(error) => return self.fail(error, &path, field_def.ty.is_non_null()),
        };

        self.complete_value(&field_def.ty, intermediate, field_node, context, path).await
    }

    #[async_recursion(?Send)]
    async fn complete_value<'b>(
        &'b self,
        ty: &'b TypeRef,
        intermediate: Intermediate<R::Value>,
        field_node: &'b Field,
        context: &'b R::Context,
        path: Vec<PathSegment>,
    ) -> Result<JsonValue, ()>
    where
        'b: 'async_recursion,
    {
        let core = ty.nullable();
        let result = self.complete_value_core(core, intermediate, field_node, context, &path).await;

        if ty.is_non_null() {
            match result {
                Ok(JsonValue::Null) => self.fail(field::non_null_violation(field_node.response_key()), &path, true),
                other => other,
            }
        } else {
            match result {
                Err(()) => Ok(JsonValue::Null),
                ok => ok,
            }
        }
    }

    async fn complete_value_core<'b>(
        &'b self,
        core: &'b TypeRef,
        intermediate: Intermediate<R::Value>,
        field_node: &'b Field,
        context: &'b R::Context,
        path: &[PathSegment],
    ) -> Result<JsonValue, ()> {
        match core {
            TypeRef::NonNull(_) => unreachable!("complete_value strips its own NonNull wrapper before dispatch"),
            TypeRef::List(element_type) => {
                let items: Option<Vec<Intermediate<R::Value>>> = match intermediate {
                    Intermediate::Value(JsonValue::Null) => None,
                    Intermediate::Collection(items) => Some(items),
                    Intermediate::Value(JsonValue::Array(values)) => {
                        Some(values.into_iter().map(Intermediate::Value).collect())
                    }
                    _ => {
                        return self.fail(
                            GraphQLError::new(format_args!("expected a list for field \"{}\"", field_node.response_key())),
                            path,
                            false,
                        )
                    }
                };

                match items {
                    None => Ok(JsonValue::Null),
                    Some(items) => {
                        let futures = items.into_iter().enumerate().map(|(index, item)| {
                            let item_path = extend_path(path, index);
                            self.complete_value(element_type, item, field_node, context, item_path)
                        });
                        let mut out = Vec::new();
                        for result in join_all(futures).await {
                            out.push(result?);
                        }
                        Ok(JsonValue::Array(out))
                    }
                }
            }
            TypeRef::Named(name) => match self.schema.ty(name) {
                Some(NamedType::Scalar(_)) => self.complete_leaf_value(name, intermediate, field_node, path),
                Some(NamedType::Enum(enum_type)) => match intermediate {
                    Intermediate::Value(JsonValue::Null) => Ok(JsonValue::Null),
                    Intermediate::Value(JsonValue::String(value)) if enum_type.values.contains_key(&value) => {
                        Ok(JsonValue::String(value))
                    }
                    _ => self.fail(
                        GraphQLError::new(format_args!("value does not match any value of enum {} in field \"{}\"", name, field_node.response_key())),
                        path,
                        false,
                    ),
                },
                Some(NamedType::Object(object_type)) => match intermediate {
                    Intermediate::Value(JsonValue::Null) => Ok(JsonValue::Null),
                    Intermediate::Object(object_value) => match field_node.selection_set.as_ref() {
                        Some(selection_set) => {
                            self.execute_selection_set(&object_value, &object_type.name, selection_set, context, path.to_vec(), true)
                                .await
                        }
                        None => self.fail(
                            GraphQLError::new(format_args!("field \"{}\" of type {} requires a selection set", field_node.response_key(), name)),
                            path,
                            false,
                        ),
                    },
                    _ => self.fail(
                        GraphQLError::new(format_args!("expected an object value for field \"{}\"", field_node.response_key())),
                        path,
                        false,
                    ),
                },
                Some(NamedType::Interface(_)) | Some(NamedType::Union(_)) => match intermediate {
                    Intermediate::Value(JsonValue::Null) => Ok(JsonValue::Null),
                    Intermediate::Object(object_value) => {
                        let runtime_type = object_value.typename().into_owned();
                        if !self.schema.is_possible_type(name, &runtime_type) {
                            return self.fail(field::unresolved_abstract_type(name), path, false);
                        }
                        match field_node.selection_set.as_ref() {
                            Some(selection_set) => {
                                self.execute_selection_set(&object_value, &runtime_type, selection_set, context, path.to_vec(), true)
                                    .await
                            }
                            None => self.fail(
                                GraphQLError::new(format_args!("field \"{}\" of type {} requires a selection set", field_node.response_key(), name)),
                                path,
                                false,
                            ),
                        }
                    }
                    _ => self.fail(field::unresolved_abstract_type(name), path, false),
                },
                _ => self.fail(
                    GraphQLError::new(format_args!("\"{}\" is not a valid output type", name)),
                    path,
                    false,
                ),
            },
        }
    }

    fn complete_leaf_value(&self, type_name: &str, intermediate: Intermediate<R::Value>, field_node: &Field, path: &[PathSegment]) -> Result<JsonValue, ()> {
        let value = match intermediate {
            Intermediate::Value(value) => value,
            _ => {
                return self.fail(
                    GraphQLError::new(format_args!("expected a scalar value for field \"{}\"", field_node.response_key())),
                    path,
                    false,
                )
            }
        };

        if value.is_null() {
            return Ok(JsonValue::Null);
        }

        match gql_types::serialize_scalar(type_name, &value) {
            Ok(serialized) => Ok(serialized),
            Err(detail) => self.fail(GraphQLError::new(format_args!("{} in field \"{}\"", detail, field_node.response_key())), path, false),
        }
    }
}
