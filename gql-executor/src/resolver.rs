use std::future::Future;
use std::pin::Pin;

use gql_diagnostics::{GraphQLError, PathSegment};
use gql_types::{Schema, TypeRef};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::{Intermediate, Typename};

/// Everything a resolver gets besides the object value and its coerced
/// arguments: the field's declared return type, the response path so far,
/// and the schema it's resolving against — the `info` half of a
/// `(source, args, context, info)` resolver signature.
pub struct Info<'a> {
    pub schema: &'a Schema,
    pub field_name: &'a str,
    pub return_type: &'a TypeRef,
    pub path: &'a [PathSegment],
}

/// Implemented by the host application to resolve fields against its own
/// object values. `can_resolve`/`resolve` are kept as two separate methods
/// (rather than folding "unknown field" into resolve's error type) so the
/// executor can tell a deliberate "this resolver doesn't own this field"
/// from an actual resolution failure.
pub trait Resolver {
    /// Whatever a particular request needs threaded through every
    /// resolver call: a database handle, an authenticated viewer, a loader
    /// cache.
    type Context;

    /// The resolver's own value representation for an object that still
    /// has a sub-selection pending. Carries enough information to answer
    /// `__typename` for abstract-type resolution.
    type Value: Typename;

    fn can_resolve(&self, object_value: &Self::Value, field_name: &str, context: &Self::Context) -> bool;

    /// Resolves `field_name` on `object_value`. Only called when
    /// [`Resolver::can_resolve`] returned `true`. Returns a boxed future
    /// rather than requiring an `async-trait`-style macro, since this
    /// workspace has no macro crate of its own to generate one.
    fn resolve<'a>(
        &'a self,
        object_value: &'a Self::Value,
        field_name: &'a str,
        arguments: &'a IndexMap<String, JsonValue>,
        context: &'a Self::Context,
        info: &'a Info<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<Intermediate<Self::Value>, GraphQLError>> + 'a>>;
}
