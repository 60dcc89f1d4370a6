//! Lets several resolvers cover the same schema by composing them into a
//! tuple: `(a, b)` tries `a` first, then `b`, so unrelated resolvers can
//! share one executor without either knowing about the other.

use std::future::Future;
use std::pin::Pin;

use gql_diagnostics::GraphQLError;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::resolver::{Info, Resolver};
use crate::Intermediate;

macro_rules! impl_tuple {
    ($first:ident $($name:ident)+) => {
        #[allow(non_snake_case)]
        impl<$first, $($name),+> Resolver for ($first, $($name),+)
        where
            $first: Resolver,
            $($name: Resolver<Context = $first::Context, Value = $first::Value>,)+
        {
            type Context = $first::Context;
            type Value = $first::Value;

            fn can_resolve(&self, object_value: &Self::Value, field_name: &str, context: &Self::Context) -> bool {
                let ($first, $($name),+) = self;
                $first.can_resolve(object_value, field_name, context) $(|| $name.can_resolve(object_value, field_name, context))+
            }

            fn resolve<'a>(
                &'a self,
                object_value: &'a Self::Value,
                field_name: &'a str,
                arguments: &'a IndexMap<String, JsonValue>,
                context: &'a Self::Context,
                info: &'a Info<'a>,
            ) -> Pin<Box<dyn Future<Output = Result<Intermediate<Self::Value>, GraphQLError>> + 'a>> {
                let ($first, $($name),+) = self;
                Box::pin(async move {
                    if $first.can_resolve(object_value, field_name, context) {
                        return $first.resolve(object_value, field_name, arguments, context, info).await;
                    }
                    $(if $name.can_resolve(object_value, field_name, context) {
                        return $name.resolve(object_value, field_name, arguments, context, info).await;
                    })+
                    Err(GraphQLError::new(format_args!(
                        "no resolver in the chain claims field \"{}\"",
                        field_name
                    )))
                })
            }
        }
    }
}

impl_tuple!(A B);
impl_tuple!(A B C);
impl_tuple!(A B C D);
impl_tuple!(A B C D E);
impl_tuple!(A B C D E F);
