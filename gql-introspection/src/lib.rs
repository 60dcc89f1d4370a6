//! Built-in introspection: the `__Schema`/`__Type`/`__Field`/`__InputValue`/
//! `__EnumValue`/`__Directive`/`__TypeKind`/`__DirectiveLocation` meta-types
//! that a built [`Schema`](gql_types::Schema) carries, and the root
//! `__schema`/`__type` meta-fields a query can select, exposed as ordinary
//! fields through a small synchronous engine of its own, since there is no
//! generic aspect/resolver system to dispatch introspection through.
//! `gql-executor` calls into this crate whenever a selection hits
//! `__schema` or `__type` on the query root, and defers to it for the rest
//! of that sub-tree.

mod node;
mod resolve;

pub use node::{Node, TypeWrap};
pub use resolve::{render, schema_value, string_argument, type_value};
