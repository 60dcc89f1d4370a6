//! The runtime schema model and the SDL-to-schema builder.
//!
//! Where `gql_language::ast` is the parsed, source-shaped tree of a type
//! system document, [`Schema`] is its validated, owned, read-only
//! counterpart: every named type resolved, every extension merged, every
//! implicit built-in (scalars, introspection types, directives) injected.
//! A `Schema` is built once per server start (via [`build`] /
//! [`build_ast`]) and then shared across every concurrent request.

mod argument;
mod builder;
mod directive;
mod directive_use;
mod enum_type;
mod field;
mod input_object;
mod named_type;
mod object;
pub mod print;
mod scalar;
mod schema;
mod scalar_coercion;
mod type_ref;

pub use argument::{InputValue, InputValueMap};
pub use builder::{build, build_ast, BuildOptions};
pub use directive::{DirectiveLocation, DirectiveType};
pub use directive_use::DirectiveUse;
pub use enum_type::{EnumType, EnumValueType};
pub use field::{Deprecation, FieldMap, FieldType, RootOperation};
pub use input_object::InputObjectType;
pub use named_type::NamedType;
pub use object::{InterfaceType, ObjectType, UnionType};
pub use print::print_schema;
pub use scalar::ScalarType;
pub use scalar_coercion::{coerce_literal, is_builtin_scalar, literal_to_json, parse_scalar, serialize_scalar};
pub use schema::Schema;
pub use type_ref::TypeRef;
