use gql_language::ast::Value;
use indexmap::IndexMap;

use crate::directive_use::DirectiveUse;
use crate::type_ref::TypeRef;

/// A single input position: a field argument, a directive argument, or an
/// input-object field. All three share this shape in the GraphQL type
/// system, so one struct backs `FieldType::args`, `DirectiveType::args` and
/// `InputObjectType::fields`.
#[derive(Clone, Debug)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveUse>,
}

pub type InputValueMap = IndexMap<String, InputValue>;
