use indexmap::IndexMap;

use crate::argument::InputValueMap;
use crate::directive_use::DirectiveUse;
use crate::type_ref::TypeRef;

/// Reason a field or enum value was marked `@deprecated`.
#[derive(Clone, Debug)]
pub struct Deprecation {
    pub reason: String,
}

#[derive(Clone, Debug)]
pub struct FieldType {
    pub name: String,
    pub description: Option<String>,
    pub args: InputValueMap,
    pub ty: TypeRef,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveUse>,
}

pub type FieldMap = IndexMap<String, FieldType>;

/// Which of a schema's (at most three) root types an operation executes
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl From<gql_language::ast::OperationType> for RootOperation {
    fn from(operation: gql_language::ast::OperationType) -> RootOperation {
        match operation {
            gql_language::ast::OperationType::Query => RootOperation::Query,
            gql_language::ast::OperationType::Mutation => RootOperation::Mutation,
            gql_language::ast::OperationType::Subscription => RootOperation::Subscription,
        }
    }
}
