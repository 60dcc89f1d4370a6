use gql_language::ast::Value;

/// A directive application (`@deprecated(reason: "...")`) attached to a
/// schema element, as opposed to [`DirectiveType`](crate::DirectiveType)
/// which describes the directive itself.
#[derive(Clone, Debug)]
pub struct DirectiveUse {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}

impl DirectiveUse {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.iter().find(|(arg_name, _)| arg_name == name).map(|(_, value)| value)
    }
}
