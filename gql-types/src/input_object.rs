use crate::argument::InputValueMap;
use crate::directive_use::DirectiveUse;

#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: InputValueMap,
    pub directives: Vec<DirectiveUse>,
    /// Set by `@oneOf`: exactly one field must be set on any literal or
    /// variable value of this type.
    pub is_one_of: bool,
}
