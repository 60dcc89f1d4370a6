use indexmap::IndexMap;

use crate::directive_use::DirectiveUse;
use crate::field::Deprecation;

#[derive(Clone, Debug)]
pub struct EnumValueType {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValueType>,
    pub directives: Vec<DirectiveUse>,
}
