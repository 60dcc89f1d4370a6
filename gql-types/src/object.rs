use crate::directive_use::DirectiveUse;
use crate::field::FieldMap;

#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: FieldMap,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: FieldMap,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Clone, Debug)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
    pub directives: Vec<DirectiveUse>,
}
