use crate::directive_use::DirectiveUse;

#[derive(Clone, Debug)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by_url: Option<String>,
    pub directives: Vec<DirectiveUse>,
}
