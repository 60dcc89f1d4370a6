use indexmap::IndexMap;
use multimap::MultiMap;

use crate::directive::DirectiveType;
use crate::named_type::NamedType;
use crate::object::ObjectType;

/// A fully built, validated, read-only GraphQL schema.
///
/// Invariants (checked once, in [`crate::builder::build_ast`], never
/// re-checked afterwards): exactly one query root, at most one mutation and
/// one subscription root (each an object type); every referenced type name
/// resolves; interfaces list every implementer; unions list only object
/// members; input-object field graphs are acyclic; type and directive names
/// are each unique.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) types: IndexMap<String, NamedType>,
    pub(crate) directives: IndexMap<String, DirectiveType>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
    pub(crate) subscription_type: Option<String>,
    /// interface name -> names of object types that implement it. Built once
    /// during construction so `possible_types` doesn't rescan the whole type
    /// map on every abstract-type resolution during execution.
    pub(crate) implementers: MultiMap<String, String>,
    pub description: Option<String>,
}

impl Schema {
    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn ty(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveType> {
        self.directives.values()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    pub fn query_type(&self) -> &NamedType {
        self.types.get(&self.query_type).expect("query root always resolves")
    }

    pub fn mutation_type(&self) -> Option<&NamedType> {
        self.mutation_type.as_ref().and_then(|name| self.types.get(name))
    }

    pub fn subscription_type(&self) -> Option<&NamedType> {
        self.subscription_type.as_ref().and_then(|name| self.types.get(name))
    }

    pub fn root_type(&self, operation: crate::field::RootOperation) -> Option<&NamedType> {
        use crate::field::RootOperation::*;
        match operation {
            Query => Some(self.query_type()),
            Mutation => self.mutation_type(),
            Subscription => self.subscription_type(),
        }
    }

    /// The concrete object types that implement interface/union `abstract_name`,
    /// for resolving a selection set against a field whose declared type is
    /// abstract.
    pub fn possible_types(&self, abstract_name: &str) -> Vec<&ObjectType> {
        match self.types.get(abstract_name) {
            Some(NamedType::Union(union)) => union
                .members
                .iter()
                .filter_map(|name| self.object_type(name))
                .collect(),
            Some(NamedType::Interface(_)) => self
                .implementers
                .get_vec(abstract_name)
                .into_iter()
                .flatten()
                .filter_map(|name| self.object_type(name))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(NamedType::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// Whether `possible_type` is among the concrete types `abstract_name`
    /// could resolve to (or is `abstract_name` itself, for a concrete
    /// output type).
    pub fn is_possible_type(&self, abstract_name: &str, possible_type: &str) -> bool {
        if abstract_name == possible_type {
            return true;
        }
        self.possible_types(abstract_name)
            .iter()
            .any(|object| object.name == possible_type)
    }

    /// Whether every member of `directive_names` is either a user-defined or
    /// built-in directive known to this schema.
    pub fn directives_defined<'a>(&self, directive_names: impl IntoIterator<Item = &'a str>) -> bool {
        directive_names.into_iter().all(|name| self.directives.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::build;

    #[test]
    fn resolves_default_root_types_by_convention() {
        let schema = build("type Query { hello: String } type Mutation { noop: Boolean }").unwrap();
        assert_eq!(schema.query_type().name(), "Query");
        assert_eq!(schema.mutation_type().unwrap().name(), "Mutation");
        assert!(schema.subscription_type().is_none());
    }

    #[test]
    fn possible_types_resolves_interface_implementers() {
        let schema = build(
            "type Query { hello: String }
             interface Animal { name: String }
             type Dog implements Animal { name: String }
             type Cat implements Animal { name: String }",
        )
        .unwrap();
        let mut names: Vec<&str> = schema.possible_types("Animal").iter().map(|o| o.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Cat", "Dog"]);
    }
}
