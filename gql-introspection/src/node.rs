//! The introspection value model: every shape `__Schema`/`__Type`/`__Field`/
//! `__InputValue`/`__EnumValue`/`__Directive` can resolve to, built lazily
//! from a borrowed [`Schema`] rather than eagerly materialized into JSON
//! upfront. One enum covers all five meta-type families since there is no
//! macro-driven aspect system to dispatch through — [`resolve`]
//! pattern-matches on the variant directly.

use gql_types::{DirectiveType, EnumValueType, FieldType, InputValue, NamedType, Schema};

/// A type reference as seen from the introspection system: either a named
/// type in the schema, or a `List`/`NonNull` wrapper around one.
#[derive(Clone)]
pub enum TypeWrap<'a> {
    Named(&'a NamedType),
    List(Box<TypeWrap<'a>>),
    NonNull(Box<TypeWrap<'a>>),
}

impl<'a> TypeWrap<'a> {
    pub fn from_type_ref(schema: &'a Schema, ty: &gql_types::TypeRef) -> Option<TypeWrap<'a>> {
        use gql_types::TypeRef;
        Some(match ty {
            TypeRef::Named(name) => TypeWrap::Named(schema.ty(name)?),
            TypeRef::List(inner) => TypeWrap::List(Box::new(TypeWrap::from_type_ref(schema, inner)?)),
            TypeRef::NonNull(inner) => TypeWrap::NonNull(Box::new(TypeWrap::from_type_ref(schema, inner)?)),
        })
    }
}

/// Any value a meta-field selection can resolve to. Leaves (strings,
/// booleans, enum-name arrays) are rendered straight to JSON; the rest
/// carry enough borrowed context to answer a further sub-selection.
pub enum Node<'a> {
    Schema(&'a Schema),
    Type(TypeWrap<'a>),
    Field(&'a str, &'a FieldType, &'a Schema),
    InputValue(&'a str, &'a InputValue, &'a Schema),
    EnumValue(&'a str, &'a EnumValueType),
    Directive(&'a DirectiveType, &'a Schema),
    List(Vec<Node<'a>>),
    Leaf(serde_json::Value),
}

impl<'a> Node<'a> {
    /// The introspection type name used to match a fragment's type
    /// condition against this node (e.g. `... on __Type { ... }`).
    pub fn typename(&self) -> &'static str {
        match self {
            Node::Schema(_) => "__Schema",
            Node::Type(_) => "__Type",
            Node::Field(..) => "__Field",
            Node::InputValue(..) => "__InputValue",
            Node::EnumValue(..) => "__EnumValue",
            Node::Directive(..) => "__Directive",
            Node::List(_) | Node::Leaf(_) => "",
        }
    }

    /// Whether this node has further sub-fields a selection set can be
    /// made against, as opposed to a leaf scalar/enum value.
    pub fn is_composite(&self) -> bool {
        !matches!(self, Node::Leaf(_))
    }
}

pub fn deprecation_of_directives(directives: &[gql_types::DirectiveUse]) -> (bool, Option<String>) {
    match directives.iter().find(|d| d.name == "deprecated") {
        Some(d) => {
            let reason = d.argument("reason").and_then(|value| match value {
                gql_language::ast::Value::String(s) => Some(s.value.clone()),
                _ => None,
            });
            (true, Some(reason.unwrap_or_else(|| "No longer supported".to_owned())))
        }
        None => (false, None),
    }
}
