use crate::directive_use::DirectiveUse;
use crate::enum_type::EnumType;
use crate::field::FieldMap;
use crate::input_object::InputObjectType;
use crate::object::{InterfaceType, ObjectType, UnionType};
use crate::scalar::ScalarType;

/// Any named type a [`Schema`](crate::Schema) can hold: one of the six kinds
/// the GraphQL type system closes over. Unlike
/// [`gql_language::ast::Definition`], extensions have already been merged
/// in by the time a `NamedType` exists.
#[derive(Clone, Debug)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Scalar(ty) => &ty.name,
            NamedType::Object(ty) => &ty.name,
            NamedType::Interface(ty) => &ty.name,
            NamedType::Union(ty) => &ty.name,
            NamedType::Enum(ty) => &ty.name,
            NamedType::InputObject(ty) => &ty.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            NamedType::Scalar(ty) => ty.description.as_deref(),
            NamedType::Object(ty) => ty.description.as_deref(),
            NamedType::Interface(ty) => ty.description.as_deref(),
            NamedType::Union(ty) => ty.description.as_deref(),
            NamedType::Enum(ty) => ty.description.as_deref(),
            NamedType::InputObject(ty) => ty.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &[DirectiveUse] {
        match self {
            NamedType::Scalar(ty) => &ty.directives,
            NamedType::Object(ty) => &ty.directives,
            NamedType::Interface(ty) => &ty.directives,
            NamedType::Union(ty) => &ty.directives,
            NamedType::Enum(ty) => &ty.directives,
            NamedType::InputObject(ty) => &ty.directives,
        }
    }

    /// Fields of this type, for the two kinds that carry field sets
    /// (`Object`, `Interface`).
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            NamedType::Object(ty) => Some(&ty.fields),
            NamedType::Interface(ty) => Some(&ty.fields),
            _ => None,
        }
    }

    /// A scalar or enum: a type whose values have no further selectable
    /// sub-fields.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NamedType::Scalar(_) | NamedType::Enum(_))
    }

    /// An object, interface, or union: a type a selection set can be made
    /// against.
    pub fn is_composite(&self) -> bool {
        matches!(self, NamedType::Object(_) | NamedType::Interface(_) | NamedType::Union(_))
    }

    /// Valid in an input position (argument, variable, input-object field).
    pub fn is_input_type(&self) -> bool {
        matches!(self, NamedType::Scalar(_) | NamedType::Enum(_) | NamedType::InputObject(_))
    }

    /// Valid in an output position (field return type).
    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            NamedType::Scalar(_) | NamedType::Object(_) | NamedType::Interface(_) | NamedType::Union(_) | NamedType::Enum(_)
        )
    }

    pub fn is_object_type(&self) -> bool {
        matches!(self, NamedType::Object(_))
    }

    pub fn is_abstract_type(&self) -> bool {
        matches!(self, NamedType::Interface(_) | NamedType::Union(_))
    }
}
