//! The type-info context threaded alongside a document while validating: at
//! each point in a selection set, which type selections are made against.
//! Carried as a small `Copy` struct passed down through plain recursive
//! functions rather than through a generic `Visitor` trait —
//! `gql_language::ast::visit::Visit` has no leave-hook to pop a type stack
//! on the way back out of a selection set, so the rules below that need
//! type context walk the document themselves instead of riding that trait.

use gql_types::{FieldType, NamedType, Schema, TypeRef};

#[derive(Clone, Copy)]
pub struct TypeInfo<'a> {
    pub schema: &'a Schema,
    pub parent_type: Option<&'a NamedType>,
}

impl<'a> TypeInfo<'a> {
    pub fn for_root(schema: &'a Schema, root: Option<&'a NamedType>) -> TypeInfo<'a> {
        TypeInfo { schema, parent_type: root }
    }

    /// The field definition named `field_name` on the current parent type,
    /// if the parent type is known and carries fields (an object or
    /// interface) and actually declares it.
    pub fn field(&self, field_name: &str) -> Option<&'a FieldType> {
        self.parent_type?.fields()?.get(field_name)
    }

    /// The type-info a sub-selection set against `field_name`'s declared
    /// return type would see.
    pub fn for_field(&self, field_name: &str) -> TypeInfo<'a> {
        let parent_type = self
            .field(field_name)
            .and_then(|field| self.schema.ty(field.ty.named_type()));
        TypeInfo { schema: self.schema, parent_type }
    }

    pub fn for_type_condition(&self, type_name: &str) -> TypeInfo<'a> {
        TypeInfo { schema: self.schema, parent_type: self.schema.ty(type_name) }
    }
}

/// Whether a value of `actual` could satisfy a position declared as
/// `expected`, per the variable-usage-allowed rule: equal types, a
/// non-null `actual` against its nullable `expected` counterpart, and
/// (when `expected` supplies a default) a nullable `actual` against a
/// non-null `expected`.
pub fn is_variable_usage_allowed(actual: &TypeRef, expected: &TypeRef, has_location_default: bool) -> bool {
    if let TypeRef::NonNull(expected_inner) = expected {
        if let TypeRef::NonNull(actual_inner) = actual {
            return is_variable_usage_allowed(actual_inner, expected_inner, has_location_default);
        }
        if !has_location_default {
            return false;
        }
        return is_variable_usage_allowed(actual, expected_inner, has_location_default);
    }

    match (actual, expected) {
        (TypeRef::NonNull(actual_inner), _) => is_variable_usage_allowed(actual_inner, expected, has_location_default),
        (TypeRef::List(actual_inner), TypeRef::List(expected_inner)) => {
            is_variable_usage_allowed(actual_inner, expected_inner, false)
        }
        (TypeRef::Named(actual_name), TypeRef::Named(expected_name)) => actual_name == expected_name,
        _ => false,
    }
}
