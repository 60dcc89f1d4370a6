use std::fmt;

use gql_language::ast::Type as AstType;

/// A type reference inside a built [`Schema`](crate::Schema): a named type,
/// or a `List`/`NonNull` wrapper around one. Unlike
/// [`gql_language::ast::Type`], this carries no source span — it is part of
/// the schema's own owned model, produced once by the builder and then
/// shared read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn from_ast(ty: &AstType) -> TypeRef {
        match ty {
            AstType::Named(named) => TypeRef::Named(named.name.value.clone()),
            AstType::List(list) => TypeRef::List(Box::new(TypeRef::from_ast(&list.ty))),
            AstType::NonNull(non_null) => TypeRef::NonNull(Box::new(TypeRef::from_ast(&non_null.ty))),
        }
    }

    /// The name of the innermost named type this reference points at.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
            TypeRef::Named(_) => false,
        }
    }

    /// This reference with its outermost `NonNull` wrapper removed, if any.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Whether a value of type `self` could be used wherever `expected`
    /// is expected, ignoring object/interface/union subtyping (that needs a
    /// [`Schema`](crate::Schema) and lives on `Schema::is_sub_type_of`
    /// instead): non-null is a sub-type of its nullable form, and lists
    /// compare element-wise.
    pub fn is_sub_type_of(&self, expected: &TypeRef) -> bool {
        if self == expected {
            return true;
        }

        match expected {
            TypeRef::NonNull(expected_inner) => match self {
                TypeRef::NonNull(self_inner) => self_inner.is_sub_type_of(expected_inner),
                _ => false,
            },
            TypeRef::List(expected_inner) => match self {
                TypeRef::NonNull(self_inner) => self_inner.is_sub_type_of(expected),
                TypeRef::List(self_inner) => self_inner.is_sub_type_of(expected_inner),
                TypeRef::Named(_) => false,
            },
            TypeRef::Named(_) => match self {
                TypeRef::NonNull(self_inner) => self_inner.is_sub_type_of(expected),
                _ => false,
            },
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_null_is_a_sub_type_of_its_nullable_form() {
        let non_null = TypeRef::NonNull(Box::new(TypeRef::Named("String".into())));
        let nullable = TypeRef::Named("String".into());
        assert!(non_null.is_sub_type_of(&nullable));
        assert!(!nullable.is_sub_type_of(&non_null));
    }

    #[test]
    fn named_type_unwraps_wrappers() {
        let ty = TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::Named("Int".into())))));
        assert_eq!(ty.named_type(), "Int");
        assert!(ty.is_non_null());
        assert!(ty.is_list());
    }
}
