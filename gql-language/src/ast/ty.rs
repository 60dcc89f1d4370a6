use super::macros::{ast_enum, ast_struct};
use super::Name;
use crate::lex::Span;

ast_enum!(
    /// A type reference as it appears in a variable definition, field
    /// definition or input value definition.
    Type {
        Named(NamedType),
        List(ListType),
        NonNull(NonNullType),
    }
);

ast_struct!(NamedType { name: Name });
ast_struct!(ListType { ty: Box<Type> });
ast_struct!(NonNullType { ty: Box<Type> });

impl Type {
    /// The innermost named type this reference ultimately points at,
    /// unwrapping any `List`/`NonNull` wrappers.
    pub fn named_type(&self) -> &Name {
        match self {
            Type::Named(named) => &named.name,
            Type::List(list) => list.ty.named_type(),
            Type::NonNull(non_null) => non_null.ty.named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            Type::List(_) => true,
            Type::NonNull(non_null) => non_null.ty.is_list(),
            Type::Named(_) => false,
        }
    }

    /// This type with its outermost `NonNull` wrapper removed, if any. Used
    /// when completing a nullable position whose declared type happens to be
    /// non-null.
    pub fn nullable(&self) -> &Type {
        match self {
            Type::NonNull(non_null) => &non_null.ty,
            other => other,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Named(named) => write!(f, "{}", named.name.value),
            Type::List(list) => write!(f, "[{}]", list.ty),
            Type::NonNull(non_null) => write!(f, "{}!", non_null.ty),
        }
    }
}
