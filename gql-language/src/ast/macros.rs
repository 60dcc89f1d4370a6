/// Declares an AST node struct carrying an optional `span`, plus a
/// `PartialEq`/`Eq` impl that ignores it: two nodes parsed from different
/// source locations but with the same field values compare equal.
macro_rules! ast_struct {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            pub span: Option<Span>,
            $(pub $field: $ty,)*
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&*
            }
        }

        impl Eq for $name {}
    };
}

/// Declares an AST node enum that forwards to each variant's single field.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ty)),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant($ty),)*
        }

        impl $name {
            pub fn span(&self) -> Option<Span> {
                match self {
                    $(Self::$variant(node) => node.span,)*
                }
            }
        }
    };
}

pub(crate) use ast_enum;
pub(crate) use ast_struct;
