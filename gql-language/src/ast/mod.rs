//! The typed abstract syntax tree produced by the parser.
//!
//! Node structs are owned (no borrow against the `Source`) so that the
//! editing visitor can build and splice in replacement subtrees without
//! fighting a shared-reference tree; a zero-copy, lifetime-parameterized
//! tree has no good way to express that kind of edit.

pub(crate) mod macros;

mod executable;
mod name;
mod no_location;
mod schema;
mod ty;
mod value;

pub mod editor;
pub mod visit;

pub use executable::*;
pub use name::{Description, Name};
pub use no_location::strip_locations;
pub use schema::*;
pub use ty::*;
pub use value::*;

use crate::lex::Span;
use macros::{ast_enum, ast_struct};

ast_struct!(
    /// The root AST node: a sequence of definitions. A document is
    /// either wholly executable (operations and fragments) or wholly a
    /// type-system document (SDL definitions/extensions); the grammar
    /// doesn't forbid mixing them; `gql-compiler` treats a document meant as
    /// SDL as an error if it contains executable definitions and vice versa.
    Document { definitions: Vec<Definition> }
);

ast_enum!(
    Definition {
        Operation(OperationDefinition),
        Fragment(FragmentDefinition),
        Schema(SchemaDefinition),
        SchemaExtension(SchemaExtension),
        ScalarType(ScalarTypeDefinition),
        ScalarTypeExtension(ScalarTypeExtension),
        ObjectType(ObjectTypeDefinition),
        ObjectTypeExtension(ObjectTypeExtension),
        InterfaceType(InterfaceTypeDefinition),
        InterfaceTypeExtension(InterfaceTypeExtension),
        UnionType(UnionTypeDefinition),
        UnionTypeExtension(UnionTypeExtension),
        EnumType(EnumTypeDefinition),
        EnumTypeExtension(EnumTypeExtension),
        InputObjectType(InputObjectTypeDefinition),
        InputObjectTypeExtension(InputObjectTypeExtension),
        Directive(DirectiveDefinition),
    }
);

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Operation(operation) => Some(operation),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some(fragment),
            _ => None,
        })
    }

    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments().find(|fragment| fragment.name.value == name)
    }

    /// Whether this document contains any type-system definition or
    /// extension (as opposed to being a purely executable document).
    pub fn is_type_system_document(&self) -> bool {
        self.definitions.iter().any(|definition| {
            !matches!(definition, Definition::Operation(_) | Definition::Fragment(_))
        })
    }
}
