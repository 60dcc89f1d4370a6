use super::macros::ast_struct;
use super::{Description, Directive, Name, OperationType, Type, Value};
use crate::lex::Span;

ast_struct!(
    SchemaDefinition {
        description: Option<Description>,
        directives: Vec<Directive>,
        root_operation_types: Vec<OperationTypeDefinition>,
    }
);

ast_struct!(SchemaExtension { directives: Vec<Directive>, root_operation_types: Vec<OperationTypeDefinition> });

ast_struct!(OperationTypeDefinition { operation: OperationType, named_type: Name });

ast_struct!(
    ScalarTypeDefinition {
        description: Option<Description>,
        name: Name,
        directives: Vec<Directive>,
    }
);

ast_struct!(ScalarTypeExtension { name: Name, directives: Vec<Directive> });

ast_struct!(
    ObjectTypeDefinition {
        description: Option<Description>,
        name: Name,
        implements_interfaces: Vec<Name>,
        directives: Vec<Directive>,
        fields: Vec<FieldDefinition>,
    }
);

ast_struct!(
    ObjectTypeExtension {
        name: Name,
        implements_interfaces: Vec<Name>,
        directives: Vec<Directive>,
        fields: Vec<FieldDefinition>,
    }
);

ast_struct!(
    InterfaceTypeDefinition {
        description: Option<Description>,
        name: Name,
        implements_interfaces: Vec<Name>,
        directives: Vec<Directive>,
        fields: Vec<FieldDefinition>,
    }
);

ast_struct!(
    InterfaceTypeExtension {
        name: Name,
        implements_interfaces: Vec<Name>,
        directives: Vec<Directive>,
        fields: Vec<FieldDefinition>,
    }
);

ast_struct!(
    UnionTypeDefinition {
        description: Option<Description>,
        name: Name,
        directives: Vec<Directive>,
        member_types: Vec<Name>,
    }
);

ast_struct!(UnionTypeExtension { name: Name, directives: Vec<Directive>, member_types: Vec<Name> });

ast_struct!(
    EnumTypeDefinition {
        description: Option<Description>,
        name: Name,
        directives: Vec<Directive>,
        values: Vec<EnumValueDefinition>,
    }
);

ast_struct!(EnumTypeExtension { name: Name, directives: Vec<Directive>, values: Vec<EnumValueDefinition> });

ast_struct!(
    EnumValueDefinition {
        description: Option<Description>,
        value: Name,
        directives: Vec<Directive>,
    }
);

ast_struct!(
    InputObjectTypeDefinition {
        description: Option<Description>,
        name: Name,
        directives: Vec<Directive>,
        fields: Vec<InputValueDefinition>,
    }
);

ast_struct!(InputObjectTypeExtension { name: Name, directives: Vec<Directive>, fields: Vec<InputValueDefinition> });

ast_struct!(
    FieldDefinition {
        description: Option<Description>,
        name: Name,
        arguments: Vec<InputValueDefinition>,
        ty: Type,
        directives: Vec<Directive>,
    }
);

ast_struct!(
    InputValueDefinition {
        description: Option<Description>,
        name: Name,
        ty: Type,
        default_value: Option<Value>,
        directives: Vec<Directive>,
    }
);

ast_struct!(
    DirectiveDefinition {
        description: Option<Description>,
        name: Name,
        arguments: Vec<InputValueDefinition>,
        repeatable: bool,
        locations: Vec<Name>,
    }
);
