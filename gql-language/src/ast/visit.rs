//! A read-only, accumulating traversal over the full AST (executable and
//! type-system nodes alike). Implementors only override the callbacks for
//! the node kinds they care about; `traverse` drives the recursion and
//! calls back in document order.
//!
//! This traversal never edits the tree; it exists for validation rules and
//! other read-only passes. Query transforms that need to add, remove or
//! replace nodes use [`super::editor`] instead.

use super::*;

macro_rules! visit {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self, _node: &$ty) {}
    };
}

#[allow(unused_variables)]
pub trait Visit {
    visit!(visit_document, Document);
    visit!(visit_definition, Definition);
    visit!(visit_operation_definition, OperationDefinition);
    visit!(visit_variable_definition, VariableDefinition);
    visit!(visit_fragment_definition, FragmentDefinition);
    visit!(visit_selection_set, SelectionSet);
    visit!(visit_selection, Selection);
    visit!(visit_field, Field);
    visit!(visit_fragment_spread, FragmentSpread);
    visit!(visit_inline_fragment, InlineFragment);
    visit!(visit_argument, Argument);
    visit!(visit_directive, Directive);
    visit!(visit_value, Value);
    visit!(visit_variable, Variable);
    visit!(visit_list_value, ListValue);
    visit!(visit_object_value, ObjectValue);
    visit!(visit_object_field, ObjectField);
    visit!(visit_type, Type);
    visit!(visit_named_type, NamedType);
    visit!(visit_list_type, ListType);
    visit!(visit_non_null_type, NonNullType);
    visit!(visit_name, Name);

    visit!(visit_schema_definition, SchemaDefinition);
    visit!(visit_schema_extension, SchemaExtension);
    visit!(visit_scalar_type_definition, ScalarTypeDefinition);
    visit!(visit_scalar_type_extension, ScalarTypeExtension);
    visit!(visit_object_type_definition, ObjectTypeDefinition);
    visit!(visit_object_type_extension, ObjectTypeExtension);
    visit!(visit_interface_type_definition, InterfaceTypeDefinition);
    visit!(visit_interface_type_extension, InterfaceTypeExtension);
    visit!(visit_union_type_definition, UnionTypeDefinition);
    visit!(visit_union_type_extension, UnionTypeExtension);
    visit!(visit_enum_type_definition, EnumTypeDefinition);
    visit!(visit_enum_type_extension, EnumTypeExtension);
    visit!(visit_enum_value_definition, EnumValueDefinition);
    visit!(visit_input_object_type_definition, InputObjectTypeDefinition);
    visit!(visit_input_object_type_extension, InputObjectTypeExtension);
    visit!(visit_field_definition, FieldDefinition);
    visit!(visit_input_value_definition, InputValueDefinition);
    visit!(visit_directive_definition, DirectiveDefinition);
}

pub trait Node {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V);
}

impl<T: Node> Node for Vec<T> {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
        for item in self {
            item.traverse(visitor);
        }
    }
}

impl<T: Node> Node for Option<T> {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
        if let Some(item) = self {
            item.traverse(visitor);
        }
    }
}

impl<T: Node> Node for Box<T> {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
        (**self).traverse(visitor);
    }
}

macro_rules! node {
    ($ty:ident, $visit:ident, $($field:ident),* $(,)?) => {
        impl Node for $ty {
            fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
                visitor.$visit(self);
                $(self.$field.traverse(visitor);)*
            }
        }
    };
}

macro_rules! node_enum {
    ($ty:ident, $visit:ident, $($variant:ident),* $(,)?) => {
        impl Node for $ty {
            fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
                visitor.$visit(self);
                match self {
                    $(Self::$variant(node) => node.traverse(visitor),)*
                }
            }
        }
    };
}

impl Node for Name {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_name(self);
    }
}

node!(Document, visit_document, definitions);

node_enum!(
    Definition,
    visit_definition,
    Operation,
    Fragment,
    Schema,
    SchemaExtension,
    ScalarType,
    ScalarTypeExtension,
    ObjectType,
    ObjectTypeExtension,
    InterfaceType,
    InterfaceTypeExtension,
    UnionType,
    UnionTypeExtension,
    EnumType,
    EnumTypeExtension,
    InputObjectType,
    InputObjectTypeExtension,
    Directive,
);

node!(
    OperationDefinition,
    visit_operation_definition,
    name,
    variable_definitions,
    directives,
    selection_set
);
node!(
    VariableDefinition,
    visit_variable_definition,
    variable,
    ty,
    default_value,
    directives
);
node!(
    FragmentDefinition,
    visit_fragment_definition,
    name,
    type_condition,
    directives,
    selection_set
);
node!(SelectionSet, visit_selection_set, selections);
node_enum!(Selection, visit_selection, Field, FragmentSpread, InlineFragment);
node!(
    Field,
    visit_field,
    alias,
    name,
    arguments,
    directives,
    selection_set
);
node!(FragmentSpread, visit_fragment_spread, fragment_name, directives);
node!(
    InlineFragment,
    visit_inline_fragment,
    type_condition,
    directives,
    selection_set
);
node!(Argument, visit_argument, name, value);
node!(Directive, visit_directive, name, arguments);

node_enum!(
    Value,
    visit_value,
    Variable,
    Int,
    Float,
    String,
    Boolean,
    Null,
    Enum,
    List,
    Object
);
node!(Variable, visit_variable, name);
impl Node for IntValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
impl Node for FloatValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
impl Node for StringValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
impl Node for BooleanValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
impl Node for NullValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
impl Node for EnumValue {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}
node!(ListValue, visit_list_value, values);
node!(ObjectValue, visit_object_value, fields);
node!(ObjectField, visit_object_field, name, value);

node_enum!(Type, visit_type, Named, List, NonNull);
node!(NamedType, visit_named_type, name);
node!(ListType, visit_list_type, ty);
node!(NonNullType, visit_non_null_type, ty);

node!(SchemaDefinition, visit_schema_definition, description, directives, root_operation_types);
node!(SchemaExtension, visit_schema_extension, directives, root_operation_types);
impl Node for OperationTypeDefinition {
    fn traverse<V: Visit + ?Sized>(&self, visitor: &mut V) {
        self.named_type.traverse(visitor);
    }
}
node!(ScalarTypeDefinition, visit_scalar_type_definition, description, name, directives);
node!(ScalarTypeExtension, visit_scalar_type_extension, name, directives);
node!(
    ObjectTypeDefinition,
    visit_object_type_definition,
    description,
    name,
    implements_interfaces,
    directives,
    fields
);
node!(
    ObjectTypeExtension,
    visit_object_type_extension,
    name,
    implements_interfaces,
    directives,
    fields
);
node!(
    InterfaceTypeDefinition,
    visit_interface_type_definition,
    description,
    name,
    implements_interfaces,
    directives,
    fields
);
node!(
    InterfaceTypeExtension,
    visit_interface_type_extension,
    name,
    implements_interfaces,
    directives,
    fields
);
node!(
    UnionTypeDefinition,
    visit_union_type_definition,
    description,
    name,
    directives,
    member_types
);
node!(UnionTypeExtension, visit_union_type_extension, name, directives, member_types);
node!(EnumTypeDefinition, visit_enum_type_definition, description, name, directives, values);
node!(EnumTypeExtension, visit_enum_type_extension, name, directives, values);
node!(EnumValueDefinition, visit_enum_value_definition, description, value, directives);
node!(
    InputObjectTypeDefinition,
    visit_input_object_type_definition,
    description,
    name,
    directives,
    fields
);
node!(InputObjectTypeExtension, visit_input_object_type_extension, name, directives, fields);
node!(
    FieldDefinition,
    visit_field_definition,
    description,
    name,
    arguments,
    ty,
    directives
);
node!(
    InputValueDefinition,
    visit_input_value_definition,
    description,
    name,
    ty,
    default_value,
    directives
);
node!(
    DirectiveDefinition,
    visit_directive_definition,
    description,
    name,
    arguments,
    locations
);

impl Node for Description {
    fn traverse<V: Visit + ?Sized>(&self, _visitor: &mut V) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FieldNameCollector {
        names: Vec<String>,
    }

    impl Visit for FieldNameCollector {
        fn visit_field(&mut self, node: &Field) {
            self.names.push(node.name.value.clone());
        }
    }

    fn field(name: &str, selections: Vec<Selection>) -> Selection {
        Selection::Field(Field {
            span: None,
            alias: None,
            name: Name { span: None, value: name.to_owned() },
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: if selections.is_empty() {
                None
            } else {
                Some(SelectionSet { span: None, selections })
            },
        })
    }

    #[test]
    fn collects_every_field_in_document_order() {
        let document = Document {
            span: None,
            definitions: vec![Definition::Operation(OperationDefinition {
                span: None,
                operation: OperationType::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                selection_set: SelectionSet {
                    span: None,
                    selections: vec![field("a", vec![field("b", Vec::new())]), field("c", Vec::new())],
                },
            })],
        };

        let mut collector = FieldNameCollector::default();
        document.traverse(&mut collector);

        assert_eq!(collector.names, vec!["a", "b", "c"]);
    }
}
