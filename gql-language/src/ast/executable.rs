use super::macros::{ast_enum, ast_struct};
use super::{Name, Type, Value, Variable};
use crate::lex::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn describe(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

ast_struct!(
    OperationDefinition {
        operation: OperationType,
        name: Option<Name>,
        variable_definitions: Vec<VariableDefinition>,
        directives: Vec<Directive>,
        selection_set: SelectionSet,
    }
);

ast_struct!(
    VariableDefinition {
        variable: Variable,
        ty: Type,
        default_value: Option<Value>,
        directives: Vec<Directive>,
    }
);

ast_struct!(
    FragmentDefinition {
        name: Name,
        type_condition: Name,
        directives: Vec<Directive>,
        selection_set: SelectionSet,
    }
);

ast_struct!(SelectionSet { selections: Vec<Selection> });

ast_enum!(
    Selection {
        Field(Field),
        FragmentSpread(FragmentSpread),
        InlineFragment(InlineFragment),
    }
);

ast_struct!(
    Field {
        alias: Option<Name>,
        name: Name,
        arguments: Vec<Argument>,
        directives: Vec<Directive>,
        selection_set: Option<SelectionSet>,
    }
);

impl Field {
    /// The key under which this field's result is reported: its alias, or
    /// its name if unaliased.
    pub fn response_key(&self) -> &str {
        self.alias
            .as_ref()
            .unwrap_or(&self.name)
            .value
            .as_str()
    }
}

ast_struct!(
    FragmentSpread {
        fragment_name: Name,
        directives: Vec<Directive>,
    }
);

ast_struct!(
    InlineFragment {
        type_condition: Option<Name>,
        directives: Vec<Directive>,
        selection_set: SelectionSet,
    }
);

ast_struct!(Argument { name: Name, value: Value });

ast_struct!(Directive { name: Name, arguments: Vec<Argument> });

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|argument| argument.name.value == name)
            .map(|argument| &argument.value)
    }
}
