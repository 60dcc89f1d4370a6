//! An editing traversal over an executable document: operations, fragments,
//! selection sets and values. Each callback can leave a node alone, skip its
//! children, replace it with a different node of the same type, delete it
//! from its parent collection, or break out of the whole traversal early.
//!
//! Scoped to the executable subtree because that's what query tooling
//! actually rewrites (stripping fields, inlining fragments, redacting
//! arguments); SDL documents are read once at schema-build time and have no
//! established editing use case, so [`super::visit`]'s read-only traversal
//! covers them instead.

use gql_diagnostics::PathSegment;

use super::*;

/// What to do with a node after a callback inspects it.
pub enum Action<T> {
    /// Keep the node as-is and continue into its children.
    Continue,
    /// Keep the node as-is but don't visit its children.
    Skip,
    /// Stop the entire traversal immediately, keeping every edit made so far.
    Break,
    /// Swap the node for `T` and continue traversing into it.
    Replace(T),
    /// Remove the node from its parent collection.
    Delete,
}

impl<T> Default for Action<T> {
    fn default() -> Self {
        Action::Continue
    }
}

/// A non-editing snapshot of a node on the path from the document root to
/// the node currently being visited, for callbacks that need surrounding
/// context (e.g. "is this argument inside a `@skip` directive?").
#[derive(Clone, Debug)]
pub enum AstNode {
    OperationDefinition(OperationDefinition),
    FragmentDefinition(FragmentDefinition),
    SelectionSet(SelectionSet),
    Selection(Selection),
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
    Argument(Argument),
    Directive(Directive),
    Value(Value),
}

/// The path from the document root to the node currently being visited,
/// alongside a stack of the ancestor nodes strictly above it. The node
/// being visited is never itself on the `nodes` stack, so
/// `ancestors().len() == path().len() - 1` always holds, matching
/// graphql-js's own `ancestors`/`path` visitor contract.
#[derive(Default)]
pub struct Ancestors {
    path: Vec<PathSegment>,
    nodes: Vec<AstNode>,
}

impl Ancestors {
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn ancestors(&self) -> &[AstNode] {
        &self.nodes
    }

    pub fn parent(&self) -> Option<&AstNode> {
        self.nodes.last()
    }

    /// Descends into a child reached from `node` (the node being left
    /// behind, which becomes the new top-of-stack ancestor) by `key`.
    fn enter(&mut self, key: impl Into<PathSegment>, node: AstNode) {
        self.path.push(key.into());
        self.nodes.push(node);
    }

    fn exit(&mut self) {
        self.path.pop();
        self.nodes.pop();
    }

    /// Extends `path` by `index` without pushing an ancestor node, for the
    /// document's top-level definitions: there is no `AstNode` variant for
    /// the document itself, so the first definition has no node to report
    /// as its parent.
    fn enter_index(&mut self, index: usize) {
        self.path.push(index.into());
    }

    fn exit_index(&mut self) {
        self.path.pop();
    }
}

#[derive(Default)]
struct State {
    broken: bool,
}

#[allow(unused_variables)]
pub trait Editor {
    fn enter_operation_definition(
        &mut self,
        node: &OperationDefinition,
        ancestors: &Ancestors,
    ) -> Action<OperationDefinition> {
        Action::Continue
    }
    fn leave_operation_definition(
        &mut self,
        node: &OperationDefinition,
        ancestors: &Ancestors,
    ) -> Action<OperationDefinition> {
        Action::Continue
    }

    fn enter_fragment_definition(
        &mut self,
        node: &FragmentDefinition,
        ancestors: &Ancestors,
    ) -> Action<FragmentDefinition> {
        Action::Continue
    }
    fn leave_fragment_definition(
        &mut self,
        node: &FragmentDefinition,
        ancestors: &Ancestors,
    ) -> Action<FragmentDefinition> {
        Action::Continue
    }

    fn enter_selection_set(&mut self, node: &SelectionSet, ancestors: &Ancestors) -> Action<SelectionSet> {
        Action::Continue
    }
    fn leave_selection_set(&mut self, node: &SelectionSet, ancestors: &Ancestors) -> Action<SelectionSet> {
        Action::Continue
    }

    fn enter_selection(&mut self, node: &Selection, ancestors: &Ancestors) -> Action<Selection> {
        Action::Continue
    }
    fn leave_selection(&mut self, node: &Selection, ancestors: &Ancestors) -> Action<Selection> {
        Action::Continue
    }

    fn enter_field(&mut self, node: &Field, ancestors: &Ancestors) -> Action<Field> {
        Action::Continue
    }
    fn leave_field(&mut self, node: &Field, ancestors: &Ancestors) -> Action<Field> {
        Action::Continue
    }

    fn enter_fragment_spread(&mut self, node: &FragmentSpread, ancestors: &Ancestors) -> Action<FragmentSpread> {
        Action::Continue
    }
    fn leave_fragment_spread(&mut self, node: &FragmentSpread, ancestors: &Ancestors) -> Action<FragmentSpread> {
        Action::Continue
    }

    fn enter_inline_fragment(&mut self, node: &InlineFragment, ancestors: &Ancestors) -> Action<InlineFragment> {
        Action::Continue
    }
    fn leave_inline_fragment(&mut self, node: &InlineFragment, ancestors: &Ancestors) -> Action<InlineFragment> {
        Action::Continue
    }

    fn enter_argument(&mut self, node: &Argument, ancestors: &Ancestors) -> Action<Argument> {
        Action::Continue
    }
    fn leave_argument(&mut self, node: &Argument, ancestors: &Ancestors) -> Action<Argument> {
        Action::Continue
    }

    fn enter_directive(&mut self, node: &Directive, ancestors: &Ancestors) -> Action<Directive> {
        Action::Continue
    }
    fn leave_directive(&mut self, node: &Directive, ancestors: &Ancestors) -> Action<Directive> {
        Action::Continue
    }

    fn enter_value(&mut self, node: &Value, ancestors: &Ancestors) -> Action<Value> {
        Action::Continue
    }
    fn leave_value(&mut self, node: &Value, ancestors: &Ancestors) -> Action<Value> {
        Action::Continue
    }
}

/// Runs `editor` over `document`'s executable definitions, returning the
/// edited document. Non-executable definitions (schema/type-system) pass
/// through untouched, since [`Editor`] has no callbacks for them.
pub fn edit_document(document: Document, editor: &mut impl Editor) -> Document {
    let mut ancestors = Ancestors::default();
    let mut state = State::default();

    let definitions = document
        .definitions
        .into_iter()
        .enumerate()
        .filter_map(|(index, definition)| {
            if state.broken {
                return Some(definition);
            }
            ancestors.enter_index(index);
            let edited = edit_definition(definition, editor, &mut ancestors, &mut state);
            ancestors.exit_index();
            edited
        })
        .collect();

    Document { span: document.span, definitions }
}

fn edit_definition(
    definition: Definition,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<Definition> {
    match definition {
        Definition::Operation(operation) => {
            edit_operation_definition(operation, editor, ancestors, state).map(Definition::Operation)
        }
        Definition::Fragment(fragment) => {
            edit_fragment_definition(fragment, editor, ancestors, state).map(Definition::Fragment)
        }
        other => Some(other),
    }
}

fn edit_operation_definition(
    node: OperationDefinition,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<OperationDefinition> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_operation_definition(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    ancestors.enter("selectionSet", AstNode::OperationDefinition(node.clone()));
    let selection_set = edit_selection_set(node.selection_set, editor, ancestors, state)
        .unwrap_or_else(|| SelectionSet { span: None, selections: Vec::new() });
    ancestors.exit();

    let node = OperationDefinition { selection_set, ..node };

    match editor.leave_operation_definition(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_fragment_definition(
    node: FragmentDefinition,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<FragmentDefinition> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_fragment_definition(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    ancestors.enter("selectionSet", AstNode::FragmentDefinition(node.clone()));
    let selection_set = edit_selection_set(node.selection_set, editor, ancestors, state)
        .unwrap_or_else(|| SelectionSet { span: None, selections: Vec::new() });
    ancestors.exit();

    let node = FragmentDefinition { selection_set, ..node };

    match editor.leave_fragment_definition(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_selection_set(
    node: SelectionSet,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<SelectionSet> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_selection_set(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let container = AstNode::SelectionSet(node.clone());
    let selections = node
        .selections
        .into_iter()
        .enumerate()
        .filter_map(|(index, selection)| {
            if state.broken {
                return Some(selection);
            }
            ancestors.enter(index, container.clone());
            let edited = edit_selection(selection, editor, ancestors, state);
            ancestors.exit();
            edited
        })
        .collect();

    let node = SelectionSet { selections, ..node };

    match editor.leave_selection_set(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_selection(
    node: Selection,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<Selection> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_selection(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let node = match node {
        Selection::Field(field) => edit_field(field, editor, ancestors, state).map(Selection::Field),
        Selection::FragmentSpread(spread) => {
            edit_fragment_spread(spread, editor, ancestors, state).map(Selection::FragmentSpread)
        }
        Selection::InlineFragment(fragment) => {
            edit_inline_fragment(fragment, editor, ancestors, state).map(Selection::InlineFragment)
        }
    }?;

    match editor.leave_selection(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_field(node: Field, editor: &mut impl Editor, ancestors: &mut Ancestors, state: &mut State) -> Option<Field> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_field(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let snapshot = node.clone();

    let arguments = edit_arguments(node.arguments, editor, ancestors, state, &AstNode::Field(snapshot.clone()));
    let directives = edit_directives(node.directives, editor, ancestors, state, &AstNode::Field(snapshot.clone()));

    let selection_set = if let Some(selection_set) = node.selection_set {
        ancestors.enter("selectionSet", AstNode::Field(snapshot));
        let edited = edit_selection_set(selection_set, editor, ancestors, state);
        ancestors.exit();
        edited
    } else {
        None
    };

    let node = Field { arguments, directives, selection_set, ..node };

    match editor.leave_field(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_fragment_spread(
    node: FragmentSpread,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<FragmentSpread> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_fragment_spread(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let directives = edit_directives(node.directives, editor, ancestors, state, &AstNode::FragmentSpread(node.clone()));

    let node = FragmentSpread { directives, ..node };

    match editor.leave_fragment_spread(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_inline_fragment(
    node: InlineFragment,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<InlineFragment> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_inline_fragment(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let snapshot = node.clone();

    let directives =
        edit_directives(node.directives, editor, ancestors, state, &AstNode::InlineFragment(snapshot.clone()));

    ancestors.enter("selectionSet", AstNode::InlineFragment(snapshot));
    let selection_set = edit_selection_set(node.selection_set, editor, ancestors, state)
        .unwrap_or_else(|| SelectionSet { span: None, selections: Vec::new() });
    ancestors.exit();

    let node = InlineFragment { directives, selection_set, ..node };

    match editor.leave_inline_fragment(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_arguments(
    arguments: Vec<Argument>,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
    container: &AstNode,
) -> Vec<Argument> {
    arguments
        .into_iter()
        .enumerate()
        .filter_map(|(index, argument)| {
            if state.broken {
                return Some(argument);
            }
            ancestors.enter(index, container.clone());
            let edited = edit_argument(argument, editor, ancestors, state);
            ancestors.exit();
            edited
        })
        .collect()
}

fn edit_argument(
    node: Argument,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<Argument> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_argument(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    ancestors.enter("value", AstNode::Argument(node.clone()));
    let value = edit_value(node.value, editor, ancestors, state).unwrap_or(Value::Null(NullValue { span: None }));
    ancestors.exit();

    let node = Argument { value, ..node };

    match editor.leave_argument(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_directives(
    directives: Vec<Directive>,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
    container: &AstNode,
) -> Vec<Directive> {
    directives
        .into_iter()
        .enumerate()
        .filter_map(|(index, directive)| {
            if state.broken {
                return Some(directive);
            }
            ancestors.enter(index, container.clone());
            let edited = edit_directive(directive, editor, ancestors, state);
            ancestors.exit();
            edited
        })
        .collect()
}

fn edit_directive(
    node: Directive,
    editor: &mut impl Editor,
    ancestors: &mut Ancestors,
    state: &mut State,
) -> Option<Directive> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_directive(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let arguments = edit_arguments(node.arguments, editor, ancestors, state, &AstNode::Directive(node.clone()));

    let node = Directive { arguments, ..node };

    match editor.leave_directive(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

fn edit_value(node: Value, editor: &mut impl Editor, ancestors: &mut Ancestors, state: &mut State) -> Option<Value> {
    if state.broken {
        return Some(node);
    }

    let node = match editor.enter_value(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            return Some(node);
        }
        Action::Skip => return Some(node),
        Action::Delete => return None,
        Action::Replace(replacement) => replacement,
        Action::Continue => node,
    };

    let node = match node {
        Value::List(list) => {
            let container = AstNode::Value(Value::List(list.clone()));
            let values = list
                .values
                .into_iter()
                .enumerate()
                .filter_map(|(index, value)| {
                    if state.broken {
                        return Some(value);
                    }
                    ancestors.enter(index, container.clone());
                    let edited = edit_value(value, editor, ancestors, state);
                    ancestors.exit();
                    edited
                })
                .collect();
            Value::List(ListValue { values, ..list })
        }
        Value::Object(object) => {
            let container = AstNode::Value(Value::Object(object.clone()));
            let fields = object
                .fields
                .into_iter()
                .enumerate()
                .filter_map(|(index, field)| {
                    if state.broken {
                        return Some(field);
                    }
                    ancestors.enter(index, container.clone());
                    let value = edit_value(field.value, editor, ancestors, state);
                    ancestors.exit();
                    value.map(|value| ObjectField { value, ..field })
                })
                .collect();
            Value::Object(ObjectValue { fields, ..object })
        }
        other => other,
    };

    match editor.leave_value(&node, ancestors) {
        Action::Break => {
            state.broken = true;
            Some(node)
        }
        Action::Delete => None,
        Action::Replace(replacement) => Some(replacement),
        _ => Some(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    struct DropFieldsNamedB;

    impl Editor for DropFieldsNamedB {
        fn enter_selection(&mut self, node: &Selection, _ancestors: &Ancestors) -> Action<Selection> {
            match node {
                Selection::Field(field) if field.name.value == "b" => Action::Delete,
                _ => Action::Continue,
            }
        }
    }

    #[test]
    fn deletes_matching_fields_from_every_selection_set() {
        let source = Source::new("{ a b c { a b } }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();

        let edited = edit_document(document, &mut DropFieldsNamedB);

        let operation = match &edited.definitions[0] {
            Definition::Operation(operation) => operation,
            _ => panic!("expected an operation"),
        };
        let names: Vec<&str> = operation
            .selection_set
            .selections
            .iter()
            .filter_map(|selection| match selection {
                Selection::Field(field) => Some(field.name.value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "c"]);

        let nested = match &operation.selection_set.selections[1] {
            Selection::Field(field) => field.selection_set.as_ref().unwrap(),
            _ => panic!("expected field c"),
        };
        let nested_names: Vec<&str> = nested
            .selections
            .iter()
            .filter_map(|selection| match selection {
                Selection::Field(field) => Some(field.name.value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(nested_names, vec!["a"]);
    }

    #[test]
    fn ancestors_length_is_path_length_minus_one() {
        struct RecordDepth {
            invariant_holds: bool,
        }

        impl Editor for RecordDepth {
            fn enter_field(&mut self, _node: &Field, ancestors: &Ancestors) -> Action<Field> {
                if ancestors.ancestors().len() + 1 != ancestors.path().len() {
                    self.invariant_holds = false;
                }
                Action::Continue
            }
        }

        let source = Source::new("{ a { b } }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();

        let mut editor = RecordDepth { invariant_holds: true };
        edit_document(document, &mut editor);
        assert!(editor.invariant_holds);
    }

    #[test]
    fn ancestors_excludes_the_node_currently_being_visited() {
        struct RecordParent {
            parent_is_outer_selection_set: bool,
        }

        impl Editor for RecordParent {
            fn enter_field(&mut self, node: &Field, ancestors: &Ancestors) -> Action<Field> {
                if node.name.value == "b" {
                    self.parent_is_outer_selection_set =
                        matches!(ancestors.parent(), Some(AstNode::SelectionSet(_)));
                }
                Action::Continue
            }
        }

        let source = Source::new("{ a { b } }");
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();

        let mut editor = RecordParent { parent_is_outer_selection_set: false };
        edit_document(document, &mut editor);
        assert!(editor.parent_is_outer_selection_set);
    }
}
