//! The canonical printer: turns an AST back into GraphQL source text. A
//! document parsed and printed, then parsed again, produces a structurally
//! equal tree (locations aside); printing a second time from that second
//! parse yields character-for-character the same text as the first print.
//!
//! This only ever emits GraphQL, so it's a direct recursive descent with
//! one 80-column wrapping rule, not a generic layout solver.

mod block_string;
mod string;

use block_string::print_block_string;
use string::print_string;

use crate::ast::*;

const MAX_LINE_WIDTH: usize = 80;
const INDENT: &str = "  ";

/// Prints a full document: its definitions, separated by a blank line.
pub fn print(document: &Document) -> String {
    join(document.definitions.iter().map(print_definition), "\n\n")
}

pub fn print_value(value: &Value) -> String {
    match value {
        Value::Variable(variable) => format!("${}", variable.name.value),
        Value::Int(int) => int.value.clone(),
        Value::Float(float) => float.value.clone(),
        Value::String(string) if string.block => print_block_string(&string.value, "", false),
        Value::String(string) => print_string(&string.value),
        Value::Boolean(boolean) => boolean.value.to_string(),
        Value::Null(_) => "null".to_owned(),
        Value::Enum(r#enum) => r#enum.value.clone(),
        Value::List(list) => format!("[{}]", join(list.values.iter().map(print_value), ", ")),
        Value::Object(object) => {
            wrap_entries("{", object.fields.iter().map(print_object_field).collect(), "}")
        }
    }
}

fn print_object_field(field: &ObjectField) -> String {
    format!("{}: {}", field.name.value, print_value(&field.value))
}

pub fn print_type(ty: &Type) -> String {
    match ty {
        Type::Named(named) => named.name.value.clone(),
        Type::List(list) => format!("[{}]", print_type(&list.ty)),
        Type::NonNull(non_null) => format!("{}!", print_type(&non_null.ty)),
    }
}

fn print_definition(definition: &Definition) -> String {
    match definition {
        Definition::Operation(operation) => print_operation_definition(operation),
        Definition::Fragment(fragment) => print_fragment_definition(fragment),
        Definition::Schema(schema) => print_schema_definition(schema),
        Definition::SchemaExtension(extension) => print_schema_extension(extension),
        Definition::ScalarType(scalar) => print_scalar_type_definition(scalar),
        Definition::ScalarTypeExtension(extension) => {
            format!("extend scalar {}{}", extension.name.value, print_directives(&extension.directives))
        }
        Definition::ObjectType(object) => print_object_type_definition(object),
        Definition::ObjectTypeExtension(extension) => print_object_type_extension(extension),
        Definition::InterfaceType(interface) => print_interface_type_definition(interface),
        Definition::InterfaceTypeExtension(extension) => print_interface_type_extension(extension),
        Definition::UnionType(union) => print_union_type_definition(union),
        Definition::UnionTypeExtension(extension) => print_union_type_extension(extension),
        Definition::EnumType(r#enum) => print_enum_type_definition(r#enum),
        Definition::EnumTypeExtension(extension) => print_enum_type_extension(extension),
        Definition::InputObjectType(input) => print_input_object_type_definition(input),
        Definition::InputObjectTypeExtension(extension) => print_input_object_type_extension(extension),
        Definition::Directive(directive) => print_directive_definition(directive),
    }
}

fn print_operation_definition(operation: &OperationDefinition) -> String {
    let name = operation.name.as_ref().map(|name| name.value.as_str()).unwrap_or("");
    let variable_definitions = print_variable_definitions(&operation.variable_definitions);
    let directives = print_directives(&operation.directives);
    let selection_set = print_selection_set(&operation.selection_set, 0);

    // A shorthand query with no name, variables or directives prints as just
    // its selection set, matching how it's commonly authored.
    if operation.operation == OperationType::Query
        && operation.name.is_none()
        && operation.variable_definitions.is_empty()
        && operation.directives.is_empty()
    {
        return selection_set;
    }

    let head = join(
        [operation.operation.describe().to_owned(), name.to_owned(), variable_definitions]
            .into_iter()
            .filter(|part| !part.is_empty()),
        " ",
    );
    join([head, directives, selection_set].into_iter().filter(|part| !part.is_empty()), " ")
}

fn print_fragment_definition(fragment: &FragmentDefinition) -> String {
    format!(
        "fragment {} on {}{} {}",
        fragment.name.value,
        fragment.type_condition.value,
        print_directives(&fragment.directives),
        print_selection_set(&fragment.selection_set, 0)
    )
}

fn print_selection_set(selection_set: &SelectionSet, depth: usize) -> String {
    if selection_set.selections.is_empty() {
        return String::new();
    }
    let indent = INDENT.repeat(depth + 1);
    let body = selection_set
        .selections
        .iter()
        .map(|selection| format!("{}{}", indent, print_selection(selection, depth + 1)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{{\n{}\n{}}}", body, INDENT.repeat(depth))
}

fn print_selection(selection: &Selection, depth: usize) -> String {
    match selection {
        Selection::Field(field) => print_field(field, depth),
        Selection::FragmentSpread(spread) => {
            format!("...{}{}", spread.fragment_name.value, print_directives(&spread.directives))
        }
        Selection::InlineFragment(inline) => {
            let type_condition =
                inline.type_condition.as_ref().map(|name| format!(" on {}", name.value)).unwrap_or_default();
            let directives = print_directives(&inline.directives);
            let selection_set = print_selection_set(&inline.selection_set, depth);
            format!("...{}{} {}", type_condition, directives, selection_set)
        }
    }
}

fn print_field(field: &Field, depth: usize) -> String {
    let alias = field.alias.as_ref().map(|alias| format!("{}: ", alias.value)).unwrap_or_default();
    let arguments = print_arguments(&field.arguments);
    let directives = print_directives(&field.directives);
    let selection_set =
        field.selection_set.as_ref().map(|set| format!(" {}", print_selection_set(set, depth))).unwrap_or_default();
    format!("{}{}{}{}{}", alias, field.name.value, arguments, directives, selection_set)
}

fn print_arguments(arguments: &[Argument]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    wrap_entries(
        "(",
        arguments.iter().map(|argument| format!("{}: {}", argument.name.value, print_value(&argument.value))).collect(),
        ")",
    )
}

fn print_variable_definitions(definitions: &[VariableDefinition]) -> String {
    if definitions.is_empty() {
        return String::new();
    }
    wrap_entries("(", definitions.iter().map(print_variable_definition).collect(), ")")
}

fn print_variable_definition(definition: &VariableDefinition) -> String {
    let default_value =
        definition.default_value.as_ref().map(|value| format!(" = {}", print_value(value))).unwrap_or_default();
    format!(
        "${}: {}{}{}",
        definition.variable.name.value,
        print_type(&definition.ty),
        default_value,
        print_directives(&definition.directives)
    )
}

fn print_directives(directives: &[Directive]) -> String {
    if directives.is_empty() {
        return String::new();
    }
    format!(" {}", join(directives.iter().map(print_directive), " "))
}

fn print_directive(directive: &Directive) -> String {
    format!("@{}{}", directive.name.value, print_arguments(&directive.arguments))
}

fn print_schema_definition(schema: &SchemaDefinition) -> String {
    let description = print_description(&schema.description);
    format!(
        "{}schema{} {}",
        description,
        print_directives(&schema.directives),
        print_operation_type_definitions(&schema.root_operation_types)
    )
}

fn print_schema_extension(extension: &SchemaExtension) -> String {
    let root_types = if extension.root_operation_types.is_empty() {
        String::new()
    } else {
        format!(" {}", print_operation_type_definitions(&extension.root_operation_types))
    };
    format!("extend schema{}{}", print_directives(&extension.directives), root_types)
}

fn print_operation_type_definitions(definitions: &[OperationTypeDefinition]) -> String {
    let body = definitions
        .iter()
        .map(|definition| format!("{}{}: {}", INDENT, definition.operation.describe(), definition.named_type.value))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{{\n{}\n}}", body)
}

fn print_scalar_type_definition(scalar: &ScalarTypeDefinition) -> String {
    format!(
        "{}scalar {}{}",
        print_description(&scalar.description),
        scalar.name.value,
        print_directives(&scalar.directives)
    )
}

fn print_object_type_definition(object: &ObjectTypeDefinition) -> String {
    format!(
        "{}type {}{}{}{}",
        print_description(&object.description),
        object.name.value,
        print_implements_interfaces(&object.implements_interfaces),
        print_directives(&object.directives),
        print_fields_definition(&object.fields)
    )
}

fn print_object_type_extension(extension: &ObjectTypeExtension) -> String {
    format!(
        "extend type {}{}{}{}",
        extension.name.value,
        print_implements_interfaces(&extension.implements_interfaces),
        print_directives(&extension.directives),
        print_fields_definition(&extension.fields)
    )
}

fn print_interface_type_definition(interface: &InterfaceTypeDefinition) -> String {
    format!(
        "{}interface {}{}{}{}",
        print_description(&interface.description),
        interface.name.value,
        print_implements_interfaces(&interface.implements_interfaces),
        print_directives(&interface.directives),
        print_fields_definition(&interface.fields)
    )
}

fn print_interface_type_extension(extension: &InterfaceTypeExtension) -> String {
    format!(
        "extend interface {}{}{}{}",
        extension.name.value,
        print_implements_interfaces(&extension.implements_interfaces),
        print_directives(&extension.directives),
        print_fields_definition(&extension.fields)
    )
}

fn print_union_type_definition(union: &UnionTypeDefinition) -> String {
    format!(
        "{}union {}{}{}",
        print_description(&union.description),
        union.name.value,
        print_directives(&union.directives),
        print_union_member_types(&union.member_types)
    )
}

fn print_union_type_extension(extension: &UnionTypeExtension) -> String {
    format!(
        "extend union {}{}{}",
        extension.name.value,
        print_directives(&extension.directives),
        print_union_member_types(&extension.member_types)
    )
}

fn print_union_member_types(members: &[Name]) -> String {
    if members.is_empty() {
        String::new()
    } else {
        format!(" = {}", join(members.iter().map(|name| name.value.clone()), " | "))
    }
}

fn print_enum_type_definition(r#enum: &EnumTypeDefinition) -> String {
    format!(
        "{}enum {}{}{}",
        print_description(&r#enum.description),
        r#enum.name.value,
        print_directives(&r#enum.directives),
        print_enum_values_definition(&r#enum.values)
    )
}

fn print_enum_type_extension(extension: &EnumTypeExtension) -> String {
    format!(
        "extend enum {}{}{}",
        extension.name.value,
        print_directives(&extension.directives),
        print_enum_values_definition(&extension.values)
    )
}

fn print_enum_values_definition(values: &[EnumValueDefinition]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let body = values
        .iter()
        .map(|value| {
            format!(
                "{}{}{}{}",
                INDENT,
                print_description(&value.description),
                value.value.value,
                print_directives(&value.directives)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(" {{\n{}\n}}", body)
}

fn print_input_object_type_definition(input: &InputObjectTypeDefinition) -> String {
    format!(
        "{}input {}{}{}",
        print_description(&input.description),
        input.name.value,
        print_directives(&input.directives),
        print_input_fields_definition(&input.fields)
    )
}

fn print_input_object_type_extension(extension: &InputObjectTypeExtension) -> String {
    format!(
        "extend input {}{}{}",
        extension.name.value,
        print_directives(&extension.directives),
        print_input_fields_definition(&extension.fields)
    )
}

fn print_input_fields_definition(fields: &[InputValueDefinition]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let body =
        fields.iter().map(|field| format!("{}{}", INDENT, print_input_value_definition(field))).collect::<Vec<_>>().join("\n");
    format!(" {{\n{}\n}}", body)
}

fn print_implements_interfaces(interfaces: &[Name]) -> String {
    if interfaces.is_empty() {
        String::new()
    } else {
        format!(" implements {}", join(interfaces.iter().map(|name| name.value.clone()), " & "))
    }
}

fn print_fields_definition(fields: &[FieldDefinition]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let body = fields
        .iter()
        .map(|field| {
            format!(
                "{}{}{}: {}{}{}",
                INDENT,
                print_description(&field.description),
                field.name.value,
                print_argument_definitions(&field.arguments),
                print_type(&field.ty),
                print_directives(&field.directives)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(" {{\n{}\n}}", body)
}

fn print_argument_definitions(arguments: &[InputValueDefinition]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    format!("{}", wrap_entries("(", arguments.iter().map(print_input_value_definition).collect(), ")"))
}

fn print_input_value_definition(definition: &InputValueDefinition) -> String {
    let default_value =
        definition.default_value.as_ref().map(|value| format!(" = {}", print_value(value))).unwrap_or_default();
    format!(
        "{}{}: {}{}{}",
        print_description(&definition.description),
        definition.name.value,
        print_type(&definition.ty),
        default_value,
        print_directives(&definition.directives)
    )
}

fn print_directive_definition(definition: &DirectiveDefinition) -> String {
    let repeatable = if definition.repeatable { " repeatable" } else { "" };
    format!(
        "{}directive @{}{} {} on {}",
        print_description(&definition.description),
        definition.name.value,
        print_argument_definitions(&definition.arguments),
        repeatable.trim_start(),
        join(definition.locations.iter().map(|location| location.value.clone()), " | ")
    )
}

fn print_description(description: &Option<Description>) -> String {
    match description {
        None => String::new(),
        Some(description) if description.block => print_block_string(&description.value, "", true) + "\n",
        Some(description) => print_string(&description.value) + "\n",
    }
}

/// Prints a parenthesized/braced list of already-formatted entries, inline
/// with `, ` separators when that fits within one 80-column line, otherwise
/// one entry per line indented once, with no separating commas.
fn wrap_entries(open: &str, entries: Vec<String>, close: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let inline = format!("{}{}{}", open, entries.join(", "), close);
    if inline.len() <= MAX_LINE_WIDTH && !inline.contains('\n') {
        return inline;
    }
    let body = entries.iter().map(|entry| format!("{}{}", INDENT, entry)).collect::<Vec<_>>().join("\n");
    format!("{}\n{}\n{}", open, body, close)
}

fn join(parts: impl IntoIterator<Item = String>, separator: &str) -> String {
    parts.into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{tokenize, Source};
    use crate::syn::parse;

    fn roundtrip(source: &str) -> String {
        let source = Source::new(source);
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        print(&document)
    }

    #[test]
    fn shorthand_query_prints_as_bare_selection_set() {
        assert_eq!(roundtrip("{ a }"), "{\n  a\n}");
    }

    #[test]
    fn printing_is_idempotent_after_one_parse() {
        let once = roundtrip("query Greeting($name: String = \"world\") { hello(name: $name) }");
        let source = Source::new(&once);
        let tokens = tokenize(&source.body).unwrap();
        let document = parse(&tokens, &source).unwrap();
        assert_eq!(print(&document), once);
    }

    #[test]
    fn long_argument_lists_break_onto_their_own_lines() {
        let query = "{ field(firstArgument: \"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\", secondArgument: \"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\") }";
        let printed = roundtrip(query);
        assert!(printed.contains("(\n"));
    }

    #[test]
    fn prints_sdl_object_type_with_fields() {
        let printed = roundtrip("type User {\n  id: ID!\n  name: String\n}");
        assert!(printed.starts_with("type User {"));
        assert!(printed.contains("  id: ID!"));
    }
}
