use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::{offset_to_location, PathSegment, SourceLocation};

/// The single error type produced anywhere in `graphql-rs`: by the lexer and
/// parser, the validator, variable and input coercion, resolvers and scalar
/// serializers, and schema construction. One taxonomy rather than one type
/// per phase, since they all serialize to the same wire-format error object.
#[derive(Clone, Debug, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<IndexMap<String, Value>>,
    #[serde(skip)]
    pub original_error: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl GraphQLError {
    pub fn new(message: impl Display) -> GraphQLError {
        GraphQLError {
            message: message.to_string(),
            positions: Vec::new(),
            locations: Vec::new(),
            path: None,
            extensions: None,
            original_error: None,
        }
    }

    /// Attaches a byte position and its corresponding `(line, column)`,
    /// computed against `source`, to this error. Parser and lexer errors call
    /// this once per offending offset.
    pub fn at_offset(mut self, source: &str, offset: usize) -> GraphQLError {
        self.positions.push(offset);
        self.locations.push(offset_to_location(source, offset));
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> GraphQLError {
        self.locations.push(location);
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> GraphQLError {
        self.path = Some(path);
        self
    }

    pub fn with_extensions(mut self, extensions: IndexMap<String, Value>) -> GraphQLError {
        self.extensions = Some(extensions);
        self
    }

    pub fn with_original_error(
        mut self,
        original: impl std::error::Error + Send + Sync + 'static,
    ) -> GraphQLError {
        self.original_error = Some(Arc::new(original));
        self
    }

    /// Renders a two-line caret excerpt: the offending source line, followed
    /// by a `^` marker under the reported column. Used by `SyntaxError`'s
    /// `Display` impl.
    pub fn caret_excerpt(source: &str, location: SourceLocation) -> String {
        let line_text = source.lines().nth(location.line.saturating_sub(1)).unwrap_or("");
        let marker_column = location.column.saturating_sub(1);
        format!("{}\n{}^", line_text, " ".repeat(marker_column))
    }
}

impl Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(location) = self.locations.first() {
            write!(f, " ({}:{})", location.line, location.column)?;
        }

        Ok(())
    }
}

impl std::error::Error for GraphQLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.original_error
            .as_ref()
            .map(|error| error.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Constructors for the syntax-error phase: always
/// fatal to the current `parse`/`parse_value`/`parse_type` call.
pub mod syntax {
    use super::GraphQLError;

    pub fn unexpected(source: &str, offset: usize, expected: &str, found: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Expected {}, found {}", expected, found))
            .at_offset(source, offset)
    }

    pub fn unterminated_string(source: &str, offset: usize) -> GraphQLError {
        GraphQLError::new("Unterminated string.").at_offset(source, offset)
    }

    pub fn invalid_number(source: &str, offset: usize, detail: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Invalid number, {}.", detail)).at_offset(source, offset)
    }

    pub fn invalid_escape(source: &str, offset: usize, escape: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Invalid character escape sequence: {}.", escape))
            .at_offset(source, offset)
    }

    pub fn selection_depth_exceeded(source: &str, offset: usize, limit: usize) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Selection set exceeds maximum depth of {}.",
            limit
        ))
        .at_offset(source, offset)
    }
}

/// Constructors for the variable- and input-literal coercion phase.
pub mod coercion {
    use super::GraphQLError;

    pub fn unknown_variable(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" is not defined by operation.",
            name
        ))
    }

    pub fn missing_variable_value(name: &str, ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" of required type \"{}\" was not provided.",
            name, ty
        ))
    }

    pub fn wrong_type(name: &str, ty: &str, detail: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" got invalid value; {} (expected type \"{}\")",
            name, detail, ty
        ))
    }

    pub fn invalid_literal(type_name: &str, detail: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Expected value of type \"{}\", {}",
            type_name, detail
        ))
    }

    pub fn one_of_violation(type_name: &str, detail: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Input object of type \"{}\" is invalid: {}",
            type_name, detail
        ))
    }
}

/// Constructors for the execution phase.
pub mod field {
    use super::GraphQLError;

    pub fn non_null_violation(field: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Cannot return null for non-nullable field \"{}\".",
            field
        ))
    }

    pub fn unknown_field(ty: &str, field: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Cannot query field \"{}\" on type \"{}\".",
            field, ty
        ))
    }

    pub fn unresolved_abstract_type(ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Abstract type \"{}\" must resolve to an object type at runtime.",
            ty
        ))
    }

    pub fn cancelled() -> GraphQLError {
        GraphQLError::new("Execution was cancelled.")
    }
}

/// Constructors for the schema-build phase.
pub mod schema {
    use super::GraphQLError;

    pub fn duplicate_type(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Type \"{}\" was defined more than once.", name))
    }

    pub fn duplicate_directive(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Directive \"@{}\" was defined more than once.",
            name
        ))
    }

    pub fn unknown_type(name: &str, referenced_from: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Unknown type \"{}\" referenced by \"{}\".",
            name, referenced_from
        ))
    }

    pub fn missing_query_root() -> GraphQLError {
        GraphQLError::new("Type Query must be defined, or a schema definition must specify a query root.")
    }

    pub fn root_not_object(operation: &str, name: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "{} root type \"{}\" must be an object type.",
            operation, name
        ))
    }

    pub fn input_cycle(path: &[String]) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Input object field graph contains a cycle: {}.",
            path.join(" -> ")
        ))
    }
}

/// Constructors for the document-validation phase: a request's AST checked
/// against a schema before execution. Unlike the other phases, validation
/// never stops at the first error — every rule runs and every violation it
/// finds is reported.
pub mod validation {
    use super::GraphQLError;

    pub fn duplicate_operation_name(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "There can be only one operation named \"{}\".",
            name
        ))
    }

    pub fn anonymous_operation_not_alone() -> GraphQLError {
        GraphQLError::new("This anonymous operation must be the only defined operation.")
    }

    pub fn unused_fragment(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Fragment \"{}\" is never used.", name))
    }

    pub fn unknown_fragment(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Unknown fragment \"{}\".", name))
    }

    pub fn fragment_cycle(path: &[String]) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Cannot spread fragment \"{}\" within itself via {}.",
            path.first().map(String::as_str).unwrap_or(""),
            path.join(" -> ")
        ))
    }

    pub fn fragment_on_non_composite_type(fragment: &str, ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Fragment \"{}\" cannot condition on non composite type \"{}\".",
            fragment, ty
        ))
    }

    pub fn inline_fragment_on_non_composite_type(ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Fragment cannot condition on non composite type \"{}\".",
            ty
        ))
    }

    pub fn unused_variable(name: &str, operation: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" is never used in operation \"{}\".",
            name, operation
        ))
    }

    pub fn undefined_variable(name: &str, operation: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" is not defined by operation \"{}\".",
            name, operation
        ))
    }

    pub fn variable_type_mismatch(name: &str, variable_type: &str, location_type: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" of type \"{}\" cannot be used for a position expecting type \"{}\".",
            name, variable_type, location_type
        ))
    }

    pub fn variable_default_value_of_incorrect_type(name: &str, ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Variable \"${}\" has invalid default value for type \"{}\".",
            name, ty
        ))
    }

    pub fn unknown_argument(arg: &str, field: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Unknown argument \"{}\" on field \"{}\".",
            arg, field
        ))
    }

    pub fn duplicate_argument(arg: &str) -> GraphQLError {
        GraphQLError::new(format_args!("There can be only one argument named \"{}\".", arg))
    }

    pub fn missing_required_argument(arg: &str, ty: &str, field: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Field \"{}\" argument \"{}\" of type \"{}\" is required, but it was not provided.",
            field, arg, ty
        ))
    }

    pub fn unknown_directive(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Unknown directive \"@{}\".", name))
    }

    pub fn misplaced_directive(name: &str, location: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Directive \"@{}\" may not be used on {}.",
            name, location
        ))
    }

    pub fn duplicate_directive_not_repeatable(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "The directive \"@{}\" can only be used once at this location.",
            name
        ))
    }

    pub fn duplicate_input_field(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("There can be only one input field named \"{}\".", name))
    }

    pub fn value_of_incorrect_type(ty: &str, detail: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Expected value of type \"{}\", {}",
            ty, detail
        ))
    }

    pub fn unknown_type_in_fragment(name: &str) -> GraphQLError {
        GraphQLError::new(format_args!("Unknown type \"{}\".", name))
    }

    pub fn no_subselection_allowed(field: &str, ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Field \"{}\" must not have a selection since type \"{}\" has no subfields.",
            field, ty
        ))
    }

    pub fn subselection_required(field: &str, ty: &str) -> GraphQLError {
        GraphQLError::new(format_args!(
            "Field \"{}\" of type \"{}\" must have a selection of subfields.",
            field, ty
        ))
    }
}
