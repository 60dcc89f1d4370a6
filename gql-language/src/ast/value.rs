use super::macros::{ast_enum, ast_struct};
use super::Name;
use crate::lex::Span;

ast_enum!(
    /// A GraphQL value, as it appears in an argument, a default value, a
    /// list or an object field. The `constant` flag threaded
    /// through the parser controls whether a `Variable` is
    /// permitted at this position; it is not itself part of the AST.
    Value {
        Variable(Variable),
        Int(IntValue),
        Float(FloatValue),
        String(StringValue),
        Boolean(BooleanValue),
        Null(NullValue),
        Enum(EnumValue),
        List(ListValue),
        Object(ObjectValue),
    }
);

ast_struct!(Variable { name: Name });
ast_struct!(IntValue { value: String });
ast_struct!(FloatValue { value: String });

ast_struct!(
    /// A string or block-string literal. `block` distinguishes `"""…"""`
    /// literals so the printer can choose `printBlockString` over the
    /// regular string-escaping routine.
    StringValue {
        value: String,
        block: bool,
    }
);

ast_struct!(BooleanValue { value: bool });
ast_struct!(NullValue {});
ast_struct!(EnumValue { value: String });
ast_struct!(ListValue { values: Vec<Value> });
ast_struct!(ObjectValue { fields: Vec<ObjectField> });
ast_struct!(ObjectField { name: Name, value: Value });

impl Value {
    pub fn is_constant(&self) -> bool {
        match self {
            Value::Variable(_) => false,
            Value::List(list) => list.values.iter().all(Value::is_constant),
            Value::Object(object) => object.fields.iter().all(|field| field.value.is_constant()),
            _ => true,
        }
    }

    pub fn describe_kind(&self) -> &'static str {
        match self {
            Value::Variable(_) => "variable",
            Value::Int(_) => "int value",
            Value::Float(_) => "float value",
            Value::String(_) => "string value",
            Value::Boolean(_) => "boolean value",
            Value::Null(_) => "null value",
            Value::Enum(_) => "enum value",
            Value::List(_) => "list value",
            Value::Object(_) => "object value",
        }
    }
}
