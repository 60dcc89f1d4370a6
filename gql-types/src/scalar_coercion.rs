//! Parse/serialize functions for the five built-in scalars, following the
//! October 2021 GraphQL spec's own `Int`/`Float`/`String`/`Boolean`/`ID`
//! coercion sections.
//!
//! Custom scalars have no built-in rule: callers fall through to the
//! identity coercion (accept/return the JSON value unchanged), matching
//! `apollo-compiler`'s own "Custom scalar" fallthrough.

use gql_language::ast::Value as AstValue;
use serde_json::Value as JsonValue;

const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Input coercion: a value supplied as a JSON variable, coerced to the
/// shape the scalar expects. Mirrors §sec-Int.Input-Coercion /
/// §sec-Float.Input-Coercion / etc.
pub fn parse_scalar(type_name: &str, value: &JsonValue) -> Result<JsonValue, String> {
    match type_name {
        "Int" => match int_from_value(value) {
            Some(int) => Ok(JsonValue::from(int)),
            None => Err(format!("Int cannot represent non 32-bit signed integer value: {}", value)),
        },
        "Float" => match value.as_f64() {
            Some(_) => Ok(value.clone()),
            None => Err(format!("Float cannot represent non numeric value: {}", value)),
        },
        "String" => match value.is_string() {
            true => Ok(value.clone()),
            false => Err(format!("String cannot represent a non string value: {}", value)),
        },
        "Boolean" => match value.is_boolean() {
            true => Ok(value.clone()),
            false => Err(format!("Boolean cannot represent a non boolean value: {}", value)),
        },
        "ID" => match value.is_string() || value.is_i64() {
            true => Ok(match value {
                JsonValue::Number(number) => JsonValue::String(number.to_string()),
                other => other.clone(),
            }),
            false => Err(format!("ID cannot represent value: {}", value)),
        },
        _ => Ok(value.clone()),
    }
}

/// Output (result) coercion: a resolver-returned native value, serialized
/// to the scalar's wire representation.
pub fn serialize_scalar(type_name: &str, value: &JsonValue) -> Result<JsonValue, String> {
    match type_name {
        "Int" => match int_from_value(value) {
            Some(int) => Ok(JsonValue::from(int)),
            None => Err(format!("Int cannot represent non-integer value: {}", value)),
        },
        "Float" => match coerce_to_f64(value) {
            Some(float) => Ok(serde_json::Number::from_f64(float).map(JsonValue::Number).unwrap_or(JsonValue::Null)),
            None => Err(format!("Float cannot represent non numeric value: {}", value)),
        },
        "String" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Bool(b) => Ok(JsonValue::String(b.to_string())),
            JsonValue::Number(n) => Ok(JsonValue::String(n.to_string())),
            _ => Err(format!("String cannot represent value: {}", value)),
        },
        "Boolean" => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            _ => Err(format!("Boolean cannot represent a non boolean value: {}", value)),
        },
        "ID" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(n) => Ok(JsonValue::String(n.to_string())),
            _ => Err(format!("ID cannot represent value: {}", value)),
        },
        _ => Ok(value.clone()),
    }
}

/// Accepts an i32-range JSON number as an `Int`: an integer directly, or an
/// integral float (`2.0`, not `2.5`), matching JS's `Number.isInteger()`
/// semantics the real coercion rule is built on.
fn int_from_value(value: &JsonValue) -> Option<i64> {
    let int = match value.as_i64() {
        Some(int) => int,
        None => {
            let float = value.as_f64()?;
            if float.fract() != 0.0 {
                return None;
            }
            float as i64
        }
    };
    i32::try_from(int).ok()?;
    Some(int)
}

fn coerce_to_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(number) => number.as_f64(),
        _ => None,
    }
}

/// Converts a constant AST literal (a default value, or an inline
/// argument value once all variables have been substituted) into its JSON
/// representation, independent of any particular scalar — used by the
/// input-object/variable coercion pipeline in `gql-executor` before the
/// scalar-specific rules above are applied.
pub fn literal_to_json(value: &AstValue) -> JsonValue {
    match value {
        AstValue::Variable(_) => JsonValue::Null,
        AstValue::Int(int) => int
            .value
            .parse::<i64>()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
        AstValue::Float(float) => float
            .value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AstValue::String(string) => JsonValue::String(string.value.clone()),
        AstValue::Boolean(boolean) => JsonValue::Bool(boolean.value),
        AstValue::Null(_) => JsonValue::Null,
        AstValue::Enum(r#enum) => JsonValue::String(r#enum.value.clone()),
        AstValue::List(list) => JsonValue::Array(list.values.iter().map(literal_to_json).collect()),
        AstValue::Object(object) => {
            let mut map = serde_json::Map::new();
            for field in &object.fields {
                map.insert(field.name.value.clone(), literal_to_json(&field.value));
            }
            JsonValue::Object(map)
        }
    }
}

/// `coerce_literal` is the literal-facing counterpart to [`parse_scalar`]:
/// convert a constant AST value straight to its scalar-coerced JSON form in
/// one step, used by the input-value-of-correct-type validation rule.
pub fn coerce_literal(type_name: &str, value: &AstValue) -> Result<JsonValue, String> {
    parse_scalar(type_name, &literal_to_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_rejects_out_of_range_values() {
        let value = JsonValue::from(i64::from(i32::MAX) + 1);
        assert!(parse_scalar("Int", &value).is_err());
    }

    #[test]
    fn int_accepts_an_integral_float() {
        let value = serde_json::json!(2.0);
        assert_eq!(parse_scalar("Int", &value).unwrap(), JsonValue::from(2));
        assert_eq!(serialize_scalar("Int", &value).unwrap(), JsonValue::from(2));
    }

    #[test]
    fn int_rejects_a_non_integral_float() {
        let value = serde_json::json!(2.5);
        assert!(parse_scalar("Int", &value).is_err());
    }

    #[test]
    fn id_accepts_both_strings_and_integers() {
        assert!(parse_scalar("ID", &JsonValue::from(1)).is_ok());
        assert!(parse_scalar("ID", &JsonValue::from("1")).is_ok());
        assert_eq!(serialize_scalar("ID", &JsonValue::from(1)).unwrap(), JsonValue::from("1"));
    }

    #[test]
    fn custom_scalars_pass_through_unchanged() {
        let value = JsonValue::from("2024-01-01");
        assert_eq!(parse_scalar("DateTime", &value).unwrap(), value);
    }
}
