use serde_json::Value as JsonValue;

/// A resolver's result before field completion has applied the declared
/// return type: a bare scalar/enum/null value, an object awaiting a
/// sub-selection, or a collection standing in for a list field.
#[derive(Debug)]
pub enum Intermediate<V> {
    Value(JsonValue),
    Object(V),
    Collection(Vec<Intermediate<V>>),
}

impl<V> From<JsonValue> for Intermediate<V> {
    fn from(value: JsonValue) -> Intermediate<V> {
        Intermediate::Value(value)
    }
}
