use std::borrow::Cow;

/// Implemented by a resolver's value type so the executor can answer
/// `__typename` and resolve interface/union fields to their runtime object
/// type without a separate `resolve_type` callback per abstract type.
pub trait Typename {
    fn typename(&self) -> Cow<'_, str>;
}
