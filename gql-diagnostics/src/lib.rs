//! Shared error and diagnostic vocabulary for the `graphql-rs` workspace.
//!
//! Every crate in the workspace reports failures as [`GraphQLError`], so that
//! syntax errors, validation errors, coercion errors, field errors and schema
//! errors all serialize through the same wire-format error object.

mod error;
mod location;
mod path;

#[cfg(feature = "pretty-errors")]
pub mod pretty;

pub use error::{coercion, field, schema, syntax, validation, GraphQLError};
pub use location::{offset_to_location, SourceLocation};
pub use path::{extend_path, PathSegment};
