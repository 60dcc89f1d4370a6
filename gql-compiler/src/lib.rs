//! Ties the schema builder (`gql-types`) and the validator (`gql-validation`)
//! together into the request-compile half of the pipeline:
//! `build_schema`/`build_ast_schema` produce a `Schema`, `validate` runs
//! the full rule set against a document. [`Compiler`] bundles the two for
//! callers that build a schema once and validate many requests against it.

mod compiler;

pub use compiler::Compiler;
pub use gql_types::{build as build_schema, build_ast as build_ast_schema, BuildOptions};
pub use gql_validation::validate;
