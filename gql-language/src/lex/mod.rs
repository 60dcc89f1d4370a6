//! Source buffering and tokenization.

mod lexer;
mod source;
mod span;
mod token;

pub use lexer::{strip_block_string_indentation, tokenize};
pub use source::Source;
pub use span::{Location, Span};
pub use token::{Token, TokenKind, TokenStream};
