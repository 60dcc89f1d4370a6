use gql_diagnostics::{syntax, GraphQLError};

use crate::lex::{Source, Span, Token, TokenKind, TokenStream};

/// Maximum nesting depth for a selection set. Chosen generously above any
/// realistic hand-written query while still catching the pathological
/// "deeply nested fragment cycle" documents that a parser otherwise has to
/// recurse arbitrarily deep to reject.
pub const MAX_SELECTION_DEPTH: usize = 512;

/// Walks a [`TokenStream`], skipping `Comment` tokens, and exposes the
/// small set of operations a recursive-descent parser needs: peek the kind
/// or value of the current token, consume it if it matches, or fail with a
/// positioned [`GraphQLError`].
pub struct Cursor<'a> {
    tokens: &'a TokenStream,
    source: &'a Source,
    position: usize,
    pub(crate) depth: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenStream, source: &'a Source) -> Cursor<'a> {
        let mut cursor = Cursor { tokens, source, position: 0, depth: 0 };
        cursor.skip_comments();
        cursor
    }

    fn skip_comments(&mut self) {
        while matches!(self.tokens.get(self.position).map(|token| token.kind), Some(TokenKind::Comment)) {
            self.position += 1;
        }
    }

    pub fn source(&self) -> &'a Source {
        self.source
    }

    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.position).expect("cursor always rests on a token, at worst Eof")
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    pub fn at_eof(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn is_name(&self, value: &str) -> bool {
        self.is(TokenKind::Name) && self.current().value.as_deref() == Some(value)
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.tokens.get(self.position).expect("cursor always rests on a token, at worst Eof");
        if token.kind != TokenKind::Eof {
            self.position += 1;
            self.skip_comments();
        }
        token
    }

    pub fn bump(&mut self) -> &'a Token {
        self.advance()
    }

    pub fn expect_punctuator(&mut self, kind: TokenKind) -> Result<Span, GraphQLError> {
        if self.is(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    pub fn eat_punctuator(&mut self, kind: TokenKind) -> bool {
        if self.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect_name(&mut self) -> Result<(String, Span), GraphQLError> {
        if self.is(TokenKind::Name) {
            let token = self.advance();
            Ok((token.value.clone().unwrap_or_default(), token.span))
        } else {
            Err(self.unexpected("Name"))
        }
    }

    /// Consumes a `Name` token equal to `keyword`, without advancing if it
    /// doesn't match (keywords like `query`/`type`/`schema` are ordinary
    /// names in GraphQL, not reserved words).
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.is_name(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect_keyword(&mut self, keyword: &'static str) -> Result<Span, GraphQLError> {
        if self.is_name(keyword) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(keyword))
        }
    }

    pub fn expect_int(&mut self) -> Result<(String, Span), GraphQLError> {
        if self.is(TokenKind::Int) {
            let token = self.advance();
            Ok((token.value.clone().unwrap_or_default(), token.span))
        } else {
            Err(self.unexpected("IntValue"))
        }
    }

    pub fn expect_float(&mut self) -> Result<(String, Span), GraphQLError> {
        if self.is(TokenKind::Float) {
            let token = self.advance();
            Ok((token.value.clone().unwrap_or_default(), token.span))
        } else {
            Err(self.unexpected("FloatValue"))
        }
    }

    pub fn expect_string(&mut self) -> Result<(String, bool, Span), GraphQLError> {
        match self.kind() {
            TokenKind::String => {
                let token = self.advance();
                Ok((token.value.clone().unwrap_or_default(), false, token.span))
            }
            TokenKind::BlockString => {
                let token = self.advance();
                Ok((token.value.clone().unwrap_or_default(), true, token.span))
            }
            _ => Err(self.unexpected("StringValue")),
        }
    }

    pub fn unexpected(&self, expected: &str) -> GraphQLError {
        syntax::unexpected(&self.source.body, self.span().start, expected, &self.current().describe())
    }

    pub fn enter_selection_set(&mut self) -> Result<(), GraphQLError> {
        self.depth += 1;
        if self.depth > MAX_SELECTION_DEPTH {
            return Err(syntax::selection_depth_exceeded(
                &self.source.body,
                self.span().start,
                MAX_SELECTION_DEPTH,
            ));
        }
        Ok(())
    }

    pub fn exit_selection_set(&mut self) {
        self.depth -= 1;
    }
}
