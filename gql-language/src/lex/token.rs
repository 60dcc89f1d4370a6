use super::Span;

/// Classification of a lexical token. Comment tokens are produced
/// and linked into the chain but are invisible to the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Sof,
    Eof,
    Bang,
    Dollar,
    Amp,
    LParen,
    RParen,
    Spread,
    Colon,
    Equals,
    At,
    LBracket,
    RBracket,
    LBrace,
    Pipe,
    RBrace,
    Name,
    Int,
    Float,
    String,
    BlockString,
    Comment,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Sof => "<SOF>",
            TokenKind::Eof => "<EOF>",
            TokenKind::Bang => "\"!\"",
            TokenKind::Dollar => "\"$\"",
            TokenKind::Amp => "\"&\"",
            TokenKind::LParen => "\"(\"",
            TokenKind::RParen => "\")\"",
            TokenKind::Spread => "\"...\"",
            TokenKind::Colon => "\":\"",
            TokenKind::Equals => "\"=\"",
            TokenKind::At => "\"@\"",
            TokenKind::LBracket => "\"[\"",
            TokenKind::RBracket => "\"]\"",
            TokenKind::LBrace => "\"{\"",
            TokenKind::Pipe => "\"|\"",
            TokenKind::RBrace => "\"}\"",
            TokenKind::Name => "Name",
            TokenKind::Int => "Int",
            TokenKind::Float => "Float",
            TokenKind::String => "String",
            TokenKind::BlockString => "BlockString",
            TokenKind::Comment => "Comment",
        }
    }
}

/// A single lexed token. `prev`/`next` are indices into the owning
/// `TokenStream`'s arena rather than raw pointers, so that consumers can walk
/// the chain forward and backward.
/// Indices are used instead of pointers because an ownership-strict language
/// can't cheaply express a cyclic doubly linked list otherwise.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    pub column: usize,
    /// The token's decoded string value: the name text for `Name`, the
    /// (unescaped) contents for `String`/`BlockString`, the literal digits
    /// for `Int`/`Float`, the comment body for `Comment`. `None` for
    /// punctuation and `Sof`/`Eof`.
    pub value: Option<String>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl Token {
    pub fn describe(&self) -> String {
        match &self.value {
            Some(value) if self.kind == TokenKind::Name => format!("Name \"{}\"", value),
            _ => self.kind.describe().to_owned(),
        }
    }
}

/// An arena of tokens produced by the lexer for one `Source`, linked via
/// `Token::prev`/`Token::next`. Comment tokens remain in the arena but are
/// skipped by `TokenCursor`.
#[derive(Clone, Debug, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
}

impl TokenStream {
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
