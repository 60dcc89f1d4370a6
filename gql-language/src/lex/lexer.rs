use gql_diagnostics::{offset_to_location, syntax, GraphQLError};

use super::{Span, Token, TokenKind, TokenStream};

const BOM: char = '\u{feff}';

struct Scanner<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.char_indices().collect(),
            cursor: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).map(|&(_, ch)| ch)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).map(|&(_, ch)| ch)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.cursor)
            .map(|&(index, _)| index)
            .unwrap_or(self.source.len())
    }

    /// Line and column (both 1-based) of the current cursor position,
    /// computed directly from the byte offset.
    fn position(&self) -> (usize, usize) {
        let location = offset_to_location(self.source, self.offset());
        (location.line, location.column)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor += 1;

        if ch == '\r' && self.peek() == Some('\n') {
            self.cursor += 1;
        }

        Some(ch)
    }
}

/// Tokenizes `source` into a doubly linked `TokenStream`, starting with a
/// `Sof` token and ending with an `Eof` token. Comment
/// tokens are emitted and linked but carry no semantic meaning to the parser.
pub fn tokenize(source: &str) -> Result<TokenStream, GraphQLError> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();

    tokens.push(Token {
        kind: TokenKind::Sof,
        span: Span::new(0, 0),
        line: 1,
        column: 1,
        value: None,
        prev: None,
        next: None,
    });

    if scanner.peek() == Some(BOM) {
        scanner.advance();
    }

    loop {
        skip_ignored(&mut scanner, &mut tokens)?;

        let start = scanner.offset();
        let (line, column) = scanner.position();

        let token = match scanner.peek() {
            None => Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start),
                line,
                column,
                value: None,
                prev: None,
                next: None,
            },
            Some(ch) => lex_token(&mut scanner, ch, start, line, column)?,
        };

        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);

        if is_eof {
            break;
        }
    }

    link(&mut tokens);

    Ok(TokenStream { tokens })
}

fn link(tokens: &mut [Token]) {
    for index in 0..tokens.len() {
        tokens[index].prev = index.checked_sub(1);
        tokens[index].next = if index + 1 < tokens.len() {
            Some(index + 1)
        } else {
            None
        };
    }
}

fn skip_ignored(scanner: &mut Scanner, tokens: &mut Vec<Token>) -> Result<(), GraphQLError> {
    loop {
        match scanner.peek() {
            Some(' ') | Some('\t') | Some(',') | Some('\n') | Some('\r') => {
                scanner.advance();
            }
            Some(BOM) => {
                scanner.advance();
            }
            Some('#') => {
                let start = scanner.offset();
                let (line, column) = scanner.position();

                while !matches!(scanner.peek(), None | Some('\n') | Some('\r')) {
                    scanner.advance();
                }

                let end = scanner.offset();

                tokens.push(Token {
                    kind: TokenKind::Comment,
                    span: Span::new(start, end),
                    line,
                    column,
                    value: Some(scanner.source[start..end].to_owned()),
                    prev: None,
                    next: None,
                });
            }
            _ => return Ok(()),
        }
    }
}

fn lex_token(
    scanner: &mut Scanner,
    ch: char,
    start: usize,
    line: usize,
    column: usize,
) -> Result<Token, GraphQLError> {
    let punctuator = |kind: TokenKind, scanner: &mut Scanner| -> Token {
        scanner.advance();
        Token {
            kind,
            span: Span::new(start, scanner.offset()),
            line,
            column,
            value: None,
            prev: None,
            next: None,
        }
    };

    match ch {
        '!' => Ok(punctuator(TokenKind::Bang, scanner)),
        '$' => Ok(punctuator(TokenKind::Dollar, scanner)),
        '&' => Ok(punctuator(TokenKind::Amp, scanner)),
        '(' => Ok(punctuator(TokenKind::LParen, scanner)),
        ')' => Ok(punctuator(TokenKind::RParen, scanner)),
        ':' => Ok(punctuator(TokenKind::Colon, scanner)),
        '=' => Ok(punctuator(TokenKind::Equals, scanner)),
        '@' => Ok(punctuator(TokenKind::At, scanner)),
        '[' => Ok(punctuator(TokenKind::LBracket, scanner)),
        ']' => Ok(punctuator(TokenKind::RBracket, scanner)),
        '{' => Ok(punctuator(TokenKind::LBrace, scanner)),
        '|' => Ok(punctuator(TokenKind::Pipe, scanner)),
        '}' => Ok(punctuator(TokenKind::RBrace, scanner)),
        '.' => {
            if scanner.peek_at(1) == Some('.') && scanner.peek_at(2) == Some('.') {
                scanner.advance();
                scanner.advance();
                scanner.advance();
                Ok(Token {
                    kind: TokenKind::Spread,
                    span: Span::new(start, scanner.offset()),
                    line,
                    column,
                    value: None,
                    prev: None,
                    next: None,
                })
            } else {
                Err(syntax::unexpected(scanner.source, start, "Name", "\".\""))
            }
        }
        '_' | 'A'..='Z' | 'a'..='z' => Ok(lex_name(scanner, start, line, column)),
        '-' | '0'..='9' => lex_number(scanner, start, line, column),
        '"' => lex_string(scanner, start, line, column),
        other => Err(syntax::unexpected(
            scanner.source,
            start,
            "a token",
            &format!("\"{}\"", other),
        )),
    }
}

fn lex_name(scanner: &mut Scanner, start: usize, line: usize, column: usize) -> Token {
    while matches!(scanner.peek(), Some('_') | Some('A'..='Z') | Some('a'..='z') | Some('0'..='9'))
    {
        scanner.advance();
    }

    let end = scanner.offset();

    Token {
        kind: TokenKind::Name,
        span: Span::new(start, end),
        line,
        column,
        value: Some(scanner.source[start..end].to_owned()),
        prev: None,
        next: None,
    }
}

fn is_name_start(ch: Option<char>) -> bool {
    matches!(ch, Some('_') | Some('A'..='Z') | Some('a'..='z'))
}

fn is_digit(ch: Option<char>) -> bool {
    matches!(ch, Some('0'..='9'))
}

fn lex_number(
    scanner: &mut Scanner,
    start: usize,
    line: usize,
    column: usize,
) -> Result<Token, GraphQLError> {
    let mut is_float = false;

    if scanner.peek() == Some('-') {
        scanner.advance();
    }

    match scanner.peek() {
        Some('0') => {
            scanner.advance();

            if is_digit(scanner.peek()) {
                return Err(syntax::invalid_number(
                    scanner.source,
                    start,
                    "unexpected digit after 0",
                ));
            }
        }
        Some('1'..='9') => {
            while is_digit(scanner.peek()) {
                scanner.advance();
            }
        }
        _ => {
            return Err(syntax::invalid_number(
                scanner.source,
                scanner.offset(),
                "expected digit",
            ))
        }
    }

    if scanner.peek() == Some('.') {
        is_float = true;
        scanner.advance();

        if !is_digit(scanner.peek()) {
            return Err(syntax::invalid_number(
                scanner.source,
                scanner.offset(),
                "expected digit after \".\"",
            ));
        }

        while is_digit(scanner.peek()) {
            scanner.advance();
        }
    }

    if matches!(scanner.peek(), Some('e') | Some('E')) {
        is_float = true;
        scanner.advance();

        if matches!(scanner.peek(), Some('+') | Some('-')) {
            scanner.advance();
        }

        if !is_digit(scanner.peek()) {
            return Err(syntax::invalid_number(
                scanner.source,
                scanner.offset(),
                "expected digit after exponent indicator",
            ));
        }

        while is_digit(scanner.peek()) {
            scanner.advance();
        }
    }

    if is_name_start(scanner.peek()) || scanner.peek() == Some('.') {
        return Err(syntax::invalid_number(
            scanner.source,
            scanner.offset(),
            "unexpected character following number",
        ));
    }

    let end = scanner.offset();

    Ok(Token {
        kind: if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        },
        span: Span::new(start, end),
        line,
        column,
        value: Some(scanner.source[start..end].to_owned()),
        prev: None,
        next: None,
    })
}

fn lex_string(
    scanner: &mut Scanner,
    start: usize,
    line: usize,
    column: usize,
) -> Result<Token, GraphQLError> {
    if scanner.peek_at(1) == Some('"') && scanner.peek_at(2) == Some('"') {
        return lex_block_string(scanner, start, line, column);
    }

    scanner.advance();
    let mut value = String::new();

    loop {
        match scanner.peek() {
            None | Some('\n') | Some('\r') => {
                return Err(syntax::unterminated_string(scanner.source, start))
            }
            Some('"') => {
                scanner.advance();
                break;
            }
            Some('\\') => {
                scanner.advance();
                value.push(lex_escape(scanner)?);
            }
            Some(ch) if (ch as u32) < 0x20 && ch != '\t' => {
                return Err(syntax::unexpected(
                    scanner.source,
                    scanner.offset(),
                    "an escaped character",
                    &format!("control character U+{:04X}", ch as u32),
                ));
            }
            Some(ch) => {
                value.push(ch);
                scanner.advance();
            }
        }
    }

    Ok(Token {
        kind: TokenKind::String,
        span: Span::new(start, scanner.offset()),
        line,
        column,
        value: Some(value),
        prev: None,
        next: None,
    })
}

fn lex_escape(scanner: &mut Scanner) -> Result<char, GraphQLError> {
    let escape_offset = scanner.offset();

    match scanner.peek() {
        Some('"') => {
            scanner.advance();
            Ok('"')
        }
        Some('\\') => {
            scanner.advance();
            Ok('\\')
        }
        Some('/') => {
            scanner.advance();
            Ok('/')
        }
        Some('b') => {
            scanner.advance();
            Ok('\u{8}')
        }
        Some('f') => {
            scanner.advance();
            Ok('\u{c}')
        }
        Some('n') => {
            scanner.advance();
            Ok('\n')
        }
        Some('r') => {
            scanner.advance();
            Ok('\r')
        }
        Some('t') => {
            scanner.advance();
            Ok('\t')
        }
        Some('u') => {
            scanner.advance();
            let mut code = 0u32;

            for _ in 0..4 {
                let digit = scanner
                    .peek()
                    .and_then(|ch| ch.to_digit(16))
                    .ok_or_else(|| {
                        syntax::invalid_escape(scanner.source, escape_offset, "\\u")
                    })?;
                code = code * 16 + digit;
                scanner.advance();
            }

            char::from_u32(code)
                .ok_or_else(|| syntax::invalid_escape(scanner.source, escape_offset, "\\u"))
        }
        _ => Err(syntax::invalid_escape(scanner.source, escape_offset, "\\")),
    }
}

fn lex_block_string(
    scanner: &mut Scanner,
    start: usize,
    line: usize,
    column: usize,
) -> Result<Token, GraphQLError> {
    scanner.advance();
    scanner.advance();
    scanner.advance();

    let mut raw = String::new();

    loop {
        match (scanner.peek(), scanner.peek_at(1), scanner.peek_at(2)) {
            (None, _, _) => return Err(syntax::unterminated_string(scanner.source, start)),
            (Some('"'), Some('"'), Some('"')) => {
                scanner.advance();
                scanner.advance();
                scanner.advance();
                break;
            }
            (Some('\\'), Some('"'), Some('"')) if scanner.peek_at(3) == Some('"') => {
                scanner.advance();
                scanner.advance();
                scanner.advance();
                scanner.advance();
                raw.push_str("\"\"\"");
            }
            (Some(ch), _, _) => {
                raw.push(ch);
                scanner.advance();
            }
        }
    }

    Ok(Token {
        kind: TokenKind::BlockString,
        span: Span::new(start, scanner.offset()),
        line,
        column,
        value: Some(strip_block_string_indentation(&raw)),
        prev: None,
        next: None,
    })
}

/// Strips common leading indentation and leading/trailing blank lines from a
/// block string's raw contents.
pub fn strip_block_string_indentation(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.split('\n').collect();

    let common_indent = lines
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(_, line)| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min();

    if let Some(indent) = common_indent {
        for line in lines.iter_mut().skip(1) {
            if line.len() >= indent {
                *line = &line[indent..];
            } else {
                *line = "";
            }
        }
    }

    while lines.first().map(|line| line.trim().is_empty()).unwrap_or(false) {
        lines.remove(0);
    }

    while lines.last().map(|line| line.trim().is_empty()).unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .tokens
            .into_iter()
            .map(|token| token.kind)
            .filter(|kind| !matches!(kind, TokenKind::Sof | TokenKind::Eof))
            .collect()
    }

    #[test]
    fn test_bom_then_name() {
        let stream = tokenize("\u{feff} foo").unwrap();
        let name = stream
            .tokens
            .iter()
            .find(|token| token.kind == TokenKind::Name)
            .unwrap();

        assert_eq!(name.value.as_deref(), Some("foo"));
        assert_eq!(name.line, 1);
        assert_eq!(name.column, 5);
        assert_eq!(name.span, Span::new(4, 7));
    }

    #[test]
    fn test_punctuators() {
        assert_eq!(
            kinds("! $ & ( ) ... : = @ [ ] { | }"),
            vec![
                TokenKind::Bang,
                TokenKind::Dollar,
                TokenKind::Amp,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Spread,
                TokenKind::Colon,
                TokenKind::Equals,
                TokenKind::At,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::Pipe,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_leading_zero_rejected() {
        assert!(tokenize("00").is_err());
    }

    #[test]
    fn test_float_requires_digit_after_dot() {
        assert!(tokenize("1.").is_err());
    }

    #[test]
    fn test_name_then_number_error() {
        // `a-b` lexes as Name `a` followed by a number-lexing error, since
        // `-b` is not a valid number.
        assert!(tokenize("a-b").is_err());
    }

    #[test]
    fn test_block_string_strips_indentation() {
        let stream = tokenize("\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n    \"\"\"").unwrap();
        let value = stream
            .tokens
            .iter()
            .find(|token| token.kind == TokenKind::BlockString)
            .unwrap()
            .value
            .clone()
            .unwrap();

        assert_eq!(value, "Hello,\n  World!\n\nYours,\n  GraphQL.");
    }
}
