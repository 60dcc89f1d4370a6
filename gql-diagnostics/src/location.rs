use serde::Serialize;

/// A 1-based line/column position within some `Source`, as used in
/// `GraphQLError::locations` and the wire-format `locations` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> SourceLocation {
        SourceLocation { line, column }
    }
}

/// Computes the 1-based `(line, column)` for a byte offset into `body`.
///
/// Both `offset` and the reported `column` are counted in bytes, matching
/// the byte-offset `Span`s the lexer produces; a leading UTF-8 byte-order
/// mark therefore occupies the bytes it's encoded in like any other source
/// character.
pub fn offset_to_location(body: &str, offset: usize) -> SourceLocation {
    let offset = offset.min(body.len());
    let mut line = 1;
    let mut line_start = 0;
    let bytes = body.as_bytes();
    let mut index = 0;

    while index < offset {
        match bytes[index] {
            b'\n' => {
                line += 1;
                index += 1;
                line_start = index;
            }
            b'\r' => {
                index += 1;
                if bytes.get(index) == Some(&b'\n') {
                    index += 1;
                }
                line += 1;
                line_start = index;
            }
            _ => index += 1,
        }
    }

    SourceLocation {
        line,
        column: offset - line_start + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_counts_as_its_utf8_byte_width() {
        let location = offset_to_location("\u{feff} foo", 4);
        assert_eq!(location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_line_terminators() {
        let location = offset_to_location("a\nb\r\nc", 5);
        assert_eq!(location, SourceLocation::new(3, 1));
    }
}
