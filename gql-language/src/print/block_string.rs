fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Prints a block-string literal, choosing single-line vs. multi-line shape
/// to best preserve how `value` reads. Escapes only `"""` (to `\"""`);
/// never escapes anything else, so control characters and other quotes
/// appear in the output exactly as given. `indentation` is unused by the
/// shape decision itself (the surrounding printer supplies indentation via
/// the block layout it's nested in); it's accepted to match the routine
/// described for descriptions and field/argument default values alike.
pub fn print_block_string(value: &str, _indentation: &str, minimize: bool) -> String {
    let escaped = value.replace("\"\"\"", "\\\"\"\"");
    let lines: Vec<&str> = escaped.split(['\n', '\r']).collect();
    let is_single_line = lines.len() == 1;

    let force_leading_newline = lines.len() > 1
        && lines[1..].iter().all(|line| line.is_empty() || is_whitespace(line.chars().next().unwrap()));

    let has_trailing_quote = value.ends_with('"') && !escaped.ends_with("\\\"\"\"");
    let has_trailing_slash = value.ends_with('\\');
    let force_trailing_newline = has_trailing_quote || has_trailing_slash;

    let print_as_multiple_lines =
        !minimize && (!is_single_line || value.len() > 70 || force_trailing_newline || force_leading_newline);

    let skip_leading_newline = is_single_line && value.chars().next().map(is_whitespace).unwrap_or(false);

    let mut result = String::new();
    if (print_as_multiple_lines && !skip_leading_newline) || force_leading_newline {
        result.push('\n');
    }
    result.push_str(&escaped);
    if print_as_multiple_lines || force_trailing_newline {
        result.push('\n');
    }

    format!("\"\"\"{}\"\"\"", result)
}

#[cfg(test)]
mod tests {
    use super::print_block_string;

    #[test]
    fn short_single_line_value_stays_inline() {
        assert_eq!(print_block_string("hello", "", false), "\"\"\"hello\"\"\"");
    }

    #[test]
    fn multi_line_value_keeps_its_own_line_breaks() {
        let printed = print_block_string("one\ntwo", "", false);
        assert_eq!(printed, "\"\"\"\none\ntwo\n\"\"\"");
    }

    #[test]
    fn escapes_embedded_triple_quotes() {
        assert_eq!(print_block_string("a\"\"\"b", "", false), "\"\"\"a\\\"\"\"b\"\"\"");
    }

    #[test]
    fn long_single_line_value_is_forced_multi_line() {
        let value = "a".repeat(80);
        let printed = print_block_string(&value, "", false);
        assert!(printed.starts_with("\"\"\"\n"));
    }
}
