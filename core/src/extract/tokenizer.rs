//! Argument tokenizer: splits a raw argument-list substring into fragments

/// One argument fragment as it appeared in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentFragment {
    /// Argument key; `None` means the fragment was positional
    pub key: Option<String>,

    /// The raw value text, with quotes stripped if it was quoted
    pub value: String,

    /// Whether the value was wrapped in matching quotes
    pub was_quoted: bool,
}

/// Split a raw argument list into fragments.
///
/// Commas only split at the top level: commas inside quotes or nested
/// parens/brackets/braces belong to the fragment. An unquoted top-level `=`
/// separates key from value; otherwise the whole fragment is a positional
/// value. Empty fragments (consecutive commas, empty list) yield nothing.
pub fn tokenize(raw_args: &str) -> Vec<ArgumentFragment> {
    split_top_level(raw_args)
        .into_iter()
        .filter_map(parse_fragment)
        .collect()
}

/// Split on commas that are outside quotes and outside nested brackets
fn split_top_level(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    pieces.push(&raw[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
        i += 1;
    }

    pieces.push(&raw[start..]);
    pieces
}

fn parse_fragment(piece: &str) -> Option<ArgumentFragment> {
    let piece = piece.trim();
    if piece.is_empty() {
        return None;
    }

    let (key, raw_value) = match find_top_level_eq(piece) {
        Some(eq) => (Some(piece[..eq].trim().to_string()), piece[eq + 1..].trim()),
        None => (None, piece),
    };

    let (value, was_quoted) = strip_quotes(raw_value);
    Some(ArgumentFragment {
        key,
        value,
        was_quoted,
    })
}

/// Position of the first `=` that is outside quotes and nested brackets
fn find_top_level_eq(piece: &str) -> Option<usize> {
    let bytes = piece.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b'=' if depth == 0 => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }

    None
}

/// Strip matching single or double quotes and unescape quote characters.
///
/// The value only counts as quoted when the quote opened at the first byte
/// closes at the last byte; `"a" or "b"` is one unquoted value, not a
/// quoted `a" or "b`.
fn strip_quotes(raw: &str) -> (String, bool) {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && closing_quote(bytes, first) == Some(bytes.len() - 1)
        {
            return (unescape(&raw[1..raw.len() - 1]), true);
        }
    }
    (raw.to_string(), false)
}

/// Index of the unescaped quote that closes the one at byte 0
fn closing_quote(bytes: &[u8], quote: u8) -> Option<usize> {
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i] == quote {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

/// Turn backslash-escaped quotes (and backslashes) back into literals
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\'' | '\\')) => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(key: Option<&str>, value: &str, was_quoted: bool) -> ArgumentFragment {
        ArgumentFragment {
            key: key.map(str::to_string),
            value: value.to_string(),
            was_quoted,
        }
    }

    #[test]
    fn test_empty_list_yields_no_fragments() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_consecutive_commas_yield_no_fragments() {
        assert!(tokenize(",,").is_empty());
        assert_eq!(tokenize("a=1,,b=2").len(), 2);
    }

    #[test]
    fn test_key_value_split() {
        assert_eq!(
            tokenize("departure_airport='CDG', arrival_airport='LHR'"),
            vec![
                frag(Some("departure_airport"), "CDG", true),
                frag(Some("arrival_airport"), "LHR", true),
            ]
        );
    }

    #[test]
    fn test_positional_fragment_has_no_key() {
        assert_eq!(tokenize("42"), vec![frag(None, "42", false)]);
    }

    #[test]
    fn test_comma_inside_quotes_does_not_split() {
        assert_eq!(
            tokenize("note=\"one, two\", id=3"),
            vec![frag(Some("note"), "one, two", true), frag(Some("id"), "3", false)]
        );
    }

    #[test]
    fn test_comma_inside_nested_brackets_does_not_split() {
        assert_eq!(
            tokenize("ids=[1, 2, 3], limit=5"),
            vec![
                frag(Some("ids"), "[1, 2, 3]", false),
                frag(Some("limit"), "5", false),
            ]
        );
    }

    #[test]
    fn test_equals_inside_quotes_is_part_of_value() {
        assert_eq!(tokenize("\"a=b\""), vec![frag(None, "a=b", true)]);
    }

    #[test]
    fn test_equals_in_value_stays_in_value() {
        // Only the first top-level `=` splits
        assert_eq!(tokenize("q=a=b"), vec![frag(Some("q"), "a=b", false)]);
    }

    #[test]
    fn test_escaped_quotes_are_unescaped() {
        assert_eq!(
            tokenize("msg=\"say \\\"hi\\\"\""),
            vec![frag(Some("msg"), "say \"hi\"", true)]
        );
    }

    #[test]
    fn test_quote_bounded_but_not_wrapped_value_keeps_quotes() {
        // Starts and ends with `"` yet is not one quoted string
        assert_eq!(
            tokenize("x=\"a\" or \"b\""),
            vec![frag(Some("x"), "\"a\" or \"b\"", false)]
        );
    }

    #[test]
    fn test_escaped_closing_quote_still_counts_as_wrapped() {
        assert_eq!(
            tokenize("x=\"a \\\"b\\\"\""),
            vec![frag(Some("x"), "a \"b\"", true)]
        );
    }

    #[test]
    fn test_mismatched_quotes_are_not_stripped() {
        assert_eq!(tokenize("x=\"abc'"), vec![frag(Some("x"), "\"abc'", false)]);
    }

    #[test]
    fn test_whitespace_trimmed_around_key_and_value() {
        assert_eq!(
            tokenize("  hotel_id = 5 "),
            vec![frag(Some("hotel_id"), "5", false)]
        );
    }

    #[test]
    fn test_empty_value_after_equals() {
        assert_eq!(tokenize("x="), vec![frag(Some("x"), "", false)]);
    }
}
