//! Call matcher: scans raw model output for `identifier(argument-list)` spans
//!
//! This is a hand-written scanner rather than a regex so that quote and
//! parenthesis nesting stay precise: a quote suspends paren balancing until
//! its matching close quote, and an accepted span is skipped whole so call
//! syntax inside a quoted argument is never matched a second time.

use crate::extract::types::Span;
use tracing::debug;

/// A matched call before its arguments are tokenized
#[derive(Debug, Clone, PartialEq)]
pub struct RawCall {
    /// The identifier before the opening parenthesis
    pub name: String,

    /// The raw argument-list substring between the parentheses
    pub args_src: String,

    /// Byte offsets of the whole call expression in the input
    pub span: Span,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Scan `text` left to right for call-shaped spans.
///
/// `accept` decides whether an identifier names a known tool; rejected
/// candidates are treated as prose and the scan resumes just past their
/// opening parenthesis, so calls nested in rejected text are still found.
/// Unbalanced candidates are handled the same way. Never fails; malformed
/// input simply yields fewer matches.
pub fn scan<F>(text: &str, accept: F) -> Vec<RawCall>
where
    F: Fn(&str) -> bool,
{
    let bytes = text.as_bytes();
    let mut calls = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_ident_start(bytes[i]) || (i > 0 && is_ident_char(bytes[i - 1])) {
            i += 1;
            continue;
        }

        let name_start = i;
        let mut j = i + 1;
        while j < bytes.len() && is_ident_char(bytes[j]) {
            j += 1;
        }

        // The opening paren must immediately follow the identifier
        if j >= bytes.len() || bytes[j] != b'(' {
            i = j;
            continue;
        }

        let name = &text[name_start..j];
        match balanced_end(bytes, j) {
            Some(end) => {
                if accept(name) {
                    calls.push(RawCall {
                        name: name.to_string(),
                        args_src: text[j + 1..end - 1].to_string(),
                        span: Span::new(name_start, end),
                    });
                    i = end;
                } else {
                    debug!(candidate = name, "not a known tool, treating as prose");
                    i = j + 1;
                }
            }
            None => {
                debug!(candidate = name, "unbalanced call candidate, treating as prose");
                i = j + 1;
            }
        }
    }

    calls
}

/// Find the index one past the parenthesis that closes the one at `open`.
///
/// Tracks a quote state: inside single or double quotes, parentheses do not
/// count and a backslash escapes the next character. Returns `None` when the
/// text ends before the call closes (including inside an unterminated quote).
fn balanced_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut i = open + 1;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1; // skip the escaped character
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    None
}
