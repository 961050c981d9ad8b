//! Value coercer: deterministic typing of raw argument text
//!
//! Precedence for unquoted values: boolean literal, integer, float, string.
//! Quoted values are always strings, even when they look numeric.

use crate::extract::types::ArgValue;

/// Coerce a raw textual value into a typed one.
///
/// Never fails: anything that does not match an earlier rule is a string.
/// Integer overflow beyond `i64` falls back to float; malformed
/// numeric-looking tokens (`1.2.3`) fall back to string.
pub fn coerce(raw_value: &str, was_quoted: bool) -> ArgValue {
    if was_quoted {
        return ArgValue::Str(raw_value.to_string());
    }

    let trimmed = raw_value.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return ArgValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return ArgValue::Bool(false);
    }

    if is_integer_literal(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return ArgValue::Int(i);
        }
        // Too many digits for i64; a digit-only token always parses as f64
        if let Ok(f) = trimmed.parse::<f64>() {
            return ArgValue::Float(f);
        }
    }

    if is_float_literal(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return ArgValue::Float(f);
        }
    }

    ArgValue::Str(trimmed.to_string())
}

/// `-?[0-9]+`
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+` or exponent form `-?[0-9]+(\.[0-9]+)?[eE][+-]?[0-9]+`
fn is_float_literal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let bytes = s.as_bytes();
    let mut i = 0;

    let int_digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_digits == 0 {
        return false;
    }
    i += int_digits;

    let mut has_fraction = false;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if frac_digits == 0 {
            return false;
        }
        i += frac_digits;
        has_fraction = true;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
        return i == bytes.len();
    }

    has_fraction && i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals_case_insensitive() {
        assert_eq!(coerce("true", false), ArgValue::Bool(true));
        assert_eq!(coerce("False", false), ArgValue::Bool(false));
        assert_eq!(coerce("TRUE", false), ArgValue::Bool(true));
    }

    #[test]
    fn test_integers() {
        assert_eq!(coerce("42", false), ArgValue::Int(42));
        assert_eq!(coerce("-7", false), ArgValue::Int(-7));
        assert_eq!(coerce("0", false), ArgValue::Int(0));
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce("1.5", false), ArgValue::Float(1.5));
        assert_eq!(coerce("-0.25", false), ArgValue::Float(-0.25));
        assert_eq!(coerce("3e2", false), ArgValue::Float(300.0));
        assert_eq!(coerce("1.5e-1", false), ArgValue::Float(0.15));
    }

    #[test]
    fn test_quoted_values_stay_strings() {
        assert_eq!(coerce("42", true), ArgValue::Str("42".to_string()));
        assert_eq!(coerce("true", true), ArgValue::Str("true".to_string()));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let huge = "99999999999999999999999999";
        match coerce(huge, false) {
            ArgValue::Float(f) => assert!(f > 9.9e24),
            other => panic!("expected float fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_numeric_falls_back_to_string() {
        assert_eq!(coerce("1.2.3", false), ArgValue::Str("1.2.3".to_string()));
        assert_eq!(coerce("1.", false), ArgValue::Str("1.".to_string()));
        assert_eq!(coerce(".5", false), ArgValue::Str(".5".to_string()));
        assert_eq!(coerce("1e", false), ArgValue::Str("1e".to_string()));
        assert_eq!(coerce("12abc", false), ArgValue::Str("12abc".to_string()));
    }

    #[test]
    fn test_plain_strings_are_trimmed() {
        assert_eq!(coerce("  CDG  ", false), ArgValue::Str("CDG".to_string()));
    }

    #[test]
    fn test_canonical_text_round_trips() {
        for value in [
            ArgValue::Bool(true),
            ArgValue::Bool(false),
            ArgValue::Int(-12),
            ArgValue::Float(2.0),
            ArgValue::Float(-3.75),
        ] {
            let rendered = value.to_string();
            assert_eq!(coerce(&rendered, false), value, "via {:?}", rendered);
        }
    }
}
