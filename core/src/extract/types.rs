//! Result structures produced by the extraction engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A typed argument value
///
/// The four representations the coercer can produce. Quoted input is always
/// `Str`; unquoted input is classified by the precedence rules in
/// [`coerce`](crate::extract::coerce::coerce).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean literal (`true`/`false`)
    Bool(bool),

    /// Integer value
    Int(i64),

    /// Floating point value
    Float(f64),

    /// String value
    Str(String),
}

impl ArgValue {
    /// Convert into a JSON value for the execution layer
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArgValue::Bool(b) => serde_json::Value::Bool(*b),
            ArgValue::Int(i) => serde_json::Value::from(*i),
            ArgValue::Float(f) => serde_json::Value::from(*f),
            ArgValue::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(v) => {
                // Keep a trailing ".0" so the canonical text round-trips as a float
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            ArgValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A single named argument of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedArgument {
    /// Argument key; positional arguments get synthetic keys `arg0`, `arg1`, ...
    pub key: String,

    /// The coerced value
    pub value: ArgValue,
}

impl TypedArgument {
    /// Create a new typed argument
    pub fn new<S: Into<String>>(key: S, value: ArgValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Byte-offset range of a matched call inside the raw model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Offset of the first byte of the call expression
    pub start: usize,

    /// Offset one past the closing parenthesis
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A structured tool invocation extracted from model output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Unique identifier for this invocation
    pub id: String,

    /// Name of the tool to call
    pub name: String,

    /// Arguments in source order; duplicate keys are preserved and the
    /// last occurrence wins at execution time
    pub arguments: Vec<TypedArgument>,

    /// Natural-language description of what the call will do
    pub description: String,

    /// Location of the call expression in the raw model output
    pub span: Span,
}

impl ToolInvocation {
    /// Create a new invocation with a fresh id
    pub fn new<S: Into<String>>(
        name: S,
        arguments: Vec<TypedArgument>,
        description: String,
        span: Span,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            arguments,
            description,
            span,
        }
    }

    /// Last-wins view of an argument by key
    pub fn argument(&self, key: &str) -> Option<&ArgValue> {
        self.arguments
            .iter()
            .rev()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    /// Arguments folded into a JSON object, last occurrence winning
    pub fn arguments_as_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for arg in &self.arguments {
            map.insert(arg.key.clone(), arg.value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

/// The outcome of extracting one model response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    /// The raw output with all matched call spans removed
    pub prose: String,

    /// Extracted invocations, ordered by span start and non-overlapping
    pub invocations: Vec<ToolInvocation>,
}

impl TurnResult {
    /// A result with no invocations, passing the input through as prose
    pub fn prose_only<S: Into<String>>(text: S) -> Self {
        Self {
            prose: text.into(),
            invocations: Vec::new(),
        }
    }

    /// Whether any calls were extracted
    pub fn has_invocations(&self) -> bool {
        !self.invocations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_display_round_trips() {
        assert_eq!(ArgValue::Int(42).to_string(), "42");
        assert_eq!(ArgValue::Bool(true).to_string(), "true");
        assert_eq!(ArgValue::Float(1.5).to_string(), "1.5");
        assert_eq!(ArgValue::Float(2.0).to_string(), "2.0");
        assert_eq!(ArgValue::Str("CDG".to_string()).to_string(), "CDG");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let invocation = ToolInvocation::new(
            "book_hotel",
            vec![
                TypedArgument::new("hotel_id", ArgValue::Int(1)),
                TypedArgument::new("hotel_id", ArgValue::Int(2)),
            ],
            String::new(),
            Span::new(0, 0),
        );

        assert_eq!(invocation.argument("hotel_id"), Some(&ArgValue::Int(2)));
        assert_eq!(
            invocation.arguments_as_json()["hotel_id"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn test_invocation_ids_are_distinct() {
        let a = ToolInvocation::new("a", Vec::new(), String::new(), Span::new(0, 1));
        let b = ToolInvocation::new("a", Vec::new(), String::new(), Span::new(0, 1));
        assert_ne!(a.id, b.id);
    }
}
