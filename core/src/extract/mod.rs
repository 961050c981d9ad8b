//! Tool-call extraction engine
//!
//! Turns raw model output into a [`TurnResult`]: the prose remainder plus an
//! ordered list of [`ToolInvocation`]s with typed arguments and
//! natural-language descriptions. Extraction is pure and never fails;
//! malformed input degrades to "no call extracted".

pub mod coerce;
pub mod describe;
pub mod matcher;
pub mod tokenizer;
pub mod types;

pub use describe::DescriptionTemplates;
pub use types::{ArgValue, Span, ToolInvocation, TurnResult, TypedArgument};

use crate::catalog::ToolCatalog;
use tracing::debug;

/// The extraction pipeline: matcher, tokenizer, coercer, synthesizer
///
/// Stateless across calls; one instance can serve any number of responses.
pub struct Extractor {
    catalog: ToolCatalog,
    templates: DescriptionTemplates,
    filter_unknown: bool,
}

impl Extractor {
    /// Create an extractor over a tool catalog
    pub fn new(catalog: ToolCatalog, templates: DescriptionTemplates) -> Self {
        Self {
            catalog,
            templates,
            filter_unknown: true,
        }
    }

    /// Whether unknown tool names are filtered to prose (default) or
    /// accepted as invocations
    pub fn with_filter_unknown(mut self, filter_unknown: bool) -> Self {
        self.filter_unknown = filter_unknown;
        self
    }

    /// The catalog this extractor matches against
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Extract all tool calls from one model response.
    ///
    /// The returned invocations are ordered by span start and
    /// non-overlapping; concatenating the prose between and around the spans
    /// reconstructs `prose`.
    pub fn extract(&self, raw_text: &str) -> TurnResult {
        let calls = matcher::scan(raw_text, |name| {
            !self.filter_unknown || self.catalog.is_empty() || self.catalog.contains(name)
        });

        if calls.is_empty() {
            return TurnResult::prose_only(raw_text);
        }

        let mut prose = String::with_capacity(raw_text.len());
        let mut invocations = Vec::with_capacity(calls.len());
        let mut cursor = 0;

        for call in calls {
            prose.push_str(&raw_text[cursor..call.span.start]);
            cursor = call.span.end;

            let arguments = self.typed_arguments(&call.name, &call.args_src);
            let description = self.templates.describe(&call.name, &arguments);
            invocations.push(ToolInvocation::new(
                call.name,
                arguments,
                description,
                call.span,
            ));
        }
        prose.push_str(&raw_text[cursor..]);

        debug!(count = invocations.len(), "extracted tool invocations");
        TurnResult {
            prose,
            invocations,
        }
    }

    fn typed_arguments(&self, tool_name: &str, args_src: &str) -> Vec<TypedArgument> {
        let entry = self.catalog.get(tool_name);
        tokenizer::tokenize(args_src)
            .into_iter()
            .enumerate()
            .map(|(position, fragment)| {
                let key = fragment
                    .key
                    .unwrap_or_else(|| format!("arg{}", position));
                if let Some(entry) = entry {
                    if !entry.accepts(&key) {
                        debug!(tool = tool_name, key = %key, "argument not in the tool's accepted set");
                    }
                }
                TypedArgument::new(key, coerce::coerce(&fragment.value, fragment.was_quoted))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolCatalog;

    fn travel_extractor() -> Extractor {
        Extractor::new(ToolCatalog::travel_support(), DescriptionTemplates::default())
    }

    fn open_extractor() -> Extractor {
        Extractor::new(ToolCatalog::new(), DescriptionTemplates::default())
    }

    #[test]
    fn test_plain_prose_passes_through() {
        let result = travel_extractor().extract("Hello! How can I help with your trip?");
        assert!(result.invocations.is_empty());
        assert_eq!(result.prose, "Hello! How can I help with your trip?");
    }

    #[test]
    fn test_empty_input() {
        let result = travel_extractor().extract("");
        assert!(result.invocations.is_empty());
        assert_eq!(result.prose, "");
    }

    #[test]
    fn test_single_call_with_typed_arguments() {
        let result = open_extractor().extract("f(a=1, b=\"x\", c=true)");
        assert_eq!(result.invocations.len(), 1);

        let invocation = &result.invocations[0];
        assert_eq!(invocation.name, "f");
        assert_eq!(invocation.arguments.len(), 3);
        assert_eq!(invocation.arguments[0], TypedArgument::new("a", ArgValue::Int(1)));
        assert_eq!(
            invocation.arguments[1],
            TypedArgument::new("b", ArgValue::Str("x".to_string()))
        );
        assert_eq!(invocation.arguments[2], TypedArgument::new("c", ArgValue::Bool(true)));
        assert_eq!(result.prose, "");
    }

    #[test]
    fn test_quoted_numeric_stays_string() {
        let result = open_extractor().extract("f(x=\"42\")");
        assert_eq!(
            result.invocations[0].arguments[0],
            TypedArgument::new("x", ArgValue::Str("42".to_string()))
        );
    }

    #[test]
    fn test_two_calls_with_prose_remainder() {
        let text = "Sure. search_flights(origin=\"CDG\") and then book_hotel(id=5)";
        let result = travel_extractor().extract(text);

        assert_eq!(result.invocations.len(), 2);
        assert_eq!(result.invocations[0].name, "search_flights");
        assert_eq!(result.invocations[1].name, "book_hotel");
        assert_eq!(result.prose, "Sure.  and then ");
    }

    #[test]
    fn test_prose_reconstruction_invariant() {
        let text = "A book_hotel(hotel_id=1) B lookup_policy() C";
        let result = travel_extractor().extract(text);

        // Rebuild the prose from the fragments around each span
        let mut rebuilt = String::new();
        let mut cursor = 0;
        for invocation in &result.invocations {
            rebuilt.push_str(&text[cursor..invocation.span.start]);
            cursor = invocation.span.end;
        }
        rebuilt.push_str(&text[cursor..]);
        assert_eq!(rebuilt, result.prose);
        assert_eq!(result.prose, "A  B  C");
    }

    #[test]
    fn test_spans_are_ordered_and_non_overlapping() {
        let text = "book_hotel(hotel_id=1) lookup_policy() web_search_tool(query=x)";
        let result = travel_extractor().extract(text);
        assert_eq!(result.invocations.len(), 3);

        for pair in result.invocations.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn test_unknown_tool_filtered_to_prose() {
        let text = "I'd use teleport(dest=Mars) if I could.";
        let result = travel_extractor().extract(text);
        assert!(result.invocations.is_empty());
        assert_eq!(result.prose, text);
    }

    #[test]
    fn test_unknown_tool_accepted_when_filtering_disabled() {
        let extractor = Extractor::new(
            ToolCatalog::travel_support(),
            DescriptionTemplates::default(),
        )
        .with_filter_unknown(false);

        let result = extractor.extract("teleport(dest=Mars)");
        assert_eq!(result.invocations.len(), 1);
        assert_eq!(result.invocations[0].name, "teleport");
    }

    #[test]
    fn test_empty_catalog_matches_any_identifier() {
        let result = open_extractor().extract("anything_goes(x=1)");
        assert_eq!(result.invocations.len(), 1);
    }

    #[test]
    fn test_malformed_trailing_call_is_all_prose() {
        let text = "Let's call book(id=1";
        let result = open_extractor().extract(text);
        assert!(result.invocations.is_empty());
        assert_eq!(result.prose, text);
    }

    #[test]
    fn test_nested_quoted_parens_kept_in_argument() {
        let result = open_extractor().extract("f(note=\"a(b)c\")");
        assert_eq!(result.invocations.len(), 1);
        assert_eq!(
            result.invocations[0].arguments[0],
            TypedArgument::new("note", ArgValue::Str("a(b)c".to_string()))
        );
    }

    #[test]
    fn test_positional_arguments_get_synthetic_keys() {
        let result = open_extractor().extract("g(7, \"x\", flag=true)");
        let args = &result.invocations[0].arguments;
        assert_eq!(args[0], TypedArgument::new("arg0", ArgValue::Int(7)));
        assert_eq!(args[1], TypedArgument::new("arg1", ArgValue::Str("x".to_string())));
        assert_eq!(args[2], TypedArgument::new("flag", ArgValue::Bool(true)));
    }

    #[test]
    fn test_empty_argument_list_yields_invocation_without_arguments() {
        let result = travel_extractor().extract("lookup_policy()");
        assert_eq!(result.invocations.len(), 1);
        assert!(result.invocations[0].arguments.is_empty());
        assert_eq!(
            result.invocations[0].description,
            "Let me look up our company policies for you."
        );
    }

    #[test]
    fn test_descriptions_attached_to_invocations() {
        let result = travel_extractor().extract("book_hotel(hotel_id=123)");
        assert_eq!(
            result.invocations[0].description,
            "I'll book hotel ID 123 for you."
        );
    }

    #[test]
    fn test_tool_call_prefix_format_still_extracts() {
        // The original prompt format asks for "TOOL_CALL: name(args)"; the
        // label stays in prose, the call itself is extracted.
        let text = "I'll book that now.\nTOOL_CALL: book_hotel(hotel_id=123)";
        let result = travel_extractor().extract(text);
        assert_eq!(result.invocations.len(), 1);
        assert_eq!(result.prose, "I'll book that now.\nTOOL_CALL: ");
    }
}
