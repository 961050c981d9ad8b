//! System prompt construction

use crate::catalog::ToolCatalog;

/// Default instructions when the caller supplies no system prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and friendly AI customer support \
assistant. Always respond with natural, conversational language. Explain what you're doing in a \
helpful way.";

/// Build the full system prompt: base instructions plus, when tools are
/// available, the tool list and call-format guidance the model must follow.
pub fn build_system_prompt(base: Option<&str>, catalog: &ToolCatalog) -> String {
    let mut prompt = base.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string();

    if catalog.is_empty() {
        return prompt;
    }

    prompt.push_str("\n\nYou have access to these tools:\n");
    for entry in catalog.entries() {
        prompt.push_str("- ");
        prompt.push_str(&entry.name);
        prompt.push_str(": ");
        prompt.push_str(entry.description.as_deref().unwrap_or("No description"));
        prompt.push('\n');
    }

    prompt.push_str(
        "\nIMPORTANT: When you need to use a tool, ALWAYS:\n\
         1. First provide a helpful natural language response explaining what you're doing\n\
         2. Then call the tool using this format: TOOL_CALL: tool_name(arg1='value1', arg2='value2')\n\
         \nExamples:\n\
         User: 'Search for flights from Paris to London'\n\
         Assistant: I'll search for flights from Paris to London for you.\n\
         TOOL_CALL: search_flights(departure_airport='CDG', arrival_airport='LHR')\n\
         \nUser: 'Book hotel 123'\n\
         Assistant: I'll book hotel ID 123 for you right away.\n\
         TOOL_CALL: book_hotel(hotel_id=123)\n\
         \nNEVER respond with just a bare function call. Always include helpful natural language.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ToolCatalog, ToolCatalogEntry};

    #[test]
    fn test_empty_catalog_keeps_base_prompt_unchanged() {
        let prompt = build_system_prompt(Some("Be terse."), &ToolCatalog::new());
        assert_eq!(prompt, "Be terse.");
    }

    #[test]
    fn test_default_base_when_none_supplied() {
        let prompt = build_system_prompt(None, &ToolCatalog::new());
        assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_tool_list_and_guidance_rendered() {
        let catalog = ToolCatalog::new().with_tool(
            ToolCatalogEntry::new("book_hotel").with_description("Book a hotel by its ID"),
        );
        let prompt = build_system_prompt(None, &catalog);

        assert!(prompt.contains("- book_hotel: Book a hotel by its ID"));
        assert!(prompt.contains("TOOL_CALL:"));
    }

    #[test]
    fn test_missing_description_placeholder() {
        let catalog = ToolCatalog::new().with_tool(ToolCatalogEntry::new("mystery"));
        let prompt = build_system_prompt(None, &catalog);
        assert!(prompt.contains("- mystery: No description"));
    }
}
