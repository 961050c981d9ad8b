//! Example demonstrating the extraction engine without a model round trip
//!
//! Feeds a few canned "model responses" through the extractor and prints
//! the prose remainder, the typed invocations, and the prompt that would go
//! out on the next turn.

use caravel_core::{
    build_prompt, ConversationHistory, ConversationTurn, DescriptionTemplates, Extractor,
    HistoryBound, ToolCatalog,
};

fn main() -> anyhow::Result<()> {
    let extractor = Extractor::new(
        ToolCatalog::travel_support(),
        DescriptionTemplates::default(),
    );

    let responses = [
        "Hello! How can I help with your trip today?",
        "I'll search for flights from Paris to London for you.\n\
         TOOL_CALL: search_flights(departure_airport='CDG', arrival_airport='LHR')",
        "Sure. search_flights(origin=\"CDG\") and then book_hotel(hotel_id=5)",
        "Let's call book(id=1", // malformed: stays prose
    ];

    for response in responses {
        let result = extractor.extract(response);
        println!("model output: {:?}", response);
        println!("  prose: {:?}", result.prose);
        for invocation in &result.invocations {
            println!(
                "  call {} -> {} {:?}",
                invocation.name,
                invocation.description,
                invocation.arguments_as_json()
            );
        }
        println!();
    }

    // Prompt assembly for a follow-up turn
    let mut history = ConversationHistory::with_system_prompt(
        HistoryBound::Turns(20),
        "You are a helpful travel support assistant.",
    )?;
    history.append(ConversationTurn::user("Any flights to London tomorrow?"));
    history.append(ConversationTurn::assistant(
        "I'll search for flights from Paris to London for you.",
    ));
    history.append(ConversationTurn::tool("Found flights: F1 (09:10), F2 (14:35)"));

    let prompt = build_prompt(None, &history, &[], "Book the morning one");
    println!("next prompt:\n{}", prompt);

    Ok(())
}
