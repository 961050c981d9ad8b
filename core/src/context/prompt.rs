//! Prompt assembly
//!
//! The outbound prompt is plain role-tagged text in a fixed order: system
//! prompt, trimmed history, current-turn tool results, then the new user
//! message with a trailing `Assistant: ` cue. Downstream callers depend on
//! this ordering staying stable across turns.

use crate::context::history::{ConversationHistory, TurnRole};

/// Assemble the full prompt for one model request.
///
/// `system_prompt` overrides the history's own system turn when both are
/// present; otherwise the history's system turn is used. `tool_results` are
/// results produced in the current turn that are not yet part of the
/// history.
pub fn build_prompt(
    system_prompt: Option<&str>,
    history: &ConversationHistory,
    tool_results: &[String],
    new_user_message: &str,
) -> String {
    let mut prompt = String::new();

    if let Some(system) = system_prompt.or_else(|| history.system_prompt()) {
        prompt.push_str("System: ");
        prompt.push_str(system);
        prompt.push_str("\n\n");
    }

    for turn in history.turns() {
        if turn.role == TurnRole::System {
            continue;
        }
        prompt.push_str(turn.role.label());
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }

    for result in tool_results {
        prompt.push_str("Tool: ");
        prompt.push_str(result);
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(new_user_message);
    prompt.push_str("\nAssistant: ");

    prompt
}
