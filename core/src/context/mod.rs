//! Conversation context: bounded history and prompt assembly

pub mod history;
pub mod prompt;

pub use history::{
    estimate_tokens, ConversationHistory, ConversationTurn, HistoryBound, TurnRole,
};
pub use prompt::build_prompt;
