//! Bounded, append-only conversation history

use crate::error::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// System instructions, at most one turn at position 0
    System,

    /// Human input
    User,

    /// Model response
    Assistant,

    /// Tool execution result fed back into the conversation
    Tool,
}

impl TurnRole {
    /// The role label used in the assembled prompt
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::System => "System",
            TurnRole::User => "User",
            TurnRole::Assistant => "Assistant",
            TurnRole::Tool => "Tool",
        }
    }
}

/// One message in a conversation; never mutated after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Role of the sender
    pub role: TurnRole,

    /// Message content
    pub content: String,

    /// Wall-clock creation time
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn with the current timestamp
    pub fn new<S: Into<String>>(role: TurnRole, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system turn
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// Create a user turn
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Create an assistant turn
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Create a tool-result turn
    pub fn tool<S: Into<String>>(content: S) -> Self {
        Self::new(TurnRole::Tool, content)
    }
}

/// Bound on the history size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryBound {
    /// Maximum number of turns, counting the system turn
    Turns(usize),

    /// Maximum estimated token count across all turns
    Tokens {
        /// Token budget
        max: usize,
        /// Estimator divisor: tokens ~= ceil(chars / chars_per_token)
        chars_per_token: usize,
    },
}

impl HistoryBound {
    /// A token bound with the default 4-characters-per-token estimate
    pub fn tokens(max: usize) -> Self {
        Self::Tokens {
            max,
            chars_per_token: 4,
        }
    }
}

impl Default for HistoryBound {
    fn default() -> Self {
        Self::Turns(40)
    }
}

/// Rough token estimate by character count. Exactness is not required, only
/// monotonic bound enforcement.
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> usize {
    text.chars().count().div_ceil(chars_per_token.max(1))
}

/// An ordered, bounded sequence of conversation turns
///
/// `append` is the only mutator besides `reset`; prior turns are never
/// rewritten. Trimming evicts the oldest non-system turns first; a system
/// turn at position 0 is never evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
    bound: HistoryBound,
}

impl ConversationHistory {
    /// Create an empty history with the given bound
    pub fn new(bound: HistoryBound) -> Self {
        Self {
            turns: Vec::new(),
            bound,
        }
    }

    /// Create a history seeded with a system prompt.
    ///
    /// Fails at setup when the system prompt alone can never satisfy the
    /// bound; that is a configuration error, not a per-turn condition.
    pub fn with_system_prompt(bound: HistoryBound, system_prompt: &str) -> Result<Self> {
        match bound {
            HistoryBound::Turns(0) => {
                return Err(ConfigError::InvalidValue {
                    field: "history_bound".to_string(),
                    value: "0 turns".to_string(),
                }
                .into());
            }
            HistoryBound::Tokens {
                max,
                chars_per_token,
            } => {
                let actual = estimate_tokens(system_prompt, chars_per_token);
                if actual > max {
                    return Err(ConfigError::SystemPromptTooLarge { actual, bound: max }.into());
                }
            }
            HistoryBound::Turns(_) => {}
        }

        let mut history = Self::new(bound);
        history.turns.push(ConversationTurn::system(system_prompt));
        Ok(history)
    }

    /// Append a turn, then re-trim so the bound keeps holding
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        self.trim();
    }

    /// Evict the oldest non-system turns (FIFO) until the bound is satisfied
    pub fn trim(&mut self) {
        let mut evicted = 0;
        while self.over_bound() {
            match self.oldest_evictable() {
                Some(index) => {
                    self.turns.remove(index);
                    evicted += 1;
                }
                None => break,
            }
        }
        if evicted > 0 {
            debug!(evicted, remaining = self.turns.len(), "trimmed history");
        }
    }

    fn over_bound(&self) -> bool {
        match self.bound {
            HistoryBound::Turns(max) => self.turns.len() > max,
            HistoryBound::Tokens {
                max,
                chars_per_token,
            } => {
                let total: usize = self
                    .turns
                    .iter()
                    .map(|t| estimate_tokens(&t.content, chars_per_token))
                    .sum();
                total > max
            }
        }
    }

    fn oldest_evictable(&self) -> Option<usize> {
        self.turns
            .iter()
            .position(|t| t.role != TurnRole::System)
    }

    /// The system prompt, when present as the first turn
    pub fn system_prompt(&self) -> Option<&str> {
        self.turns
            .first()
            .filter(|t| t.role == TurnRole::System)
            .map(|t| t.content.as_str())
    }

    /// All turns in order
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Turns excluding the system prompt
    pub fn non_system_turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().filter(|t| t.role != TurnRole::System)
    }

    /// Number of turns, counting the system turn
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history has no turns at all
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The configured bound
    pub fn bound(&self) -> HistoryBound {
        self.bound
    }

    /// Drop every non-system turn, keeping the session's system prompt
    pub fn reset(&mut self) {
        self.turns.retain(|t| t.role == TurnRole::System);
    }
}
