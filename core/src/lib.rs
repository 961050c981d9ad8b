//! # Caravel Core
//!
//! Core library for Caravel - an LLM-powered travel support agent.
//!
//! This library provides the tool-call extraction and argument-normalization
//! engine: it separates prose from call expressions in raw model output,
//! parses argument lists into typed values, synthesizes natural-language
//! descriptions of each call, and maintains the bounded conversation context
//! needed for multi-step dialogues. Tool execution itself stays with the
//! caller.

// Core modules
pub mod agent;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod llm;

// Re-export commonly used types
pub use agent::{AgentConfig, SupportAgent, SupportAgentBuilder};
pub use catalog::{ToolCatalog, ToolCatalogEntry};
pub use config::{ModelParams, Protocol, ResolvedLlmConfig};
pub use context::{build_prompt, ConversationHistory, ConversationTurn, HistoryBound, TurnRole};
pub use error::{Error, Result};
pub use extract::{
    ArgValue, DescriptionTemplates, Extractor, Span, ToolInvocation, TurnResult, TypedArgument,
};
pub use llm::{CompletionOptions, LlmClient, OpenAiCompatClient};

/// Current version of the caravel-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
