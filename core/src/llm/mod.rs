//! LLM client abstractions and implementations

pub mod client;
pub mod providers;

pub use client::{CompletionOptions, LlmClient};
pub use providers::OpenAiCompatClient;
