//! Support agent: session object tying context, extraction, and the model

pub mod config;
pub mod core;
pub mod system;

pub use config::{AgentConfig, SupportAgentBuilder};
pub use core::SupportAgent;
pub use system::{build_system_prompt, DEFAULT_SYSTEM_PROMPT};
