//! LLM client trait
//!
//! The engine treats the model as an external collaborator that takes one
//! assembled prompt and returns one text blob. Authentication, retry, and
//! rate limiting live behind this trait, not in the engine.

use crate::config::ModelParams;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a prompt and return the model's raw text response
    async fn complete(&self, prompt: &str, options: Option<CompletionOptions>) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

/// Options for a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature for generation
    pub temperature: Option<f32>,

    /// Top-p sampling parameter
    pub top_p: Option<f32>,

    /// Stop sequences
    pub stop: Option<Vec<String>>,
}

impl CompletionOptions {
    /// Merge resolved model parameters over the defaults
    pub fn from_params(params: &ModelParams) -> Self {
        let defaults = Self::default();
        Self {
            max_tokens: params.max_tokens.or(defaults.max_tokens),
            temperature: params.temperature.or(defaults.temperature),
            top_p: params.top_p.or(defaults.top_p),
            stop: params.stop_sequences.clone(),
        }
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(1024),
            temperature: Some(0.7),
            top_p: Some(1.0),
            stop: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_model_kwargs() {
        let options = CompletionOptions::default();
        assert_eq!(options.max_tokens, Some(1024));
        assert_eq!(options.temperature, Some(0.7));
        assert_eq!(options.top_p, Some(1.0));
    }

    #[test]
    fn test_params_override_defaults() {
        let params = ModelParams {
            max_tokens: Some(2048),
            temperature: None,
            top_p: None,
            stop_sequences: None,
        };
        let options = CompletionOptions::from_params(&params);
        assert_eq!(options.max_tokens, Some(2048));
        assert_eq!(options.temperature, Some(0.7));
    }
}
