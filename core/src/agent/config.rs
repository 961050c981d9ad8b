//! Agent configuration structures

use crate::catalog::ToolCatalog;
use crate::context::HistoryBound;
use crate::extract::DescriptionTemplates;
use crate::llm::{CompletionOptions, LlmClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for a support agent session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Custom base system prompt (optional)
    /// If not provided, the default support-assistant prompt is used
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Bound on the conversation history
    #[serde(default)]
    pub history_bound: HistoryBound,

    /// Whether call candidates naming unknown tools are filtered to prose
    #[serde(default = "default_true")]
    pub filter_unknown_tools: bool,

    /// Completion options passed to the model on every turn
    #[serde(default)]
    pub completion: CompletionOptions,
}

fn default_true() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            history_bound: HistoryBound::default(),
            filter_unknown_tools: true,
            completion: CompletionOptions::default(),
        }
    }
}

/// Builder for creating support agents with resolved LLM configuration
pub struct SupportAgentBuilder {
    llm_config: crate::config::ResolvedLlmConfig,
    agent_config: AgentConfig,
    catalog: ToolCatalog,
    templates: DescriptionTemplates,
}

impl SupportAgentBuilder {
    /// Create a new builder with LLM configuration and the travel tool set
    pub fn new(llm_config: crate::config::ResolvedLlmConfig) -> Self {
        Self {
            llm_config,
            agent_config: AgentConfig::default(),
            catalog: ToolCatalog::travel_support(),
            templates: DescriptionTemplates::default(),
        }
    }

    /// Set agent configuration
    pub fn with_agent_config(mut self, agent_config: AgentConfig) -> Self {
        self.agent_config = agent_config;
        self
    }

    /// Set the tool catalog
    pub fn with_catalog(mut self, catalog: ToolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the description templates
    pub fn with_templates(mut self, templates: DescriptionTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Set the base system prompt
    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.agent_config.system_prompt = system_prompt;
        self
    }

    /// Set the history bound
    pub fn with_history_bound(mut self, bound: HistoryBound) -> Self {
        self.agent_config.history_bound = bound;
        self
    }

    /// Build the agent, creating the model client from the LLM config
    pub fn build(self) -> crate::error::Result<super::SupportAgent> {
        super::SupportAgent::new_with_llm_config(
            self.agent_config,
            self.llm_config,
            self.catalog,
            self.templates,
        )
    }

    /// Build the agent around a caller-supplied model client
    pub fn build_with_client(
        self,
        client: Arc<dyn LlmClient>,
    ) -> crate::error::Result<super::SupportAgent> {
        super::SupportAgent::new_with_client(self.agent_config, client, self.catalog, self.templates)
    }
}
