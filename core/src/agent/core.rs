//! SupportAgent implementation

use super::config::AgentConfig;
use super::system::build_system_prompt;
use crate::catalog::ToolCatalog;
use crate::config::{Protocol, ResolvedLlmConfig};
use crate::context::{build_prompt, ConversationHistory, ConversationTurn};
use crate::error::{ConfigError, Result};
use crate::extract::{DescriptionTemplates, Extractor, TurnResult};
use crate::llm::{CompletionOptions, LlmClient, OpenAiCompatClient};
use std::sync::Arc;
use tracing::debug;

/// A single conversation session: bounded history, the extraction engine,
/// and a handle to the model client.
///
/// Each session owns its history; concurrent conversations need one
/// `SupportAgent` each.
pub struct SupportAgent {
    config: AgentConfig,
    llm_client: Arc<dyn LlmClient>,
    extractor: Extractor,
    history: ConversationHistory,
}

impl SupportAgent {
    /// Create an agent, constructing the model client from resolved config.
    ///
    /// The config is validated here, and its model parameters seed the
    /// completion options unless the agent config already overrides them.
    pub fn new_with_llm_config(
        mut agent_config: AgentConfig,
        llm_config: ResolvedLlmConfig,
        catalog: ToolCatalog,
        templates: DescriptionTemplates,
    ) -> Result<Self> {
        llm_config
            .validate()
            .map_err(|message| ConfigError::InvalidLlmConfig { message })?;

        if agent_config.completion == CompletionOptions::default() {
            agent_config.completion = CompletionOptions::from_params(&llm_config.params);
        }

        let llm_client: Arc<dyn LlmClient> = match &llm_config.protocol {
            Protocol::OpenAICompat => Arc::new(OpenAiCompatClient::new(&llm_config)?),
            Protocol::Custom(name) => {
                return Err(ConfigError::InvalidValue {
                    field: "protocol".to_string(),
                    value: format!("custom protocol '{}' needs build_with_client", name),
                }
                .into());
            }
        };

        Self::new_with_client(agent_config, llm_client, catalog, templates)
    }

    /// Create an agent around an existing model client
    pub fn new_with_client(
        agent_config: AgentConfig,
        llm_client: Arc<dyn LlmClient>,
        catalog: ToolCatalog,
        templates: DescriptionTemplates,
    ) -> Result<Self> {
        let system_prompt =
            build_system_prompt(agent_config.system_prompt.as_deref(), &catalog);
        let history =
            ConversationHistory::with_system_prompt(agent_config.history_bound, &system_prompt)?;

        let extractor = Extractor::new(catalog, templates)
            .with_filter_unknown(agent_config.filter_unknown_tools);

        Ok(Self {
            config: agent_config,
            llm_client,
            extractor,
            history,
        })
    }

    /// Run one conversation turn: assemble the prompt, call the model,
    /// extract tool invocations, and record the exchange in the history.
    pub async fn run_turn(&mut self, user_message: &str) -> Result<TurnResult> {
        let prompt = build_prompt(None, &self.history, &[], user_message);
        debug!(
            model = self.llm_client.model_name(),
            prompt_len = prompt.len(),
            "running turn"
        );

        let raw_response = self
            .llm_client
            .complete(&prompt, Some(self.config.completion.clone()))
            .await?;

        let result = self.extractor.extract(&raw_response);

        self.history.append(ConversationTurn::user(user_message));
        self.history
            .append(ConversationTurn::assistant(self.assistant_content(&result)));

        Ok(result)
    }

    /// The user-facing assistant text for a turn: the prose remainder, or
    /// the first invocation's description when the model sent a bare call.
    fn assistant_content(&self, result: &TurnResult) -> String {
        if result.prose.trim().is_empty() {
            if let Some(first) = result.invocations.first() {
                return first.description.clone();
            }
        }
        result.prose.clone()
    }

    /// Feed a tool execution result back into the conversation
    pub fn record_tool_result(&mut self, content: &str) {
        self.history.append(ConversationTurn::tool(content));
    }

    /// Extract tool calls from text without a model round trip
    pub fn process_response(&self, raw_text: &str) -> TurnResult {
        self.extractor.extract(raw_text)
    }

    /// Drop all non-system history, starting the session over
    pub fn reset(&mut self) {
        self.history.reset();
    }

    /// Get agent configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The session's conversation history
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// The full system prompt in effect for this session
    pub fn system_prompt(&self) -> Option<&str> {
        self.history.system_prompt()
    }
}
