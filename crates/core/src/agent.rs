//! Agent Configuration
//!
//! Describes the conversational agent that the real-time pipeline runs once the
//! outbound call connects. The lifecycle manager treats these values as opaque:
//! they are stored with the session and read back by the pipeline.

use serde::{Deserialize, Serialize};

/// Settings for an agent backed by an OpenAI-compatible chat model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatGptAgentConfig {
    /// System prompt that frames the whole conversation.
    pub prompt_preamble: String,
    /// Spoken by the agent as soon as the callee picks up, if set.
    #[serde(default)]
    pub initial_message: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whether the callee may interrupt the agent mid-sentence.
    #[serde(default = "default_true")]
    pub allow_agent_to_be_cut_off: bool,
}

impl ChatGptAgentConfig {
    /// Creates a chat agent config with the stock model settings.
    pub fn new(prompt_preamble: impl Into<String>) -> Self {
        Self {
            prompt_preamble: prompt_preamble.into(),
            initial_message: None,
            model_name: default_model_name(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            allow_agent_to_be_cut_off: true,
        }
    }

    pub fn with_initial_message(mut self, message: impl Into<String>) -> Self {
        self.initial_message = Some(message.into());
        self
    }
}

/// Settings for an agent that repeats the callee back to them; handy for line checks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EchoAgentConfig {
    #[serde(default)]
    pub initial_message: Option<String>,
}

/// The agent the conversation pipeline should run for a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentConfig {
    #[serde(rename = "agent_chat_gpt")]
    ChatGpt(ChatGptAgentConfig),
    #[serde(rename = "agent_echo")]
    Echo(EchoAgentConfig),
}

fn default_model_name() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    256
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_gpt_config_deserializes_with_defaults() {
        let json = r#"{"type": "agent_chat_gpt", "prompt_preamble": "Be brief."}"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();

        match config {
            AgentConfig::ChatGpt(c) => {
                assert_eq!(c.prompt_preamble, "Be brief.");
                assert_eq!(c.initial_message, None);
                assert_eq!(c.model_name, "gpt-4o");
                assert_eq!(c.max_tokens, 256);
                assert!(c.allow_agent_to_be_cut_off);
            }
            other => panic!("Expected ChatGpt agent, got {:?}", other),
        }
    }

    #[test]
    fn test_echo_config_tag() {
        let json = serde_json::to_string(&AgentConfig::Echo(EchoAgentConfig::default())).unwrap();
        assert!(json.contains(r#""type":"agent_echo""#));
    }

    #[test]
    fn test_unknown_agent_type_is_rejected() {
        let json = r#"{"type": "agent_unknown"}"#;
        assert!(serde_json::from_str::<AgentConfig>(json).is_err());
    }
}
