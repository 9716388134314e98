//! Implementations of the dialer subcommands.
//!
//! Both commands take the provider client and session store as trait objects so
//! the binary can wire in Twilio and the file store while tests use stubs.

use crate::{cli::StartArgs, config::Config};
use anyhow::{Context, Error, Result};
use ringout_core::{
    agent::{AgentConfig, ChatGptAgentConfig},
    config_manager::ConfigManager,
    error::OutboundCallError,
    outbound_call::{OutboundCall, OutboundCallRequest, terminate_call},
    telephony::{CallSid, TelephonyClient},
};
use std::{path::Path, sync::Arc};
use tracing::{info, warn};

const DEFAULT_PROMPT: &str = "Have a pleasant conversation about life";

/// The outcome of a successful `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedCall {
    pub conversation_id: String,
    pub twilio_sid: CallSid,
}

async fn load_agent_config(path: &Path) -> Result<AgentConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read agent config {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid agent config in {}", path.display()))
}

async fn agent_config_from_args(args: &StartArgs) -> Result<AgentConfig> {
    if let Some(path) = &args.agent_config {
        return load_agent_config(path).await;
    }
    let prompt = args.prompt.as_deref().unwrap_or(DEFAULT_PROMPT);
    let mut agent = ChatGptAgentConfig::new(prompt);
    if let Some(message) = &args.initial_message {
        agent = agent.with_initial_message(message);
    }
    Ok(AgentConfig::ChatGpt(agent))
}

/// Places an outbound call and stores its session config.
pub async fn start_call(
    config: &Config,
    args: StartArgs,
    telephony: Arc<dyn TelephonyClient>,
    store: Arc<dyn ConfigManager>,
) -> Result<StartedCall> {
    let from_phone = args
        .from
        .clone()
        .or_else(|| config.from_phone.clone())
        .context("No caller id: pass --from or set FROM_PHONE")?;
    let agent_config = agent_config_from_args(&args).await?;

    let mut request = OutboundCallRequest::new(
        config.base_url.clone(),
        args.to.clone(),
        from_phone,
        agent_config,
    )
    .with_mobile_only(!args.allow_landline);
    if let Some(digits) = args.digits {
        request = request.with_digits(digits);
    }
    if let Some(conversation_id) = args.conversation_id {
        request = request.with_conversation_id(conversation_id);
    }

    let mut call = OutboundCall::new(request, config.twilio.clone(), telephony, store);
    let conversation_id = call.conversation_id().to_string();
    info!(%conversation_id, to = %args.to, "Placing outbound call");

    match call.start().await {
        Ok(twilio_sid) => Ok(StartedCall {
            conversation_id,
            twilio_sid,
        }),
        Err(e @ OutboundCallError::Persistence(_)) => {
            let sid = call
                .twilio_sid()
                .map(ToString::to_string)
                .unwrap_or_default();
            warn!(%conversation_id, twilio_sid = %sid, "Placed call has no stored session config");
            Err(Error::from(e).context(format!(
                "Call {} was placed but its session config could not be saved",
                sid
            )))
        }
        Err(e) => Err(Error::from(e).context("Failed to start outbound call")),
    }
}

/// Ends the call stored under `conversation_id`.
///
/// Returns whether the provider reports the call as completed.
pub async fn end_call(
    conversation_id: &str,
    telephony: Arc<dyn TelephonyClient>,
    store: Arc<dyn ConfigManager>,
) -> Result<bool> {
    let session = store
        .get_config(conversation_id)
        .await?
        .with_context(|| format!("No session stored for conversation '{}'", conversation_id))?;

    let completed = terminate_call(telephony.as_ref(), &session.twilio_sid)
        .await
        .context("Failed to end call")?;
    info!(%conversation_id, twilio_sid = %session.twilio_sid, completed, "End call requested");
    Ok(completed)
}
