use crate::agent::AgentConfig;
use crate::synthesizer::SynthesizerConfig;
use crate::telephony::{CallSid, TwilioConfig};
use crate::transcriber::TranscriberConfig;
use serde::{Deserialize, Serialize};

/// Everything the conversation pipeline needs once a placed call connects.
///
/// Stored under the conversation id by the call that placed it. The `twilio_sid`
/// field is a [`CallSid`], so a record without a provider handle cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub transcriber_config: TranscriberConfig,
    pub agent_config: AgentConfig,
    pub synthesizer_config: SynthesizerConfig,
    pub twilio_config: TwilioConfig,
    pub twilio_sid: CallSid,
    pub twilio_from: String,
    pub twilio_to: String,
}
