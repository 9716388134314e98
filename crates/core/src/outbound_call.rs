//! Outbound Call Lifecycle
//!
//! [`OutboundCall`] places a single call through the telephony provider and
//! hands the session off to the conversation pipeline:
//!
//! 1. check that the destination may be called,
//! 2. ask the provider to place the call (yielding a [`CallSid`]),
//! 3. store the [`SessionConfig`] under the conversation id,
//!
//! and later, independently, hang the call up again. Every step reports its own
//! error type; nothing is retried and nothing is rolled back.

use crate::agent::AgentConfig;
use crate::config_manager::ConfigManager;
use crate::constants::{COMPLETED_CALL_STATUS, MIN_PHONE_NUMBER_LEN, MOBILE_LINE_TYPE};
use crate::defaults::{resolve_synthesizer_config, resolve_transcriber_config};
use crate::error::{OutboundCallError, PersistenceError, ProviderError, ValidationError};
use crate::session::SessionConfig;
use crate::synthesizer::SynthesizerConfig;
use crate::telephony::{CallSid, CreateCallRequest, TelephonyClient, TwilioConfig};
use crate::templater::Templater;
use crate::transcriber::TranscriberConfig;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Generates a fresh, globally unique conversation id.
pub fn create_conversation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// What the caller asks for when placing an outbound call.
#[derive(Debug, Clone)]
pub struct OutboundCallRequest {
    /// Public host of the conversation pipeline, without scheme.
    pub base_url: String,
    pub to_phone: String,
    pub from_phone: String,
    pub agent_config: AgentConfig,
    pub transcriber_config: Option<TranscriberConfig>,
    pub synthesizer_config: Option<SynthesizerConfig>,
    /// Generated when absent.
    pub conversation_id: Option<String>,
    /// DTMF digits to send once the call connects.
    pub digits: Option<String>,
    /// Only place the call if the destination is a mobile line.
    pub mobile_only: bool,
}

impl OutboundCallRequest {
    pub fn new(
        base_url: impl Into<String>,
        to_phone: impl Into<String>,
        from_phone: impl Into<String>,
        agent_config: AgentConfig,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            to_phone: to_phone.into(),
            from_phone: from_phone.into(),
            agent_config,
            transcriber_config: None,
            synthesizer_config: None,
            conversation_id: None,
            digits: None,
            mobile_only: true,
        }
    }

    pub fn with_transcriber_config(mut self, config: TranscriberConfig) -> Self {
        self.transcriber_config = Some(config);
        self
    }

    pub fn with_synthesizer_config(mut self, config: SynthesizerConfig) -> Self {
        self.synthesizer_config = Some(config);
        self
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn with_digits(mut self, digits: impl Into<String>) -> Self {
        self.digits = Some(digits.into());
        self
    }

    pub fn with_mobile_only(mut self, mobile_only: bool) -> Self {
        self.mobile_only = mobile_only;
        self
    }
}

/// One outbound call attempt.
///
/// Instances share nothing mutable with each other; the provider client and
/// config store are shared through `Arc` and must tolerate concurrent use.
pub struct OutboundCall {
    base_url: String,
    to_phone: String,
    from_phone: String,
    digits: Option<String>,
    mobile_only: bool,
    conversation_id: String,
    agent_config: AgentConfig,
    transcriber_config: TranscriberConfig,
    synthesizer_config: SynthesizerConfig,
    twilio_config: TwilioConfig,
    telephony: Arc<dyn TelephonyClient>,
    config_manager: Arc<dyn ConfigManager>,
    templater: Templater,
    twilio_sid: Option<CallSid>,
}

impl OutboundCall {
    /// Creates a call attempt, filling in default transcriber and synthesizer
    /// settings and a conversation id where the request leaves them out.
    ///
    /// # Arguments
    ///
    /// * `request` - The destination, caller id and pipeline settings.
    /// * `twilio_config` - Provider credentials, stored with the session.
    /// * `telephony` - Client for the provider's REST API.
    /// * `config_manager` - Store the session config is handed off to.
    pub fn new(
        request: OutboundCallRequest,
        twilio_config: TwilioConfig,
        telephony: Arc<dyn TelephonyClient>,
        config_manager: Arc<dyn ConfigManager>,
    ) -> Self {
        let OutboundCallRequest {
            base_url,
            to_phone,
            from_phone,
            agent_config,
            transcriber_config,
            synthesizer_config,
            conversation_id,
            digits,
            mobile_only,
        } = request;

        Self {
            base_url,
            to_phone,
            from_phone,
            digits,
            mobile_only,
            conversation_id: conversation_id.unwrap_or_else(create_conversation_id),
            agent_config,
            transcriber_config: resolve_transcriber_config(transcriber_config),
            synthesizer_config: resolve_synthesizer_config(synthesizer_config),
            twilio_config,
            telephony,
            config_manager,
            templater: Templater::new(),
            twilio_sid: None,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// The provider handle, once the call has been placed.
    pub fn twilio_sid(&self) -> Option<&CallSid> {
        self.twilio_sid.as_ref()
    }

    pub fn transcriber_config(&self) -> &TranscriberConfig {
        &self.transcriber_config
    }

    pub fn synthesizer_config(&self) -> &SynthesizerConfig {
        &self.synthesizer_config
    }

    /// Validates, places and records the call.
    ///
    /// If the session store fails after the provider accepted the call, the
    /// error is returned but the handle stays available through
    /// [`Self::twilio_sid`] so the caller can still [`Self::end`] the call.
    #[instrument(
        name = "outbound_call",
        skip_all,
        fields(conversation_id = %self.conversation_id, to = %self.to_phone)
    )]
    pub async fn start(&mut self) -> Result<CallSid, OutboundCallError> {
        if let Some(sid) = &self.twilio_sid {
            return Err(OutboundCallError::AlreadyStarted(sid.to_string()));
        }
        debug!(
            sampling_rate = self.transcriber_config.sampling_rate(),
            audio_encoding = %self.transcriber_config.audio_encoding(),
            mobile_only = self.mobile_only,
            "Starting outbound call"
        );

        self.validate_outbound_call(&self.to_phone, &self.from_phone, self.mobile_only)
            .await?;

        let sid = self
            .create_twilio_call(
                &self.to_phone,
                &self.from_phone,
                self.digits.as_deref(),
                self.twilio_config.record,
            )
            .await?;
        self.twilio_sid = Some(sid.clone());
        info!(twilio_sid = %sid, "Call placed");

        if let Err(e) = self.record_session(sid.clone()).await {
            warn!(twilio_sid = %sid, error = %e, "Call placed but session config was not saved");
            return Err(e.into());
        }
        Ok(sid)
    }

    /// Hangs up the call placed by [`Self::start`].
    ///
    /// Returns `true` only when the provider reports the call as completed.
    pub async fn end(&self) -> Result<bool, OutboundCallError> {
        let sid = self.twilio_sid.as_ref().ok_or(OutboundCallError::NotStarted)?;
        Ok(terminate_call(self.telephony.as_ref(), sid).await?)
    }

    /// Checks that `to_phone` may be called.
    ///
    /// Numbers shorter than eight characters are rejected outright. When
    /// `mobile_only` is set, the provider's line-type lookup must report the
    /// number as `"mobile"`.
    pub async fn validate_outbound_call(
        &self,
        to_phone: &str,
        from_phone: &str,
        mobile_only: bool,
    ) -> Result<(), OutboundCallError> {
        if to_phone.chars().count() < MIN_PHONE_NUMBER_LEN {
            return Err(ValidationError::InvalidDestination.into());
        }
        if !mobile_only {
            return Ok(());
        }

        let line_type = self.telephony.lookup_line_type(to_phone).await?;
        debug!(%to_phone, %from_phone, ?line_type, "Line type lookup finished");
        match line_type.and_then(|info| info.line_type) {
            Some(kind) if kind == MOBILE_LINE_TYPE => Ok(()),
            _ => Err(ValidationError::IneligibleLineType.into()),
        }
    }

    /// Asks the provider to place the call and returns its handle.
    ///
    /// There is no idempotency key: calling this twice places two real calls.
    pub async fn create_twilio_call(
        &self,
        to_phone: &str,
        from_phone: &str,
        digits: Option<&str>,
        record: bool,
    ) -> Result<CallSid, ProviderError> {
        let twiml = self
            .templater
            .connection_twiml(&self.base_url, &self.conversation_id);
        let request = CreateCallRequest {
            twiml,
            to: to_phone.to_string(),
            from: from_phone.to_string(),
            send_digits: digits.filter(|d| !d.is_empty()).map(str::to_string),
            record,
        };
        self.telephony.create_call(request).await
    }

    /// Stores the session config for the placed call under the conversation id.
    pub async fn record_session(&self, twilio_sid: CallSid) -> Result<(), PersistenceError> {
        let config = SessionConfig {
            transcriber_config: self.transcriber_config.clone(),
            agent_config: self.agent_config.clone(),
            synthesizer_config: self.synthesizer_config.clone(),
            twilio_config: self.twilio_config.clone(),
            twilio_sid,
            twilio_from: self.from_phone.clone(),
            twilio_to: self.to_phone.clone(),
        };
        self.config_manager
            .save_config(&self.conversation_id, &config)
            .await
    }
}

/// Asks the provider to complete the call identified by `sid`.
///
/// Returns `true` iff the provider reports the resulting status as exactly
/// `"completed"`.
pub async fn terminate_call(
    telephony: &dyn TelephonyClient,
    sid: &CallSid,
) -> Result<bool, ProviderError> {
    let status = telephony
        .update_call_status(sid, COMPLETED_CALL_STATUS)
        .await?;
    info!(twilio_sid = %sid, %status, "Requested call completion");
    Ok(status == COMPLETED_CALL_STATUS)
}
