//! Telephony Provider Interface
//!
//! Types exchanged with the telephony provider and the [`TelephonyClient`] trait
//! that the lifecycle manager drives. The concrete Twilio REST binding lives in
//! the `ringout-twilio` crate.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Twilio account credentials plus per-account call options.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Ask the provider to record placed calls.
    #[serde(default)]
    pub record: bool,
}

impl TwilioConfig {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            record: false,
        }
    }

    pub fn with_record(mut self, record: bool) -> Self {
        self.record = record;
        self
    }
}

// Keep the auth token out of logs.
impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("record", &self.record)
            .finish()
    }
}

/// Provider-assigned identifier of a placed call. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallSid(String);

impl CallSid {
    pub fn new(sid: impl Into<String>) -> Result<Self, ProviderError> {
        let sid = sid.into();
        if sid.trim().is_empty() {
            return Err(ProviderError::Decode(
                "provider returned an empty call sid".to_string(),
            ));
        }
        Ok(Self(sid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CallSid {
    type Error = ProviderError;

    fn try_from(sid: String) -> Result<Self, Self::Error> {
        Self::new(sid)
    }
}

impl From<CallSid> for String {
    fn from(sid: CallSid) -> Self {
        sid.0
    }
}

impl fmt::Display for CallSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CallSid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Everything the provider needs to place one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCallRequest {
    /// Connection instructions executed when the callee answers.
    pub twiml: String,
    pub to: String,
    pub from: String,
    /// DTMF digits played once the call connects.
    pub send_digits: Option<String>,
    pub record: bool,
}

/// Line-type data from the provider's number lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineTypeIntelligence {
    #[serde(rename = "type")]
    pub line_type: Option<String>,
    pub carrier_name: Option<String>,
    pub mobile_country_code: Option<String>,
    pub mobile_network_code: Option<String>,
    pub error_code: Option<i64>,
}

/// The subset of the telephony provider API used to manage outbound calls.
///
/// Implementations must be safe to share between concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelephonyClient: Send + Sync {
    /// Places a call and returns the provider's handle for it.
    async fn create_call(&self, request: CreateCallRequest) -> Result<CallSid, ProviderError>;

    /// Looks up the line type of a phone number.
    ///
    /// Returns `Ok(None)` when the provider has no line-type data for the number.
    async fn lookup_line_type(
        &self,
        phone_number: &str,
    ) -> Result<Option<LineTypeIntelligence>, ProviderError>;

    /// Requests a status change for a call and returns the status the provider reports afterwards.
    async fn update_call_status(&self, sid: &CallSid, status: &str)
    -> Result<String, ProviderError>;
}
