//! Twilio REST binding
//!
//! Implements [`TelephonyClient`] over the Twilio Calls and Lookup v2 APIs using
//! form-encoded requests and HTTP basic auth.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use ringout_core::error::ProviderError;
use ringout_core::telephony::{
    CallSid, CreateCallRequest, LineTypeIntelligence, TelephonyClient, TwilioConfig,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";
pub const DEFAULT_LOOKUPS_BASE: &str = "https://lookups.twilio.com";

/// The fields of a Twilio call resource this client reads.
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhoneNumberResource {
    line_type_intelligence: Option<LineTypeIntelligence>,
}

/// Error payload Twilio returns alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// Twilio client for the calls and lookups used by the outbound call lifecycle.
#[derive(Clone)]
pub struct TwilioClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    api_base: String,
    lookups_base: String,
}

impl fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioClient")
            .field("account_sid", &self.account_sid)
            .field("api_base", &self.api_base)
            .field("lookups_base", &self.lookups_base)
            .finish_non_exhaustive()
    }
}

impl TwilioClient {
    /// Creates a client for the account in `config`, talking to the public Twilio endpoints.
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &TwilioConfig) -> Self {
        Self {
            http,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            api_base: DEFAULT_API_BASE.to_string(),
            lookups_base: DEFAULT_LOOKUPS_BASE.to_string(),
        }
    }

    /// Overrides the Calls API host, e.g. for a regional edge or a test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the Lookup API host.
    pub fn with_lookups_base(mut self, lookups_base: impl Into<String>) -> Self {
        self.lookups_base = lookups_base.into().trim_end_matches('/').to_string();
        self
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base,
            urlencoding::encode(&self.account_sid)
        )
    }

    fn call_url(&self, sid: &CallSid) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls/{}.json",
            self.api_base,
            urlencoding::encode(&self.account_sid),
            urlencoding::encode(sid.as_str())
        )
    }

    fn phone_number_url(&self, phone_number: &str) -> String {
        format!(
            "{}/v2/PhoneNumbers/{}",
            self.lookups_base,
            urlencoding::encode(phone_number)
        )
    }

    /// Sends an authenticated request and decodes a JSON body, mapping Twilio
    /// error payloads into [`ProviderError::Api`].
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let response = request
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<TwilioErrorBody>(&body).ok();
            let code = parsed.as_ref().and_then(|b| b.code);
            let message = parsed.and_then(|b| b.message).unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TelephonyClient for TwilioClient {
    async fn create_call(&self, request: CreateCallRequest) -> Result<CallSid, ProviderError> {
        let mut params = vec![
            ("Twiml", request.twiml),
            ("To", request.to),
            ("From", request.from),
            ("Record", request.record.to_string()),
        ];
        if let Some(digits) = request.send_digits {
            params.push(("SendDigits", digits));
        }

        debug!(url = %self.calls_url(), "Creating Twilio call");
        let call: CallResource = self
            .send(self.http.post(self.calls_url()).form(&params))
            .await?;
        CallSid::new(call.sid.unwrap_or_default())
    }

    async fn lookup_line_type(
        &self,
        phone_number: &str,
    ) -> Result<Option<LineTypeIntelligence>, ProviderError> {
        debug!(%phone_number, "Looking up line type");
        let resource: PhoneNumberResource = self
            .send(
                self.http
                    .get(self.phone_number_url(phone_number))
                    .query(&[("Fields", "line_type_intelligence")]),
            )
            .await?;
        Ok(resource.line_type_intelligence)
    }

    async fn update_call_status(
        &self,
        sid: &CallSid,
        status: &str,
    ) -> Result<String, ProviderError> {
        debug!(twilio_sid = %sid, %status, "Updating Twilio call status");
        let call: CallResource = self
            .send(self.http.post(self.call_url(sid)).form(&[("Status", status)]))
            .await?;
        call.status
            .ok_or_else(|| ProviderError::Decode("call resource has no status".to_string()))
    }
}
