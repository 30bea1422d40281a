//! Outbound SMS delivery through the Twilio REST API.

use serde::Deserialize;

use blast_common::config::AppConfig;
use blast_common::error::AppError;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Seam between the dispatch loop and the SMS provider.
#[allow(async_fn_in_trait)]
pub trait SmsGateway {
    /// Submit one message. Returns the provider message SID on acceptance.
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, AppError>;
}

/// Message-create response fields we read.
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: Option<i64>,
    message: String,
}

/// Twilio-backed [`SmsGateway`].
pub struct TwilioGateway {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    base_url: String,
}

impl TwilioGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from_number: config.twilio_phone_number.clone(),
            base_url: TWILIO_API_BASE.to_string(),
        }
    }

    /// Point the gateway at a different API host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

impl SmsGateway for TwilioGateway {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(parse_error_body(status.as_u16(), &text));
        }

        let message: MessageResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::Decode(format!("message response: {e}")))?;

        tracing::debug!(sid = %message.sid, to = %to, "Message submitted");
        Ok(message.sid)
    }
}

/// Map a non-2xx Twilio response to a gateway error. Falls back to the raw
/// body when it is not the documented error shape.
fn parse_error_body(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => AppError::Gateway {
            code: err.code,
            message: err.message,
        },
        Err(_) => AppError::Gateway {
            code: None,
            message: format!("HTTP {status}: {body}"),
        },
    }
}
