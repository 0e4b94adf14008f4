//! Outbound SMS delivery through Twilio's REST API.
//!
//! [`TwilioSender`] issues one `POST` to the account's message-creation
//! endpoint per send, with no retries and the client's default timeouts. The
//! [`SmsSender`] trait is the seam the HTTP layer depends on, so handlers can
//! be tested against a mock without touching the network.

use async_trait::async_trait;
use log::{info, warn};
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::config::TwilioConfig;

const TWILIO_API_URL: &str = "https://api.twilio.com";

/// Twilio error code for sending to a number the account has not verified
/// (typical on trial accounts).
pub const UNVERIFIED_NUMBER_CODE: u32 = 21614;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("recipient number {0:?} is not in E.164 format (must start with '+')")]
    InvalidRecipient(String),
    #[error("Twilio error {code}: {message}")]
    Rejected { code: u32, message: String },
    #[error("request to Twilio failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response from Twilio (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

/// One-shot SMS delivery: a single attempt, returning the provider's
/// confirmation SID on success.
#[automock]
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<String, SendError>;
}

/// [`SmsSender`] backed by Twilio's message-creation endpoint.
pub struct TwilioSender {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Deserialize)]
struct ErrorResource {
    code: u32,
    message: String,
}

impl TwilioSender {
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_URL)
    }

    /// Like [`TwilioSender::new`], but pointed at an arbitrary base URL.
    pub fn with_base_url(config: &TwilioConfig, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.twilio_number.clone(),
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSender {
    async fn send(&self, to: &str, body: &str) -> Result<String, SendError> {
        // E.164 numbers always carry the '+'; reject before spending a
        // network round trip on a number Twilio cannot route.
        if !to.starts_with('+') {
            return Err(SendError::InvalidRecipient(to.to_string()));
        }

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        info!("Sending SMS to {} from {}", to, self.from_number);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let message: MessageResource = response.json().await?;
            info!("Message accepted, sid {}", message.sid);
            return Ok(message.sid);
        }

        let text = response.text().await?;
        match serde_json::from_str::<ErrorResource>(&text) {
            Ok(err) => {
                warn!("Twilio rejected the send: {} ({})", err.message, err.code);
                Err(SendError::Rejected {
                    code: err.code,
                    message: err.message,
                })
            }
            Err(_) => Err(SendError::UnexpectedResponse {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}
