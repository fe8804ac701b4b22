use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::SubmittedEntry;
use crate::ports::{Notifier, NotifyError};

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Bot credentials and target chat. Supplied by configuration, never
/// compiled in.
#[derive(Clone, Deserialize, Serialize)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Posts one Markdown message per submitted entry through the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    settings: TelegramSettings,
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::ResponseError(e.to_string()))?;
        Ok(Self { client, settings })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.bot_token
        )
    }

    /// Send `text` to the configured chat.
    #[instrument(name = "TelegramNotifier::send_text", skip(self, text), fields(chat_id = %self.settings.chat_id))]
    pub async fn send_text(&self, text: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.settings.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let resp = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::ResponseError(e.without_url().to_string()))?;

        check_status(resp.status())
    }
}

/// The Bot API accepted the message only on a 2xx answer.
fn check_status(status: reqwest::StatusCode) -> Result<(), NotifyError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(NotifyError::Status(status.as_u16()))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, entry: &SubmittedEntry) -> Result<(), NotifyError> {
        self.send_text(&entry.notification_text()).await
    }
}
