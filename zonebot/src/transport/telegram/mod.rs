//! Telegram Bot API transport
//!
//! Long-polls `getUpdates` and renders screens with `sendMessage`,
//! `editMessageText` and `answerCallbackQuery`. The bot token is part of every
//! URL, so URLs are stripped from errors and never logged.

mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use types::Update;
use types::{
    reply_markup, AnswerCallbackQuery, EditMessageText, GetUpdates, SendMessage, SentMessage,
    TelegramResponse,
};

use super::{ChatId, ChatSink, EventSource, InboundEvent, MessageId, TransportError};
use crate::screen::Screen;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Slack on top of the long-poll timeout before the HTTP call gives up.
const REQUEST_TIMEOUT_SLACK_SECS: u64 = 15;

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

pub struct TelegramTransport {
    client: Client,
    /// `{api_base}/bot{token}`
    endpoint: String,
    poll_timeout: Duration,
}

impl TelegramTransport {
    pub fn new(
        bot_token: &str,
        api_base: &str,
        poll_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(poll_timeout + Duration::from_secs(REQUEST_TIMEOUT_SLACK_SECS))
            .build()
            .map_err(|e| {
                TransportError::Network(format!(
                    "Failed to create HTTP client: {}",
                    e.without_url()
                ))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/bot{bot_token}", api_base.trim_end_matches('/')),
            poll_timeout,
        })
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TransportError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        tracing::debug!("[telegram] {method}");

        let response = self
            .client
            .post(format!("{}/{method}", self.endpoint))
            .json(params)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let envelope: TelegramResponse<R> = response.json().await.map_err(|e| {
            TransportError::Decode(format!("{method} (HTTP {status}): {}", e.without_url()))
        })?;

        match envelope {
            TelegramResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            TelegramResponse {
                error_code,
                description,
                ..
            } => Err(TransportError::Api {
                code: error_code.unwrap_or(i64::from(status)),
                description: description
                    .unwrap_or_else(|| format!("{method} returned no result")),
            }),
        }
    }

    /// Wait up to the poll timeout for updates at or after `offset`.
    pub async fn poll(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: self.poll_timeout.as_secs(),
                allowed_updates: ALLOWED_UPDATES,
            },
        )
        .await
    }
}

impl std::fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("endpoint", &"<redacted>")
            .field("poll_timeout", &self.poll_timeout)
            .finish_non_exhaustive()
    }
}

/// Offset for the next `getUpdates` call and the events worth handling.
pub fn drain(updates: Vec<Update>, offset: i64) -> (i64, Vec<InboundEvent>) {
    let next = updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .unwrap_or(offset)
        .max(offset);
    let events = updates.into_iter().filter_map(Update::into_event).collect();
    (next, events)
}

fn is_not_modified(error: &TransportError) -> bool {
    matches!(
        error,
        TransportError::Api { description, .. } if description.contains("message is not modified")
    )
}

#[async_trait]
impl EventSource for TelegramTransport {
    async fn next_events(&self, cursor: i64) -> Result<(i64, Vec<InboundEvent>), TransportError> {
        let updates = self.poll(cursor).await?;
        Ok(drain(updates, cursor))
    }
}

#[async_trait]
impl ChatSink for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        screen: &Screen,
    ) -> Result<MessageId, TransportError> {
        let sent: SentMessage = self
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id,
                    text: &screen.text,
                    reply_markup: reply_markup(screen),
                },
            )
            .await?;
        Ok(sent.message_id)
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> Result<(), TransportError> {
        // `result` is the edited message, or `true` for inline messages.
        let result: Result<serde_json::Value, _> = self
            .call(
                "editMessageText",
                &EditMessageText {
                    chat_id,
                    message_id,
                    text: &screen.text,
                    reply_markup: reply_markup(screen),
                },
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_not_modified(&e) => {
                tracing::debug!("[telegram] message {message_id} unchanged");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        alert: Option<&str>,
    ) -> Result<(), TransportError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: callback_id,
                    text: alert,
                    show_alert: alert.is_some(),
                },
            )
            .await?;
        Ok(())
    }
}
