//! Chat transport boundary.
//!
//! Inbound traffic arrives as [`InboundEvent`]s; everything the controller
//! renders goes out through a [`ChatSink`]. The controller never sees the
//! wire format of the chat network.

pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

use crate::screen::Screen;

pub type ChatId = i64;
pub type UserId = i64;
pub type MessageId = i64;

/// One inbound event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `/name` without the leading slash, bot suffix or arguments.
    Command(String),
    /// Inline button press.
    ButtonPress {
        /// Handle used to answer the press.
        callback_id: String,
        /// Message carrying the pressed keyboard; edited in place.
        message_id: MessageId,
        /// Raw callback token.
        data: String,
    },
    TextMessage(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Inbound event stream with a resumable cursor.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Wait for events after `cursor`; returns the cursor to resume from.
    async fn next_events(&self, cursor: i64) -> Result<(i64, Vec<InboundEvent>), TransportError>;
}

/// Outbound rendering sink.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a new message and return its id so it can be edited later.
    async fn send_message(
        &self,
        chat_id: ChatId,
        screen: &Screen,
    ) -> Result<MessageId, TransportError>;

    /// Replace the text and keyboard of an existing message.
    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> Result<(), TransportError>;

    /// Acknowledge a button press, optionally with a popup alert.
    async fn answer_callback(
        &self,
        callback_id: &str,
        alert: Option<&str>,
    ) -> Result<(), TransportError>;
}
