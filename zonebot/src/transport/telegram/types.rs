//! Bot API 数据结构
//!
//! Only the fields the console reads or writes are modelled.

use serde::{Deserialize, Serialize};

use crate::screen::Screen;
use crate::transport::{EventKind, InboundEvent};

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Absent for buttons on inline-mode messages, which the console never sends.
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

/// `/cmd@botname args` → `cmd`
fn command_name(text: &str) -> Option<String> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

impl Update {
    /// Convert to an [`InboundEvent`]; `None` for updates the console does not handle.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(query) = self.callback_query {
            let message = query.message?;
            return Some(InboundEvent {
                chat_id: message.chat.id,
                sender_id: query.from.id,
                kind: EventKind::ButtonPress {
                    callback_id: query.id,
                    message_id: message.message_id,
                    data: query.data.unwrap_or_default(),
                },
            });
        }

        let message = self.message?;
        let sender_id = message.from?.id;
        let text = message.text?;
        let kind = match command_name(&text) {
            Some(name) => EventKind::Command(name),
            None => EventKind::TextMessage(text),
        };

        Some(InboundEvent {
            chat_id: message.chat.id,
            sender_id,
            kind,
        })
    }
}

// ============ 请求 ============

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Screen> for InlineKeyboardMarkup {
    fn from(screen: &Screen) -> Self {
        Self {
            inline_keyboard: screen
                .keyboard
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: button.callback.encode(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct EditMessageText<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    pub show_alert: bool,
}

/// `sendMessage` / `editMessageText` reply; only the id is used.
#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

pub fn reply_markup(screen: &Screen) -> Option<InlineKeyboardMarkup> {
    if screen.keyboard.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::from(screen))
    }
}
