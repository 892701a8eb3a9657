//! Per-chat navigation state.

use std::collections::HashMap;

use tokio::sync::RwLock;
use zonebot_provider::{DnsRecord, RecordType};

use crate::transport::ChatId;

/// What the next free-text message from the operator means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    None,
    /// Next text replaces the current record's content.
    AwaitingEditContent,
    /// Next text is `<name> <content>` for a record of this type.
    AwaitingNewRecord(RecordType),
}

/// Transient state for one chat.
///
/// These fields are the only state carried between transitions; everything
/// else is re-fetched from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub current_zone_id: Option<String>,
    /// Last record-list page shown for the current zone.
    pub current_records_page: u32,
    /// Snapshot of the record on screen, refreshed after every mutation.
    pub current_record: Option<DnsRecord>,
    pub input: InputMode,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_zone_id: None,
            current_records_page: 1,
            current_record: None,
            input: InputMode::None,
        }
    }
}

impl Session {
    pub fn current_record_id(&self) -> Option<&str> {
        self.current_record.as_ref().map(|r| r.id.as_str())
    }

    /// Clear a pending input mode and hand back what it was.
    pub fn take_input(&mut self) -> InputMode {
        std::mem::take(&mut self.input)
    }
}

/// Sessions keyed by chat.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<ChatId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the chat's session; a fresh one on first interaction.
    pub async fn load(&self, chat_id: ChatId) -> Session {
        self.inner
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the chat's session wholesale.
    pub async fn save(&self, chat_id: ChatId, session: Session) {
        self.inner.write().await.insert(chat_id, session);
    }

    /// Chats that have interacted since startup.
    pub async fn chat_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
