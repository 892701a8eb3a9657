//! Menu state machine.
//!
//! [`MenuController::handle`] takes one inbound event to completion: access
//! check, session load, at most a couple of provider calls, one render, session
//! save. Events are handled one at a time, so a session is never touched by two
//! handlers at once.

use std::collections::HashSet;
use std::sync::Arc;

use zonebot_provider::{
    CreateRecordRequest, DnsProvider, DnsRecord, PaginationParams, ProviderError, RecordType,
    UpdateRecordRequest,
};

use crate::callback::{Action, Callback};
use crate::screen::{self, Screen};
use crate::session::{InputMode, Session, SessionStore};
use crate::transport::{
    ChatId, ChatSink, EventKind, InboundEvent, MessageId, TransportError, UserId,
};

/// Knobs fixed at startup.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub admins: HashSet<UserId>,
    pub zones_per_page: u32,
    pub records_per_page: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            admins: HashSet::new(),
            zones_per_page: 25,
            records_per_page: 20,
        }
    }
}

pub struct MenuController {
    provider: Arc<dyn DnsProvider>,
    sessions: SessionStore,
    settings: ControllerSettings,
}

impl MenuController {
    pub fn new(provider: Arc<dyn DnsProvider>, settings: ControllerSettings) -> Self {
        Self {
            provider,
            sessions: SessionStore::new(),
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.settings.admins.contains(&user_id)
    }

    /// Handle one inbound event.
    ///
    /// Provider failures are rendered to the operator; only failures to talk to
    /// the chat itself are returned.
    pub async fn handle(
        &self,
        event: InboundEvent,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        let InboundEvent {
            chat_id,
            sender_id,
            kind,
        } = event;

        if !self.is_admin(sender_id) {
            return Self::reject(chat_id, sender_id, &kind, sink).await;
        }

        match kind {
            EventKind::Command(name) => self.on_command(chat_id, &name, sink).await,
            EventKind::ButtonPress {
                callback_id,
                message_id,
                data,
            } => {
                self.on_button(chat_id, &callback_id, message_id, &data, sink)
                    .await
            }
            EventKind::TextMessage(body) => self.on_text(chat_id, &body, sink).await,
        }
    }

    async fn reject(
        chat_id: ChatId,
        sender_id: UserId,
        kind: &EventKind,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        match kind {
            EventKind::ButtonPress { callback_id, .. } => {
                tracing::warn!(
                    "Rejected button press from non-admin {sender_id} in chat {chat_id}"
                );
                sink.answer_callback(callback_id, Some(screen::ACCESS_DENIED))
                    .await
            }
            EventKind::Command(_) | EventKind::TextMessage(_) => {
                tracing::warn!("Dropped message from non-admin {sender_id} in chat {chat_id}");
                Ok(())
            }
        }
    }

    // ============ 命令 ============

    async fn on_command(
        &self,
        chat_id: ChatId,
        name: &str,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        let screen = match name {
            "start" | "menu" => {
                self.reset_input(chat_id).await;
                screen::home()
            }
            "cancel" => {
                if self.reset_input(chat_id).await == InputMode::None {
                    screen::home()
                } else {
                    screen::home().with_notice("✖ Cancelled.")
                }
            }
            other => {
                tracing::debug!("Ignoring unknown command /{other} in chat {chat_id}");
                return Ok(());
            }
        };

        sink.send_message(chat_id, &screen).await.map(|_| ())
    }

    async fn reset_input(&self, chat_id: ChatId) -> InputMode {
        let mut session = self.sessions.load(chat_id).await;
        let previous = session.take_input();
        self.sessions.save(chat_id, session).await;
        previous
    }

    // ============ 按钮 ============

    async fn on_button(
        &self,
        chat_id: ChatId,
        callback_id: &str,
        message_id: MessageId,
        data: &str,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        // Stop the client's spinner before any slow provider call.
        if let Err(e) = sink.answer_callback(callback_id, None).await {
            tracing::warn!("Failed to answer callback in chat {chat_id}: {e}");
        }

        let mut session = self.sessions.load(chat_id).await;
        let screen = match Callback::decode(data) {
            Ok(Callback::Noop) => return Ok(()),
            Ok(callback) => self.transition(&mut session, callback).await,
            Err(e) => {
                tracing::warn!("Malformed callback {data:?} in chat {chat_id}: {e}");
                session.input = InputMode::None;
                screen::session_expired()
            }
        };
        self.sessions.save(chat_id, session).await;

        sink.edit_message(chat_id, message_id, &screen).await
    }

    async fn transition(&self, session: &mut Session, callback: Callback) -> Screen {
        // Navigating away abandons any pending text input.
        session.input = InputMode::None;

        match callback {
            Callback::Home | Callback::Noop => screen::home(),
            Callback::Zones { page } => self.show_zones(page).await,
            Callback::Records { zone_id, page } => {
                self.show_records(session, zone_id, page).await
            }
            Callback::Record { record_id } => self.show_record(session, &record_id).await,
            Callback::Action { action, target } => self.on_action(session, action, &target).await,
            Callback::PickType {
                record_type,
                zone_id,
            } => {
                if session.current_zone_id.as_deref() != Some(zone_id.as_str()) {
                    return screen::session_expired();
                }
                let prompt = screen::prompt_new_record(
                    &record_type,
                    &zone_id,
                    session.current_records_page,
                );
                session.input = InputMode::AwaitingNewRecord(record_type);
                prompt
            }
        }
    }

    async fn show_zones(&self, page: u32) -> Screen {
        let params = PaginationParams::new(page, self.settings.zones_per_page);
        match self.provider.list_zones(&params).await {
            Ok(zones) => screen::zone_list(&zones),
            Err(e) => screen::error(&e.operator_message(), "🏠 Home", Callback::Home),
        }
    }

    async fn show_records(&self, session: &mut Session, zone_id: String, page: u32) -> Screen {
        let params = PaginationParams::new(page, self.settings.records_per_page);
        match self.provider.list_records(&zone_id, &params).await {
            Ok(records) => {
                let screen = screen::record_list(&zone_id, &records);
                session.current_zone_id = Some(zone_id);
                session.current_records_page = records.info.page;
                session.current_record = None;
                screen
            }
            Err(e) => screen::error(
                &e.operator_message(),
                "⬅ Domains",
                Callback::Zones { page: 1 },
            ),
        }
    }

    async fn show_record(&self, session: &mut Session, record_id: &str) -> Screen {
        let Some(zone_id) = session.current_zone_id.clone() else {
            return screen::session_expired();
        };

        match self.provider.get_record(&zone_id, record_id).await {
            Ok(record) => {
                let screen = screen::record_detail(&record, session.current_records_page);
                session.current_record = Some(record);
                screen
            }
            Err(e) => {
                session.current_record = None;
                Self::record_failure(&e, &zone_id, session.current_records_page)
            }
        }
    }

    fn record_failure(error: &ProviderError, zone_id: &str, records_page: u32) -> Screen {
        let message = if error.is_not_found() {
            "Record not found. It may have been deleted elsewhere.".to_string()
        } else {
            error.operator_message()
        };
        screen::error(
            &message,
            "⬅ Records",
            Callback::Records {
                zone_id: zone_id.to_string(),
                page: records_page,
            },
        )
    }

    // ============ 记录操作 ============

    /// `target` must be what the session currently shows: the open record, or
    /// the open zone for [`Action::NewRecord`]. Buttons on older messages fail
    /// this check and get the session-expired screen.
    async fn on_action(&self, session: &mut Session, action: Action, target: &str) -> Screen {
        let in_view = match action {
            Action::NewRecord => session.current_zone_id.as_deref() == Some(target),
            _ => session.current_record_id() == Some(target),
        };
        if !in_view {
            tracing::debug!("Stale {action:?} for {target}");
            return screen::session_expired();
        }

        match (action, session.current_record.clone()) {
            (Action::NewRecord, _) => screen::type_picker(target, session.current_records_page),
            (_, None) => screen::session_expired(),
            (Action::Edit, Some(record)) => {
                session.input = InputMode::AwaitingEditContent;
                screen::prompt_edit(&record)
            }
            (Action::ToggleProxy, Some(record)) => self.toggle_proxy(session, record).await,
            (Action::Delete, Some(record)) => screen::confirm_delete(&record),
            (Action::ConfirmDelete, Some(record)) => self.delete(session, record).await,
        }
    }

    async fn toggle_proxy(&self, session: &mut Session, record: DnsRecord) -> Screen {
        if !record.proxiable {
            return screen::proxy_rejected(&record);
        }

        let target = !record.proxied;
        let patched = match self
            .provider
            .set_proxied(&record.zone_id, &record.id, target)
            .await
        {
            Ok(patched) => patched,
            Err(e) => {
                return screen::error(
                    &e.operator_message(),
                    "⬅ Back to record",
                    Callback::Record {
                        record_id: record.id,
                    },
                );
            }
        };

        let fresh = match self.provider.get_record(&record.zone_id, &record.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!("Refresh after proxy toggle failed for {}: {e}", record.id);
                patched
            }
        };

        let screen = screen::proxy_toggled(&fresh, session.current_records_page);
        session.current_record = Some(fresh);
        screen
    }

    async fn delete(&self, session: &mut Session, record: DnsRecord) -> Screen {
        match self
            .provider
            .delete_record(&record.zone_id, &record.id)
            .await
        {
            Ok(()) => {
                session.current_record = None;
                screen::deleted(&record, session.current_records_page)
            }
            Err(e) if e.is_not_found() => {
                session.current_record = None;
                Self::record_failure(&e, &record.zone_id, session.current_records_page)
            }
            Err(e) => screen::error(
                &e.operator_message(),
                "⬅ Back to record",
                Callback::Record {
                    record_id: record.id,
                },
            ),
        }
    }

    // ============ 文本输入 ============

    async fn on_text(
        &self,
        chat_id: ChatId,
        body: &str,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        let session = self.sessions.load(chat_id).await;
        match session.input.clone() {
            InputMode::None => {
                tracing::debug!("Ignoring free text in chat {chat_id}");
                Ok(())
            }
            InputMode::AwaitingEditContent => self.apply_edit(chat_id, session, body, sink).await,
            InputMode::AwaitingNewRecord(record_type) => {
                self.apply_create(chat_id, session, record_type, body, sink)
                    .await
            }
        }
    }

    async fn apply_edit(
        &self,
        chat_id: ChatId,
        mut session: Session,
        body: &str,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        let content = body.trim();
        if content.is_empty() {
            return sink
                .send_message(chat_id, &screen::empty_content())
                .await
                .map(|_| ());
        }

        session.take_input();
        let Some(record) = session.current_record.clone() else {
            self.sessions.save(chat_id, session).await;
            return sink
                .send_message(chat_id, &screen::session_expired())
                .await
                .map(|_| ());
        };
        self.sessions.save(chat_id, session.clone()).await;

        let status = sink
            .send_message(chat_id, &screen::pending("Updating..."))
            .await?;

        let request = UpdateRecordRequest::from_snapshot(&record, content);
        let screen = match self
            .provider
            .update_record(&record.zone_id, &record.id, &request)
            .await
        {
            Ok(updated) => {
                let screen = screen::updated(&updated);
                session.current_record = Some(updated);
                self.sessions.save(chat_id, session).await;
                screen
            }
            Err(e) => screen::error(
                &e.operator_message(),
                "⬅ Back to record",
                Callback::Record {
                    record_id: record.id,
                },
            ),
        };

        sink.edit_message(chat_id, status, &screen).await
    }

    async fn apply_create(
        &self,
        chat_id: ChatId,
        mut session: Session,
        record_type: RecordType,
        body: &str,
        sink: &dyn ChatSink,
    ) -> Result<(), TransportError> {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let [name, content] = tokens.as_slice() else {
            return sink
                .send_message(chat_id, &screen::new_record_format(&record_type))
                .await
                .map(|_| ());
        };

        session.take_input();
        let Some(zone_id) = session.current_zone_id.clone() else {
            self.sessions.save(chat_id, session).await;
            return sink
                .send_message(chat_id, &screen::session_expired())
                .await
                .map(|_| ());
        };
        self.sessions.save(chat_id, session.clone()).await;

        let status = sink
            .send_message(chat_id, &screen::pending("Creating..."))
            .await?;

        let request = CreateRecordRequest {
            zone_id: zone_id.clone(),
            record_type,
            name: (*name).to_string(),
            content: (*content).to_string(),
        };
        let screen = match self.provider.create_record(&request).await {
            Ok(created) => {
                let screen = screen::created(&created, session.current_records_page);
                session.current_record = Some(created);
                self.sessions.save(chat_id, session).await;
                screen
            }
            Err(e) => screen::error(
                &e.operator_message(),
                "⬅ Records",
                Callback::Records {
                    zone_id,
                    page: session.current_records_page,
                },
            ),
        };

        sink.edit_message(chat_id, status, &screen).await
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "controller_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;
