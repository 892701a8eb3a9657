use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use zonebot_provider::{
    AUTO_TTL, CreateRecordRequest, DnsProvider, DnsRecord, Page, PageInfo, PaginationParams,
    ProviderError, RecordType, UpdateRecordRequest, Zone,
};

use crate::screen::Screen;
use crate::transport::{ChatId, ChatSink, MessageId, TransportError};

pub const ZONE_ID: &str = "zone-1";

pub fn test_record(id: &str, record_type: RecordType, name: &str, content: &str) -> DnsRecord {
    let proxiable = matches!(
        record_type,
        RecordType::A | RecordType::Aaaa | RecordType::Cname
    );
    DnsRecord {
        id: id.to_string(),
        zone_id: ZONE_ID.to_string(),
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        proxied: false,
        proxiable,
        ttl: AUTO_TTL,
    }
}

fn paginate<T: Clone>(items: &[T], params: &PaginationParams) -> Page<T> {
    let per_page = params.per_page as usize;
    let total_pages = items.len().div_ceil(per_page).max(1);
    let start = (params.page as usize - 1) * per_page;
    let page_items = items.iter().skip(start).take(per_page).cloned().collect();

    Page {
        items: page_items,
        info: PageInfo {
            page: params.page,
            per_page: params.per_page,
            total_pages: u32::try_from(total_pages).unwrap(),
            total_count: u32::try_from(items.len()).unwrap(),
        },
    }
}

#[derive(Default)]
struct MockState {
    zones: Vec<Zone>,
    records: Vec<DnsRecord>,
    calls: Vec<String>,
    failures: HashMap<&'static str, ProviderError>,
    last_update: Option<UpdateRecordRequest>,
    last_create: Option<CreateRecordRequest>,
    next_id: u32,
}

/// In-memory provider that records every call.
#[derive(Default)]
pub struct MockDnsProvider {
    state: Mutex<MockState>,
}

impl MockDnsProvider {
    /// One zone ([`ZONE_ID`]) with the given records, plus `extra_zones` filler zones.
    pub fn with_records(records: Vec<DnsRecord>, extra_zones: usize) -> Self {
        let mut zones = vec![Zone {
            id: ZONE_ID.to_string(),
            name: "example.com".to_string(),
        }];
        zones.extend((0..extra_zones).map(|i| Zone {
            id: format!("zone-extra-{i}"),
            name: format!("example{i}.org"),
        }));

        Self {
            state: Mutex::new(MockState {
                zones,
                records,
                ..MockState::default()
            }),
        }
    }

    /// Make every later call of `operation` fail with `error`.
    pub async fn fail(&self, operation: &'static str, error: ProviderError) {
        self.state.lock().await.failures.insert(operation, error);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    pub async fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| !c.starts_with("list_") && !c.starts_with("get_"))
            .collect()
    }

    pub async fn last_update(&self) -> Option<UpdateRecordRequest> {
        self.state.lock().await.last_update.clone()
    }

    pub async fn last_create(&self) -> Option<CreateRecordRequest> {
        self.state.lock().await.last_create.clone()
    }

    pub async fn stored(&self, record_id: &str) -> Option<DnsRecord> {
        self.state
            .lock()
            .await
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    /// Change a record behind the controller's back.
    pub async fn set_content(&self, record_id: &str, content: &str) {
        let mut state = self.state.lock().await;
        if let Some(record) = state.records.iter_mut().find(|r| r.id == record_id) {
            record.content = content.to_string();
        }
    }

    async fn enter(&self, operation: &'static str, detail: &str) -> Result<(), ProviderError> {
        let mut state = self.state.lock().await;
        state.calls.push(format!("{operation}:{detail}"));
        match state.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(record_id: &str) -> ProviderError {
    ProviderError::RecordNotFound {
        provider: "mock".to_string(),
        record_id: record_id.to_string(),
        raw_message: Some("Record does not exist.".to_string()),
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn verify_token(&self) -> zonebot_provider::Result<bool> {
        self.enter("verify_token", "").await?;
        Ok(true)
    }

    async fn list_zones(&self, params: &PaginationParams) -> zonebot_provider::Result<Page<Zone>> {
        self.enter("list_zones", &params.page.to_string()).await?;
        let state = self.state.lock().await;
        Ok(paginate(&state.zones, params))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> zonebot_provider::Result<Page<DnsRecord>> {
        self.enter("list_records", &format!("{zone_id}:{}", params.page))
            .await?;
        let state = self.state.lock().await;
        if !state.zones.iter().any(|z| z.id == zone_id) {
            return Err(ProviderError::DomainNotFound {
                provider: "mock".to_string(),
                domain: zone_id.to_string(),
                raw_message: None,
            });
        }
        let records: Vec<DnsRecord> = state
            .records
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect();
        Ok(paginate(&records, params))
    }

    async fn get_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> zonebot_provider::Result<DnsRecord> {
        self.enter("get_record", record_id).await?;
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
            .cloned()
            .ok_or_else(|| not_found(record_id))
    }

    async fn create_record(
        &self,
        req: &CreateRecordRequest,
    ) -> zonebot_provider::Result<DnsRecord> {
        self.enter("create_record", &req.name).await?;
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let mut record = test_record(
            &format!("rec-new-{}", state.next_id),
            req.record_type.clone(),
            &req.name,
            &req.content,
        );
        record.zone_id.clone_from(&req.zone_id);
        state.records.push(record.clone());
        state.last_create = Some(req.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> zonebot_provider::Result<DnsRecord> {
        self.enter("update_record", record_id).await?;
        let mut state = self.state.lock().await;
        state.last_update = Some(req.clone());
        let record = state
            .records
            .iter_mut()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
            .ok_or_else(|| not_found(record_id))?;
        record.record_type = req.record_type.clone();
        record.name.clone_from(&req.name);
        record.content.clone_from(&req.content);
        record.ttl = req.ttl;
        record.proxied = req.proxied;
        Ok(record.clone())
    }

    async fn set_proxied(
        &self,
        zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> zonebot_provider::Result<DnsRecord> {
        self.enter("set_proxied", &format!("{record_id}:{proxied}"))
            .await?;
        let mut state = self.state.lock().await;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
            .ok_or_else(|| not_found(record_id))?;
        record.proxied = proxied;
        Ok(record.clone())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> zonebot_provider::Result<()> {
        self.enter("delete_record", record_id).await?;
        let mut state = self.state.lock().await;
        let before = state.records.len();
        state
            .records
            .retain(|r| !(r.zone_id == zone_id && r.id == record_id));
        if state.records.len() == before {
            return Err(not_found(record_id));
        }
        Ok(())
    }
}

/// Everything the controller pushed to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        chat_id: ChatId,
        message_id: MessageId,
        screen: Screen,
    },
    Edit {
        chat_id: ChatId,
        message_id: MessageId,
        screen: Screen,
    },
    Answer {
        callback_id: String,
        alert: Option<String>,
    },
}

pub struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
    next_message_id: AtomicI64,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            next_message_id: AtomicI64::new(100),
        }
    }
}

impl RecordingSink {
    pub async fn sent(&self) -> Vec<Sent> {
        self.sent.lock().await.clone()
    }

    /// Screen of the most recent send or edit.
    pub async fn last_screen(&self) -> Screen {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|s| match s {
                Sent::Message { screen, .. } | Sent::Edit { screen, .. } => Some(screen.clone()),
                Sent::Answer { .. } => None,
            })
            .unwrap()
    }

    pub async fn renders(&self) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|s| !matches!(s, Sent::Answer { .. }))
            .count()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send_message(
        &self,
        chat_id: ChatId,
        screen: &Screen,
    ) -> Result<MessageId, TransportError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().await.push(Sent::Message {
            chat_id,
            message_id,
            screen: screen.clone(),
        });
        Ok(message_id)
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> Result<(), TransportError> {
        self.sent.lock().await.push(Sent::Edit {
            chat_id,
            message_id,
            screen: screen.clone(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        alert: Option<&str>,
    ) -> Result<(), TransportError> {
        self.sent.lock().await.push(Sent::Answer {
            callback_id: callback_id.to_string(),
            alert: alert.map(str::to_string),
        });
        Ok(())
    }
}
