//! 屏幕渲染
//!
//! Every function here is pure: it turns provider data into the text and
//! inline keyboard of one chat message. Messages are sent as plain text, so
//! nothing needs escaping.

use zonebot_provider::{AUTO_TTL, DnsRecord, Page, PageInfo, RecordType, Zone};

use crate::callback::{Action, Callback};

/// Display strings longer than this are cut and end with an ellipsis.
pub const MAX_LABEL_CHARS: usize = 55;

pub const ACCESS_DENIED: &str = "⛔ Access denied.";

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub callback: Callback,
}

impl Button {
    pub fn new(label: impl Into<String>, callback: Callback) -> Self {
        Self {
            label: label.into(),
            callback,
        }
    }
}

/// Rows of buttons, top to bottom.
pub type Keyboard = Vec<Vec<Button>>;

/// Text plus keyboard of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Screen {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    #[must_use]
    pub fn row(mut self, row: Vec<Button>) -> Self {
        if !row.is_empty() {
            self.keyboard.push(row);
        }
        self
    }

    /// Prefix the text with a status line.
    #[must_use]
    pub fn with_notice(mut self, notice: &str) -> Self {
        self.text = format!("{notice}\n\n{}", self.text);
        self
    }

    /// All buttons, row-major.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.keyboard.iter().flatten()
    }

    pub fn has_callback(&self, callback: &Callback) -> bool {
        self.buttons().any(|b| &b.callback == callback)
    }
}

/// Cut `text` to [`MAX_LABEL_CHARS`] characters, ending in "…" when cut.
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_LABEL_CHARS - 1).collect();
    out.push('…');
    out
}

/// Prev / counter / next. Empty when everything fits on one page.
pub fn pagination_row(info: &PageInfo, to_page: impl Fn(u32) -> Callback) -> Vec<Button> {
    if info.total_pages <= 1 && !info.has_prev() {
        return Vec::new();
    }

    let mut row = Vec::with_capacity(3);
    if info.has_prev() {
        row.push(Button::new("◀ Prev", to_page(info.page - 1)));
    }
    row.push(Button::new(
        format!("{}/{}", info.page, info.total_pages),
        Callback::Noop,
    ));
    if info.has_next() {
        row.push(Button::new("Next ▶", to_page(info.page + 1)));
    }
    row
}

fn home_button() -> Button {
    Button::new("🏠 Home", Callback::Home)
}

fn records_button(zone_id: &str, page: u32) -> Button {
    Button::new(
        "⬅ Records",
        Callback::Records {
            zone_id: zone_id.to_string(),
            page,
        },
    )
}

fn record_button(record_id: &str, label: &str) -> Button {
    Button::new(
        label,
        Callback::Record {
            record_id: record_id.to_string(),
        },
    )
}

fn action_button(label: &str, action: Action, target: &str) -> Button {
    Button::new(
        label,
        Callback::Action {
            action,
            target: target.to_string(),
        },
    )
}

fn ttl_label(ttl: u32) -> String {
    if ttl == AUTO_TTL {
        "Auto".to_string()
    } else {
        format!("{ttl}s")
    }
}

fn proxy_label(record: &DnsRecord) -> &'static str {
    match (record.proxiable, record.proxied) {
        (_, true) => "🟠 on",
        (true, false) => "⚪ off",
        (false, false) => "⚪ off (not proxiable)",
    }
}

/// Short one-line descriptor used for buttons and confirmations.
pub fn record_descriptor(record: &DnsRecord) -> String {
    format!(
        "{} {} → {}",
        record.record_type, record.name, record.content
    )
}

// ============ 导航 ============

pub fn home() -> Screen {
    Screen::new("🛠 DNS console\n\nManage zones and records of your Cloudflare account.")
        .row(vec![Button::new("🌐 Manage domains", Callback::Zones { page: 1 })])
}

pub fn zone_list(page: &Page<Zone>) -> Screen {
    let text = if page.items.is_empty() {
        "🌐 No domains are visible to this API token.".to_string()
    } else {
        format!(
            "🌐 Domains ({} total)\n\nPick a domain to see its records.",
            page.info.total_count
        )
    };

    let mut screen = Screen::new(text);
    for zone in &page.items {
        screen = screen.row(vec![Button::new(
            truncate_label(&zone.name),
            Callback::Records {
                zone_id: zone.id.clone(),
                page: 1,
            },
        )]);
    }
    screen
        .row(pagination_row(&page.info, |p| Callback::Zones { page: p }))
        .row(vec![home_button()])
}

pub fn record_list(zone_id: &str, page: &Page<DnsRecord>) -> Screen {
    let text = if page.items.is_empty() {
        "📋 This domain has no DNS records yet.".to_string()
    } else {
        format!(
            "📋 DNS records ({} total)\n\n🟠 proxied · ⚪ DNS only",
            page.info.total_count
        )
    };

    let mut screen = Screen::new(text);
    for record in &page.items {
        let marker = if record.proxied { "🟠" } else { "⚪" };
        let label = truncate_label(&format!("{marker} {}", record_descriptor(record)));
        screen = screen.row(vec![record_button(&record.id, &label)]);
    }
    screen
        .row(pagination_row(&page.info, |p| Callback::Records {
            zone_id: zone_id.to_string(),
            page: p,
        }))
        .row(vec![action_button("➕ New record", Action::NewRecord, zone_id)])
        .row(vec![
            Button::new("⬅ Domains", Callback::Zones { page: 1 }),
            home_button(),
        ])
}

pub fn record_detail(record: &DnsRecord, records_page: u32) -> Screen {
    let text = format!(
        "📄 {}\n\nType: {}\nName: {}\nContent: {}\nTTL: {}\nProxy: {}",
        truncate_label(&record.name),
        record.record_type,
        record.name,
        record.content,
        ttl_label(record.ttl),
        proxy_label(record),
    );

    let toggle = if record.proxied {
        "⚪ Disable proxy"
    } else {
        "🟠 Enable proxy"
    };

    Screen::new(text)
        .row(vec![
            action_button("✏️ Edit content", Action::Edit, &record.id),
            action_button(toggle, Action::ToggleProxy, &record.id),
        ])
        .row(vec![action_button("🗑 Delete", Action::Delete, &record.id)])
        .row(vec![records_button(&record.zone_id, records_page), home_button()])
}

// ============ 删除 ============

pub fn confirm_delete(record: &DnsRecord) -> Screen {
    Screen::new(format!(
        "⚠️ Delete this record?\n\n{}\n\nThis cannot be undone.",
        record_descriptor(record)
    ))
    .row(vec![
        action_button("✅ Yes, delete", Action::ConfirmDelete, &record.id),
        record_button(&record.id, "✖ Cancel"),
    ])
}

pub fn deleted(record: &DnsRecord, records_page: u32) -> Screen {
    Screen::new(format!("🗑 Deleted {}", record_descriptor(record)))
        .row(vec![records_button(&record.zone_id, records_page), home_button()])
}

// ============ 代理 ============

pub fn proxy_rejected(record: &DnsRecord) -> Screen {
    Screen::new(format!(
        "🚫 Cloudflare cannot proxy {} records like {}.\n\nThe proxy flag was left unchanged.",
        record.record_type,
        truncate_label(&record.name)
    ))
    .row(vec![record_button(&record.id, "⬅ Back to record")])
}

pub fn proxy_toggled(record: &DnsRecord, records_page: u32) -> Screen {
    let notice = if record.proxied {
        "✅ Proxy enabled."
    } else {
        "✅ Proxy disabled."
    };
    record_detail(record, records_page).with_notice(notice)
}

// ============ 编辑 / 新建 ============

pub fn prompt_edit(record: &DnsRecord) -> Screen {
    Screen::new(format!(
        "✏️ Send the new content for {} ({}).\n\nCurrent: {}\n\nSend /cancel to abort.",
        truncate_label(&record.name),
        record.record_type,
        record.content
    ))
    .row(vec![record_button(&record.id, "✖ Cancel")])
}

pub fn empty_content() -> Screen {
    Screen::new("⚠️ Content cannot be empty. Send the new content, or /cancel to abort.")
}

pub fn updated(record: &DnsRecord) -> Screen {
    Screen::new(format!(
        "✅ Updated {}\n\nNew content: {}",
        truncate_label(&record.name),
        record.content
    ))
    .row(vec![record_button(&record.id, "⬅ Back to record")])
}

pub fn type_picker(zone_id: &str, records_page: u32) -> Screen {
    let types = RecordType::CREATABLE
        .iter()
        .map(|t| {
            Button::new(
                t.as_str(),
                Callback::PickType {
                    record_type: t.clone(),
                    zone_id: zone_id.to_string(),
                },
            )
        })
        .collect();

    Screen::new("➕ Which type of record?")
        .row(types)
        .row(vec![records_button(zone_id, records_page)])
}

fn example_for(record_type: &RecordType) -> &'static str {
    match record_type {
        RecordType::Aaaa => "app 2001:db8::10",
        RecordType::Cname => "app target.example.com",
        RecordType::Txt => "_verify some-token-value",
        RecordType::A | RecordType::Other(_) => "app 192.0.2.10",
    }
}

pub fn prompt_new_record(record_type: &RecordType, zone_id: &str, records_page: u32) -> Screen {
    Screen::new(format!(
        "➕ New {record_type} record\n\n\
         Send the name and content separated by a space, e.g.\n{}\n\n\
         The record is created with proxy off and automatic TTL. Send /cancel to abort.",
        example_for(record_type)
    ))
    .row(vec![records_button(zone_id, records_page)])
}

pub fn new_record_format(record_type: &RecordType) -> Screen {
    Screen::new(format!(
        "⚠️ Expected exactly two values: <name> <content>\n\n\
         Example: {}\n\nTry again, or /cancel to abort.",
        example_for(record_type)
    ))
}

pub fn created(record: &DnsRecord, records_page: u32) -> Screen {
    Screen::new(format!("✅ Created {}", record_descriptor(record)))
        .row(vec![record_button(&record.id, "📄 Open record")])
        .row(vec![records_button(&record.zone_id, records_page), home_button()])
}

// ============ 状态 / 错误 ============

pub fn pending(text: &str) -> Screen {
    Screen::new(format!("⏳ {text}"))
}

/// Failure screen with a single recovery button.
pub fn error(message: &str, back_label: &str, back: Callback) -> Screen {
    Screen::new(format!("❌ {message}")).row(vec![Button::new(back_label, back)])
}

pub fn session_expired() -> Screen {
    Screen::new("⌛ This menu is out of date. Start again from the home screen.")
        .row(vec![home_button()])
}
