use super::test_mocks::*;
use super::*;

const ADMIN: UserId = 7;
const CHAT: ChatId = 7;
const STRANGER: UserId = 99;
const MENU_MESSAGE: MessageId = 1;

fn fixture_records() -> Vec<DnsRecord> {
    vec![
        test_record("rec-a", RecordType::A, "www.example.com", "192.0.2.1"),
        test_record(
            "rec-txt",
            RecordType::Txt,
            "_dmarc.example.com",
            "v=DMARC1; p=none",
        ),
    ]
}

fn setup(extra_zones: usize) -> (Arc<MockDnsProvider>, MenuController, RecordingSink) {
    let provider = Arc::new(MockDnsProvider::with_records(fixture_records(), extra_zones));
    let controller = MenuController::new(
        provider.clone(),
        ControllerSettings {
            admins: HashSet::from([ADMIN]),
            ..ControllerSettings::default()
        },
    );
    (provider, controller, RecordingSink::default())
}

fn press_as(sender_id: UserId, data: &str) -> InboundEvent {
    InboundEvent {
        chat_id: CHAT,
        sender_id,
        kind: EventKind::ButtonPress {
            callback_id: format!("cb-{data}"),
            message_id: MENU_MESSAGE,
            data: data.to_string(),
        },
    }
}

fn press(data: &str) -> InboundEvent {
    press_as(ADMIN, data)
}

fn text(body: &str) -> InboundEvent {
    InboundEvent {
        chat_id: CHAT,
        sender_id: ADMIN,
        kind: EventKind::TextMessage(body.to_string()),
    }
}

fn command(name: &str) -> InboundEvent {
    InboundEvent {
        chat_id: CHAT,
        sender_id: ADMIN,
        kind: EventKind::Command(name.to_string()),
    }
}

async fn run(controller: &MenuController, sink: &RecordingSink, events: Vec<InboundEvent>) {
    for event in events {
        controller.handle(event, sink).await.unwrap();
    }
}

/// Walk to the detail screen of `record_id` in [`ZONE_ID`].
async fn open_record(controller: &MenuController, sink: &RecordingSink, record_id: &str) {
    run(
        controller,
        sink,
        vec![
            press(&format!("recs:{ZONE_ID}:1")),
            press(&format!("rec:{record_id}")),
        ],
    )
    .await;
}

// ============ 导航 ============

#[tokio::test]
async fn start_then_manage_domains_lists_first_page() {
    let (_provider, controller, sink) = setup(30);

    run(&controller, &sink, vec![command("start")]).await;
    let home = sink.last_screen().await;
    assert_eq!(home.buttons().count(), 1);
    assert!(matches!(sink.sent().await[0], Sent::Message { chat_id: CHAT, .. }));

    run(&controller, &sink, vec![press("zones:1")]).await;
    let zones = sink.last_screen().await;

    let zone_buttons = zones
        .buttons()
        .filter(|b| matches!(b.callback, Callback::Records { .. }))
        .count();
    assert_eq!(zone_buttons, 25);
    assert!(zones.has_callback(&Callback::Zones { page: 2 }));
    assert!(!zones.buttons().any(|b| b.label == "◀ Prev"));

    let sent = sink.sent().await;
    assert!(matches!(
        sent.last(),
        Some(Sent::Edit {
            message_id: MENU_MESSAGE,
            ..
        })
    ));
}

#[tokio::test]
async fn last_zone_page_offers_no_next() {
    let (provider, controller, sink) = setup(30);

    run(&controller, &sink, vec![press("zones:2")]).await;
    let zones = sink.last_screen().await;

    assert!(zones.has_callback(&Callback::Zones { page: 1 }));
    assert!(!zones.has_callback(&Callback::Zones { page: 3 }));
    assert!(!zones.buttons().any(|b| b.label == "Next ▶"));
    assert_eq!(provider.calls().await, vec!["list_zones:2"]);
}

#[tokio::test]
async fn selecting_zone_remembers_it() {
    let (_provider, controller, sink) = setup(0);

    run(&controller, &sink, vec![press(&format!("recs:{ZONE_ID}:1"))]).await;

    let session = controller.sessions().load(CHAT).await;
    assert_eq!(session.current_zone_id.as_deref(), Some(ZONE_ID));
    assert_eq!(session.current_records_page, 1);
    let screen = sink.last_screen().await;
    assert!(screen.has_callback(&Callback::Record {
        record_id: "rec-a".to_string()
    }));
    assert!(screen.has_callback(&Callback::Action {
        action: Action::NewRecord,
        target: ZONE_ID.to_string()
    }));
}

#[tokio::test]
async fn every_press_is_answered() {
    let (_provider, controller, sink) = setup(0);

    run(
        &controller,
        &sink,
        vec![press("zones:1"), press("noop"), press("home")],
    )
    .await;

    let answers = sink
        .sent()
        .await
        .into_iter()
        .filter(|s| matches!(s, Sent::Answer { alert: None, .. }))
        .count();
    assert_eq!(answers, 3);
    // noop only answers
    assert_eq!(sink.renders().await, 2);
}

#[tokio::test]
async fn malformed_callback_renders_recovery_without_provider_calls() {
    let (provider, controller, sink) = setup(0);

    run(&controller, &sink, vec![press("recs::0:extra"), press("")]).await;

    assert!(provider.calls().await.is_empty());
    assert!(sink.last_screen().await.has_callback(&Callback::Home));
}

#[tokio::test]
async fn actions_without_session_state_render_expired() {
    let (provider, controller, sink) = setup(0);

    for data in [
        "act:edit:rec-a",
        "act:proxy:rec-a",
        "act:del:rec-a",
        "act:delok:rec-a",
        "act:new:zone-1",
        "type:A:zone-1",
    ] {
        sink.clear().await;
        run(&controller, &sink, vec![press(data)]).await;
        let screen = sink.last_screen().await;
        assert!(screen.text.starts_with('⌛'), "{data}: {}", screen.text);
    }
    assert!(provider.calls().await.is_empty());
    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
}

#[tokio::test]
async fn provider_errors_are_shown_verbatim() {
    let (provider, controller, sink) = setup(0);
    provider
        .fail(
            "list_zones",
            ProviderError::Unknown {
                provider: "cloudflare".to_string(),
                raw_code: Some("10000".to_string()),
                raw_message: "Authentication error".to_string(),
            },
        )
        .await;

    run(&controller, &sink, vec![press("zones:1")]).await;

    let screen = sink.last_screen().await;
    assert!(screen.text.contains("Authentication error"));
    assert!(screen.has_callback(&Callback::Home));
}

// ============ 访问控制 ============

#[tokio::test]
async fn non_admin_press_gets_alert_only() {
    let (provider, controller, sink) = setup(0);

    for data in ["zones:1", "act:delok:rec-a", "home"] {
        run(&controller, &sink, vec![press_as(STRANGER, data)]).await;
    }

    let sent = sink.sent().await;
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|s| matches!(
        s,
        Sent::Answer { alert: Some(alert), .. } if alert == screen::ACCESS_DENIED
    )));
    assert!(provider.calls().await.is_empty());
    assert_eq!(controller.sessions().chat_count().await, 0);
}

#[tokio::test]
async fn non_admin_text_and_commands_are_dropped() {
    let (provider, controller, sink) = setup(0);

    let events = vec![
        InboundEvent {
            chat_id: CHAT,
            sender_id: STRANGER,
            kind: EventKind::Command("start".to_string()),
        },
        InboundEvent {
            chat_id: CHAT,
            sender_id: STRANGER,
            kind: EventKind::TextMessage("app 192.0.2.1".to_string()),
        },
    ];
    run(&controller, &sink, events).await;

    assert!(sink.sent().await.is_empty());
    assert!(provider.calls().await.is_empty());
}

// ============ 记录详情 ============

#[tokio::test]
async fn record_detail_is_refetched_every_time() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;
    assert!(sink.last_screen().await.text.contains("192.0.2.1"));

    provider.set_content("rec-a", "192.0.2.99").await;
    run(&controller, &sink, vec![press("rec:rec-a")]).await;

    assert!(sink.last_screen().await.text.contains("192.0.2.99"));
    let snapshot = controller.sessions().load(CHAT).await.current_record.unwrap();
    assert_eq!(snapshot.content, "192.0.2.99");
}

#[tokio::test]
async fn toggle_on_unproxiable_record_never_calls_provider() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-txt").await;

    run(&controller, &sink, vec![press("act:proxy:rec-txt")]).await;

    assert!(provider.mutating_calls().await.is_empty());
    let screen = sink.last_screen().await;
    assert!(screen.text.starts_with("🚫"));
    assert!(screen.has_callback(&Callback::Record {
        record_id: "rec-txt".to_string()
    }));
}

#[tokio::test]
async fn toggle_inverts_flag_and_refreshes_snapshot() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:proxy:rec-a")]).await;

    let calls = provider.calls().await;
    let toggle = calls.iter().position(|c| c == "set_proxied:rec-a:true");
    assert!(toggle.is_some(), "{calls:?}");
    assert_eq!(calls.last().map(String::as_str), Some("get_record:rec-a"));

    let snapshot = controller.sessions().load(CHAT).await.current_record.unwrap();
    assert!(snapshot.proxied);
    let screen = sink.last_screen().await;
    assert!(screen.text.starts_with("✅ Proxy enabled."));
    assert!(screen.text.contains("Proxy: 🟠 on"));

    run(&controller, &sink, vec![press("act:proxy:rec-a")]).await;
    assert!(provider
        .calls()
        .await
        .contains(&"set_proxied:rec-a:false".to_string()));
    assert!(!provider.stored("rec-a").await.unwrap().proxied);
}

#[tokio::test]
async fn toggle_failure_keeps_snapshot() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;
    provider
        .fail(
            "set_proxied",
            ProviderError::NetworkError {
                provider: "cloudflare".to_string(),
                detail: "connection reset by peer".to_string(),
            },
        )
        .await;

    run(&controller, &sink, vec![press("act:proxy:rec-a")]).await;

    let screen = sink.last_screen().await;
    assert!(screen.text.contains("connection reset by peer"));
    let snapshot = controller.sessions().load(CHAT).await.current_record.unwrap();
    assert!(!snapshot.proxied);
}

// ============ 编辑 ============

#[tokio::test]
async fn edit_content_sends_full_replace() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:edit:rec-a")]).await;
    assert_eq!(
        controller.sessions().load(CHAT).await.input,
        InputMode::AwaitingEditContent
    );

    sink.clear().await;
    run(&controller, &sink, vec![text("198.51.100.7")]).await;

    let update = provider.last_update().await.unwrap();
    assert_eq!(update.record_type, RecordType::A);
    assert_eq!(update.name, "www.example.com");
    assert_eq!(update.content, "198.51.100.7");
    assert_eq!(update.ttl, 1);
    assert!(!update.proxied);

    let sent = sink.sent().await;
    assert_eq!(sent.len(), 2);
    let Sent::Message {
        message_id: status,
        screen: pending,
        ..
    } = &sent[0]
    else {
        panic!("expected status message, got {:?}", sent[0]);
    };
    assert_eq!(pending.text, "⏳ Updating...");
    let Sent::Edit {
        message_id, screen, ..
    } = &sent[1]
    else {
        panic!("expected edit, got {:?}", sent[1]);
    };
    assert_eq!(message_id, status);
    assert!(screen.text.contains("198.51.100.7"));

    let session = controller.sessions().load(CHAT).await;
    assert_eq!(session.input, InputMode::None);
    assert_eq!(session.current_record.unwrap().content, "198.51.100.7");
}

#[tokio::test]
async fn edit_preserves_proxied_and_custom_ttl() {
    let mut record = test_record("rec-p", RecordType::Cname, "cdn.example.com", "a.example.net");
    record.proxied = true;
    record.ttl = 300;
    let provider = Arc::new(MockDnsProvider::with_records(vec![record], 0));
    let controller = MenuController::new(
        provider.clone(),
        ControllerSettings {
            admins: HashSet::from([ADMIN]),
            ..ControllerSettings::default()
        },
    );
    let sink = RecordingSink::default();
    open_record(&controller, &sink, "rec-p").await;

    run(
        &controller,
        &sink,
        vec![press("act:edit:rec-p"), text("  b.example.net  ")],
    )
    .await;

    let update = provider.last_update().await.unwrap();
    assert_eq!(update.record_type, RecordType::Cname);
    assert_eq!(update.content, "b.example.net");
    assert_eq!(update.ttl, 300);
    assert!(update.proxied);
}

#[tokio::test]
async fn empty_edit_is_rejected_and_mode_kept() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;
    run(&controller, &sink, vec![press("act:edit:rec-a"), text("   ")]).await;

    assert!(provider.mutating_calls().await.is_empty());
    assert_eq!(
        controller.sessions().load(CHAT).await.input,
        InputMode::AwaitingEditContent
    );
    assert!(sink.last_screen().await.text.starts_with("⚠️"));
}

#[tokio::test]
async fn failed_edit_still_resets_mode() {
    let (provider, controller, sink) = setup(0);
    provider
        .fail(
            "update_record",
            ProviderError::InvalidParameter {
                provider: "cloudflare".to_string(),
                param: "content".to_string(),
                detail: "Content for A record is invalid. Must be a valid IPv4 address".to_string(),
            },
        )
        .await;
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:edit:rec-a"), text("not-an-ip")]).await;

    let screen = sink.last_screen().await;
    assert!(screen.text.contains("Must be a valid IPv4 address"));
    assert!(screen.has_callback(&Callback::Record {
        record_id: "rec-a".to_string()
    }));
    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    assert_eq!(provider.stored("rec-a").await.unwrap().content, "192.0.2.1");
}

#[tokio::test]
async fn navigation_abandons_pending_input() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(
        &controller,
        &sink,
        vec![press("act:edit:rec-a"), press("home"), text("198.51.100.7")],
    )
    .await;

    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    assert!(provider.last_update().await.is_none());
}

#[tokio::test]
async fn cancel_command_resets_input() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:edit:rec-a"), command("cancel")]).await;

    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    let screen = sink.last_screen().await;
    assert!(screen.text.starts_with("✖ Cancelled."));
    assert!(provider.mutating_calls().await.is_empty());
}

#[tokio::test]
async fn free_text_without_pending_mode_is_ignored() {
    let (provider, controller, sink) = setup(0);

    run(&controller, &sink, vec![text("hello there")]).await;

    assert!(sink.sent().await.is_empty());
    assert!(provider.calls().await.is_empty());
}

// ============ 新建 ============

#[tokio::test]
async fn create_cname_record() {
    let (provider, controller, sink) = setup(0);

    run(
        &controller,
        &sink,
        vec![press(&format!("recs:{ZONE_ID}:1")), press(&format!("act:new:{ZONE_ID}"))],
    )
    .await;
    let picker = sink.last_screen().await;
    assert!(picker.has_callback(&Callback::PickType {
        record_type: RecordType::Cname,
        zone_id: ZONE_ID.to_string()
    }));

    run(&controller, &sink, vec![press(&format!("type:CNAME:{ZONE_ID}"))]).await;
    assert_eq!(
        controller.sessions().load(CHAT).await.input,
        InputMode::AwaitingNewRecord(RecordType::Cname)
    );

    run(&controller, &sink, vec![text("app target.example.com")]).await;

    let request = provider.last_create().await.unwrap();
    assert_eq!(request.zone_id, ZONE_ID);
    assert_eq!(request.record_type, RecordType::Cname);
    assert_eq!(request.name, "app");
    assert_eq!(request.content, "target.example.com");

    let created = provider.stored("rec-new-1").await.unwrap();
    assert!(!created.proxied);
    assert_eq!(created.ttl, 1);

    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    let screen = sink.last_screen().await;
    assert!(screen.text.contains("CNAME app → target.example.com"));
    assert!(screen.has_callback(&Callback::Records {
        zone_id: ZONE_ID.to_string(),
        page: 1
    }));
}

#[tokio::test]
async fn malformed_new_record_input_keeps_mode() {
    let (provider, controller, sink) = setup(0);
    run(
        &controller,
        &sink,
        vec![press(&format!("recs:{ZONE_ID}:1")), press(&format!("type:A:{ZONE_ID}"))],
    )
    .await;

    for body in ["just-one-token", "too many tokens here", ""] {
        run(&controller, &sink, vec![text(body)]).await;
        assert_eq!(
            controller.sessions().load(CHAT).await.input,
            InputMode::AwaitingNewRecord(RecordType::A),
            "input {body:?}"
        );
        assert!(sink.last_screen().await.text.contains("app 192.0.2.10"));
    }
    assert!(provider.last_create().await.is_none());
    assert!(!provider
        .calls()
        .await
        .iter()
        .any(|c| c.starts_with("create_record")));
}

#[tokio::test]
async fn failed_create_resets_mode() {
    let (provider, controller, sink) = setup(0);
    provider
        .fail(
            "create_record",
            ProviderError::RecordExists {
                provider: "cloudflare".to_string(),
                record_name: "www".to_string(),
                raw_message: Some("An identical record already exists.".to_string()),
            },
        )
        .await;
    run(
        &controller,
        &sink,
        vec![
            press(&format!("recs:{ZONE_ID}:1")),
            press(&format!("type:A:{ZONE_ID}")),
            text("www 192.0.2.1"),
        ],
    )
    .await;

    let screen = sink.last_screen().await;
    assert!(screen.text.contains("An identical record already exists."));
    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
}

// ============ 删除 ============

#[tokio::test]
async fn delete_then_reopen_yields_not_found() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:del:rec-a")]).await;
    assert!(sink.last_screen().await.has_callback(&Callback::Action {
        action: Action::ConfirmDelete,
        target: "rec-a".to_string()
    }));

    run(&controller, &sink, vec![press("act:delok:rec-a")]).await;
    assert!(sink.last_screen().await.text.starts_with("🗑 Deleted"));
    assert!(provider.stored("rec-a").await.is_none());

    run(&controller, &sink, vec![press("rec:rec-a")]).await;
    let screen = sink.last_screen().await;
    assert!(screen.text.contains("Record not found"));
    assert!(screen.has_callback(&Callback::Records {
        zone_id: ZONE_ID.to_string(),
        page: 1
    }));
    assert!(controller.sessions().load(CHAT).await.current_record.is_none());
}

#[tokio::test]
async fn cancel_delete_returns_to_detail() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:del:rec-a"), press("rec:rec-a")]).await;

    assert!(provider.mutating_calls().await.is_empty());
    assert!(sink.last_screen().await.text.contains("Content: 192.0.2.1"));
}

#[tokio::test]
async fn failed_delete_leaves_record_in_place() {
    let (provider, controller, sink) = setup(0);
    provider
        .fail(
            "delete_record",
            ProviderError::Timeout {
                provider: "cloudflare".to_string(),
                detail: "operation timed out".to_string(),
            },
        )
        .await;
    open_record(&controller, &sink, "rec-a").await;

    run(&controller, &sink, vec![press("act:del:rec-a"), press("act:delok:rec-a")]).await;

    let screen = sink.last_screen().await;
    assert!(screen.text.contains("operation timed out"));
    assert!(screen.has_callback(&Callback::Record {
        record_id: "rec-a".to_string()
    }));
    assert!(provider.stored("rec-a").await.is_some());
    assert!(controller.sessions().load(CHAT).await.current_record.is_some());
}

#[tokio::test]
async fn stale_confirm_from_older_message_deletes_nothing() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-a").await;
    run(&controller, &sink, vec![press("act:del:rec-a")]).await;

    // A second menu opens another record; the first confirm is still on screen.
    run(&controller, &sink, vec![press("rec:rec-txt")]).await;
    run(&controller, &sink, vec![press("act:delok:rec-a")]).await;

    assert!(sink.last_screen().await.text.starts_with('⌛'));
    assert!(provider.mutating_calls().await.is_empty());
    assert!(provider.stored("rec-a").await.is_some());
    assert!(provider.stored("rec-txt").await.is_some());

    run(&controller, &sink, vec![press("act:delok:rec-txt")]).await;
    assert_eq!(
        provider.mutating_calls().await,
        vec!["delete_record:rec-txt".to_string()]
    );
    assert!(provider.stored("rec-a").await.is_some());
}

#[tokio::test]
async fn stale_record_actions_are_refused() {
    let (provider, controller, sink) = setup(0);
    open_record(&controller, &sink, "rec-txt").await;

    for data in ["act:edit:rec-a", "act:proxy:rec-a", "act:del:rec-a"] {
        run(&controller, &sink, vec![press(data)]).await;
        assert!(sink.last_screen().await.text.starts_with('⌛'), "{data}");
    }
    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    assert!(provider.mutating_calls().await.is_empty());
}

#[tokio::test]
async fn new_record_buttons_from_another_zone_are_refused() {
    let (provider, controller, sink) = setup(1);
    run(&controller, &sink, vec![press("recs:zone-extra-0:1")]).await;

    run(
        &controller,
        &sink,
        vec![
            press(&format!("act:new:{ZONE_ID}")),
            press(&format!("type:A:{ZONE_ID}")),
        ],
    )
    .await;

    assert!(sink.last_screen().await.text.starts_with('⌛'));
    assert_eq!(controller.sessions().load(CHAT).await.input, InputMode::None);
    run(&controller, &sink, vec![text("www 192.0.2.1")]).await;
    assert!(provider.last_create().await.is_none());
}

// ============ 记录分页 ============

#[tokio::test]
async fn record_list_paging_is_carried_through_detail_and_delete() {
    let mut records: Vec<DnsRecord> = (0..24)
        .map(|i| {
            let name = format!("h{i}.example.com");
            test_record(&format!("rec-{i}"), RecordType::A, &name, "192.0.2.1")
        })
        .collect();
    let long_name = format!("{}.example.com", "very-long-label-".repeat(5));
    records.push(test_record("rec-long", RecordType::Txt, &long_name, "v=spf1 -all"));
    let provider = Arc::new(MockDnsProvider::with_records(records, 0));
    let controller = MenuController::new(
        provider.clone(),
        ControllerSettings {
            admins: HashSet::from([ADMIN]),
            ..ControllerSettings::default()
        },
    );
    let sink = RecordingSink::default();

    run(&controller, &sink, vec![press(&format!("recs:{ZONE_ID}:1"))]).await;
    assert!(sink.last_screen().await.has_callback(&Callback::Records {
        zone_id: ZONE_ID.to_string(),
        page: 2
    }));

    run(&controller, &sink, vec![press(&format!("recs:{ZONE_ID}:2"))]).await;
    let screen = sink.last_screen().await;
    assert_eq!(controller.sessions().load(CHAT).await.current_records_page, 2);
    assert!(screen.has_callback(&Callback::Records {
        zone_id: ZONE_ID.to_string(),
        page: 1
    }));
    assert!(!screen.buttons().any(|b| b.label.starts_with("Next")));
    let long_button = screen
        .buttons()
        .find(|b| {
            b.callback
                == Callback::Record {
                    record_id: "rec-long".to_string(),
                }
        })
        .unwrap();
    assert!(long_button.label.ends_with('…'), "{}", long_button.label);
    assert!(long_button.label.chars().count() <= screen::MAX_LABEL_CHARS);

    let back_to_page_two = Callback::Records {
        zone_id: ZONE_ID.to_string(),
        page: 2,
    };
    run(&controller, &sink, vec![press("rec:rec-long")]).await;
    assert!(sink.last_screen().await.has_callback(&back_to_page_two));

    run(
        &controller,
        &sink,
        vec![press("act:del:rec-long"), press("act:delok:rec-long")],
    )
    .await;
    let screen = sink.last_screen().await;
    assert!(screen.text.starts_with("🗑 Deleted"));
    assert!(screen.has_callback(&back_to_page_two));
    assert!(provider.stored("rec-long").await.is_none());
}
