//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use zonebot_provider::{
    CloudflareProvider, CreateRecordRequest, DnsProvider, DnsRecord, PaginationParams, RecordType,
};

/// 构造测试上下文；缺少 `CLOUDFLARE_API_TOKEN` / `TEST_DOMAIN` 时直接跳过测试。
#[macro_export]
macro_rules! live_context {
    () => {
        match $crate::common::TestContext::cloudflare() {
            Some(ctx) => ctx,
            None => {
                eprintln!("跳过测试: 需要 CLOUDFLARE_API_TOKEN 与 TEST_DOMAIN");
                return;
            }
        }
    };
}

/// 解包 `Ok`，否则以 `Err` 内容让测试失败。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(, $msg:literal)? $(,)?) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                panic!("{}: {e:?}", concat!("require_ok" $(, " / ", $msg)?));
            }
        }
    };
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
    pub zone_id: Option<String>,
}

impl TestContext {
    /// 环境变量齐全时返回上下文
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = CloudflareProvider::new(api_token).ok()?;

        Some(Self {
            provider: Arc::new(provider),
            domain,
            zone_id: None,
        })
    }

    /// 查找测试域名的 `zone_id`（逐页查找）
    pub async fn find_zone_id(&mut self) -> Option<String> {
        if self.zone_id.is_some() {
            return self.zone_id.clone();
        }

        let mut page = 1;
        loop {
            let response = self
                .provider
                .list_zones(&PaginationParams::new(page, 50))
                .await
                .ok()?;

            if let Some(zone) = response.items.iter().find(|z| z.name == self.domain) {
                self.zone_id = Some(zone.id.clone());
                return self.zone_id.clone();
            }
            if !response.info.has_next() {
                return None;
            }
            page += 1;
        }
    }

    /// 创建测试 TXT 记录并返回创建的记录
    pub async fn create_test_record(&self, zone_id: &str) -> Option<DnsRecord> {
        let request = CreateRecordRequest {
            zone_id: zone_id.to_string(),
            record_type: RecordType::Txt,
            name: generate_test_record_name(),
            content: "integration-test".to_string(),
        };

        self.provider.create_record(&request).await.ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, zone_id: &str, record_id: &str) {
        let _ = self.provider.delete_record(zone_id, record_id).await;
    }
}
