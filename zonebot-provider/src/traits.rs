use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateRecordRequest, DnsRecord, Page, PaginationParams, UpdateRecordRequest, Zone,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 为数字字符串）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// Zone ID（用于 `DomainNotFound` 等错误）
    pub zone_id: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            ..Self::default()
        }
    }

    pub fn record(zone_id: &str, record_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            record_id: Some(record_id.to_string()),
            ..Self::default()
        }
    }

    pub fn named(zone_id: &str, record_name: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            record_name: Some(record_name.to_string()),
            ..Self::default()
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS 提供商 Trait
///
/// Every method is a single round trip. Failures come back as
/// [`ProviderError`] values; nothing panics and nothing is retried.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证 API Token 是否有效
    async fn verify_token(&self) -> Result<bool>;

    /// 获取 Zone 列表 (分页)
    async fn list_zones(&self, params: &PaginationParams) -> Result<Page<Zone>>;

    /// 获取 Zone 下的 DNS 记录 (分页)
    async fn list_records(&self, zone_id: &str, params: &PaginationParams)
    -> Result<Page<DnsRecord>>;

    /// 获取单条 DNS 记录
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord>;

    /// 创建 DNS 记录（关闭代理，自动 TTL）
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord>;

    /// 整体替换 DNS 记录
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord>;

    /// 仅修改代理开关
    async fn set_proxied(&self, zone_id: &str, record_id: &str, proxied: bool)
    -> Result<DnsRecord>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
