use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ 分页相关类型 ============

/// 分页请求参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    /// 页码（从 1 开始）
    pub page: u32,
    /// 每页数量
    pub per_page: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

/// Page cursor as reported by the provider's `result_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    /// Never zero: an empty listing still has one (empty) page.
    pub total_pages: u32,
    pub total_count: u32,
}

impl PageInfo {
    /// Single-page info, used when the provider omits `result_info`.
    pub fn single(item_count: usize) -> Self {
        let count = u32::try_from(item_count).unwrap_or(u32::MAX);
        Self {
            page: 1,
            per_page: count.max(1),
            total_pages: 1,
            total_count: count,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 分页响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

// ============ 域名 / 记录 ============

/// A DNS zone (domain) managed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque provider identifier.
    pub id: String,
    pub name: String,
}

/// DNS 记录类型
///
/// Only the first four variants can be created from the console. Anything
/// else the provider returns is kept as [`RecordType::Other`] so listings of
/// zones with MX/NS/SRV records still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Other(String),
}

impl RecordType {
    /// Types offered by the new-record picker.
    pub const CREATABLE: [Self; 4] = [Self::A, Self::Aaaa, Self::Cname, Self::Txt];

    /// Upper-case wire name (`"A"`, `"AAAA"`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Other(name) => name,
        }
    }

    pub fn is_creatable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "TXT" => Self::Txt,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(record_type) = raw.parse::<Self>();
        Ok(record_type)
    }
}

/// Provider's "automatic" TTL sentinel. Preserved verbatim on updates.
pub const AUTO_TTL: u32 = 1;

/// DNS 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub zone_id: String,
    pub record_type: RecordType,
    /// Fully-qualified name as the provider reports it.
    pub name: String,
    pub content: String,
    pub proxied: bool,
    pub proxiable: bool,
    pub ttl: u32,
}

/// 创建 DNS 记录请求
///
/// Records are always created unproxied with [`AUTO_TTL`]; the proxy flag can
/// be toggled afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub zone_id: String,
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
}

/// Full-replace payload for an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl UpdateRecordRequest {
    /// Carries type, name, TTL and proxy flag over from `snapshot`, replacing
    /// only the content.
    pub fn from_snapshot(snapshot: &DnsRecord, content: impl Into<String>) -> Self {
        Self {
            record_type: snapshot.record_type.clone(),
            name: snapshot.name.clone(),
            content: content.into(),
            ttl: snapshot.ttl,
            proxied: snapshot.proxied,
        }
    }
}
