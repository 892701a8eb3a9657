use serde::{Deserialize, Serialize};

/// Error returned by every provider operation.
///
/// `provider` names the backend that failed. Nothing is retried: each failure
/// is reported once and the caller decides what to do next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection could not be made or was dropped.
    NetworkError { provider: String, detail: String },

    Timeout { provider: String, detail: String },

    /// Non-2xx answer without a parseable API envelope (proxy pages, gateway errors).
    HttpStatus {
        provider: String,
        status: u16,
        /// Body, truncated.
        detail: String,
    },

    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// Token is valid but not scoped for this zone or operation.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// Zone is unknown or no longer reachable with this token.
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// Payload rejected; `detail` is the provider's own wording.
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// HTTP 429. `retry_after` comes from the `Retry-After` header.
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// Response did not have the expected shape.
    ParseError { provider: String, detail: String },

    /// Provider error code with no mapping.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 由操作者输入或过期数据引起的错误，日志记为 `warn`；其余记为 `error`。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::DomainNotFound { .. }
                | Self::RecordExists { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// The referenced record or zone no longer exists (or is not reachable).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::DomainNotFound { .. }
        )
    }

    /// Text shown to the operator.
    ///
    /// Provider business errors are passed through verbatim; transport failures
    /// surface their underlying error text.
    #[must_use]
    pub fn operator_message(&self) -> String {
        match self {
            Self::NetworkError { detail, .. }
            | Self::Timeout { detail, .. }
            | Self::ParseError { detail, .. }
            | Self::InvalidParameter { detail, .. } => detail.clone(),
            Self::HttpStatus { status, detail, .. } => format!("HTTP {status}: {detail}"),
            Self::InvalidCredentials { raw_message, .. }
            | Self::PermissionDenied { raw_message, .. }
            | Self::RecordNotFound { raw_message, .. }
            | Self::DomainNotFound { raw_message, .. }
            | Self::RecordExists { raw_message, .. }
            | Self::RateLimited { raw_message, .. } => {
                raw_message.clone().unwrap_or_else(|| self.to_string())
            }
            Self::Unknown { raw_message, .. } => raw_message.clone(),
        }
    }
}

fn with_reason(
    f: &mut std::fmt::Formatter<'_>,
    provider: &str,
    what: &str,
    reason: Option<&String>,
) -> std::fmt::Result {
    write!(f, "[{provider}] {what}")?;
    match reason {
        Some(reason) => write!(f, ": {reason}"),
        None => Ok(()),
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider,
                status,
                detail,
            } => write!(f, "[{provider}] HTTP {status}: {detail}"),
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => with_reason(f, provider, "Invalid credentials", raw_message.as_ref()),
            Self::PermissionDenied {
                provider,
                raw_message,
            } => with_reason(f, provider, "Permission denied", raw_message.as_ref()),
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => with_reason(
                f,
                provider,
                &format!("Zone '{domain}' not found"),
                raw_message.as_ref(),
            ),
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => write!(f, "[{provider}] Record '{record_name}' already exists"),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::RateLimited {
                provider,
                retry_after: Some(secs),
                ..
            } => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
            Self::RateLimited { provider, .. } => write!(f, "[{provider}] Rate limited"),
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
