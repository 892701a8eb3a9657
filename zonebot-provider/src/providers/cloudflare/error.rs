//! Cloudflare error mapping
//!
//! Codes: <https://developers.cloudflare.com/api/> (`errors[].code` of the envelope).

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// Meaning of a Cloudflare error code for the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeClass {
    /// Token missing, malformed or revoked.
    BadToken,
    /// Token valid but not scoped for the zone or operation.
    Forbidden,
    /// Payload rejected; carries the offending field.
    Rejected(&'static str),
    /// Create collided with an existing record.
    Duplicate,
    MissingRecord,
    /// Zone id unknown or not routable.
    MissingZone,
}

fn classify(code: &str) -> Option<CodeClass> {
    let class = match code {
        "6003" | "6111" | "9109" | "10000" => CodeClass::BadToken,
        "9103" | "10001" => CodeClass::Forbidden,
        "9000" => CodeClass::Rejected("name"),
        // 9005 A / 9006 AAAA / 9007 CNAME content
        "9005" | "9006" | "9007" => CodeClass::Rejected("content"),
        "9021" => CodeClass::Rejected("ttl"),
        "9041" => CodeClass::Rejected("proxied"),
        "1004" => CodeClass::Rejected("general"),
        "81053" | "81054" | "81055" | "81056" | "81057" | "81058" => CodeClass::Duplicate,
        "81044" => CodeClass::MissingRecord,
        "7000" | "7003" => CodeClass::MissingZone,
        _ => return None,
    };
    Some(class)
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<unknown>".to_string())
}

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(class) = raw.code.as_deref().and_then(classify) else {
            return self.unknown_error(raw);
        };

        let provider = self.provider_name().to_string();
        let message = raw.message;
        match class {
            CodeClass::BadToken => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(message),
            },
            CodeClass::Forbidden => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(message),
            },
            CodeClass::Rejected(param) => ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: message,
            },
            CodeClass::Duplicate => ProviderError::RecordExists {
                provider,
                record_name: or_unknown(context.record_name),
                raw_message: Some(message),
            },
            CodeClass::MissingRecord => ProviderError::RecordNotFound {
                provider,
                record_id: or_unknown(context.record_id),
                raw_message: Some(message),
            },
            CodeClass::MissingZone => ProviderError::DomainNotFound {
                provider,
                domain: or_unknown(context.zone_id),
                raw_message: Some(message),
            },
        }
    }
}
