//! Inline-button payloads.
//!
//! Buttons carry a short colon-delimited token (`recs:{zone}:{page}`, `rec:{id}`,
//! `act:{verb}:{target}` ...). Tokens are decoded exactly once, here, into
//! [`Callback`]; everything downstream matches on the enum.
//!
//! Actions and type picks name the record or zone their message was rendered
//! for, so a button left on an older message cannot act on a different one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use zonebot_provider::RecordType;

/// Telegram rejects `callback_data` longer than this many bytes.
pub const MAX_TOKEN_BYTES: usize = 64;

/// Verbs on a record (or, for [`Action::NewRecord`], on a zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    ToggleProxy,
    Delete,
    ConfirmDelete,
    NewRecord,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::ToggleProxy => "proxy",
            Self::Delete => "del",
            Self::ConfirmDelete => "delok",
            Self::NewRecord => "new",
        }
    }
}

impl FromStr for Action {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(Self::Edit),
            "proxy" => Ok(Self::ToggleProxy),
            "del" => Ok(Self::Delete),
            "delok" => Ok(Self::ConfirmDelete),
            "new" => Ok(Self::NewRecord),
            other => Err(CallbackError::UnknownAction(other.to_string())),
        }
    }
}

/// Decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Home,
    Zones { page: u32 },
    Records { zone_id: String, page: u32 },
    Record { record_id: String },
    /// `target` is the record id, or the zone id for [`Action::NewRecord`].
    Action { action: Action, target: String },
    PickType { record_type: RecordType, zone_id: String },
    /// Page counter label; pressing it does nothing.
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    #[error("empty callback token")]
    Empty,

    #[error("unknown callback prefix: {0}")]
    UnknownPrefix(String),

    #[error("callback '{token}' expects {expected} parameter(s)")]
    Arity { token: String, expected: usize },

    #[error("invalid page number: {0}")]
    BadPage(String),

    #[error("empty identifier in callback '{0}'")]
    EmptyId(String),

    #[error("record type not supported for creation: {0}")]
    UnsupportedType(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

fn parse_page(raw: &str) -> Result<u32, CallbackError> {
    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(CallbackError::BadPage(raw.to_string())),
    }
}

fn parse_id(raw: &str, token: &str) -> Result<String, CallbackError> {
    if raw.is_empty() {
        Err(CallbackError::EmptyId(token.to_string()))
    } else {
        Ok(raw.to_string())
    }
}

impl Callback {
    /// Decode a raw button token. Never panics; anything unexpected is an error.
    pub fn decode(token: &str) -> Result<Self, CallbackError> {
        token.parse()
    }

    /// Encode into the wire token carried by the button.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Callback {
    type Err = CallbackError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(CallbackError::Empty);
        }

        let parts: Vec<&str> = token.split(':').collect();
        let arity = |expected: usize| -> Result<(), CallbackError> {
            if parts.len() == expected + 1 {
                Ok(())
            } else {
                Err(CallbackError::Arity {
                    token: token.to_string(),
                    expected,
                })
            }
        };

        match parts[0] {
            "home" => arity(0).map(|()| Self::Home),
            "noop" => arity(0).map(|()| Self::Noop),
            "zones" => {
                arity(1)?;
                Ok(Self::Zones {
                    page: parse_page(parts[1])?,
                })
            }
            "recs" => {
                arity(2)?;
                Ok(Self::Records {
                    zone_id: parse_id(parts[1], token)?,
                    page: parse_page(parts[2])?,
                })
            }
            "rec" => {
                arity(1)?;
                Ok(Self::Record {
                    record_id: parse_id(parts[1], token)?,
                })
            }
            "act" => {
                arity(2)?;
                Ok(Self::Action {
                    action: parts[1].parse()?,
                    target: parse_id(parts[2], token)?,
                })
            }
            "type" => {
                arity(2)?;
                let Ok(record_type) = parts[1].parse::<RecordType>();
                if record_type.is_creatable() {
                    Ok(Self::PickType {
                        record_type,
                        zone_id: parse_id(parts[2], token)?,
                    })
                } else {
                    Err(CallbackError::UnsupportedType(parts[1].to_string()))
                }
            }
            other => Err(CallbackError::UnknownPrefix(other.to_string())),
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Noop => f.write_str("noop"),
            Self::Zones { page } => write!(f, "zones:{page}"),
            Self::Records { zone_id, page } => write!(f, "recs:{zone_id}:{page}"),
            Self::Record { record_id } => write!(f, "rec:{record_id}"),
            Self::Action { action, target } => write!(f, "act:{}:{target}", action.as_str()),
            Self::PickType {
                record_type,
                zone_id,
            } => write!(f, "type:{record_type}:{zone_id}"),
        }
    }
}
