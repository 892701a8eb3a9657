//! Startup configuration.
//!
//! Every option can be given as a flag or an environment variable. Credentials
//! are read once here and then only borrowed.

use std::collections::HashSet;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use zonebot_provider::CF_API_BASE;

use crate::controller::ControllerSettings;
use crate::transport::telegram::TELEGRAM_API_BASE;
use crate::transport::UserId;

/// Largest page Cloudflare serves for `/zones`.
pub const MAX_ZONES_PER_PAGE: u32 = 50;
/// Largest page Cloudflare serves for `/dns_records`.
pub const MAX_RECORDS_PER_PAGE: u32 = 100;

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
pub struct Cli {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,
    /// Cloudflare API token with DNS edit permission
    #[arg(long, env = "CF_API_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub cf_api_token: Option<String>,
    /// Telegram user ids allowed to use the console (comma separated)
    #[arg(
        long,
        env = "ADMIN_IDS",
        value_name = "IDS",
        value_delimiter = ',',
        value_parser = parse_user_id
    )]
    pub admin_ids: Vec<UserId>,
    /// Zones per page in the domain list
    #[arg(long, value_name = "N", default_value_t = 25)]
    pub zones_per_page: u32,
    /// Records per page in the record list
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub records_per_page: u32,
    /// Cloudflare API root
    #[arg(long, env = "CF_API_BASE", value_name = "URL", default_value = CF_API_BASE)]
    pub cf_api_base: String,
    /// Telegram Bot API root
    #[arg(
        long,
        env = "TELEGRAM_API_BASE",
        value_name = "URL",
        default_value = TELEGRAM_API_BASE
    )]
    pub telegram_api_base: String,
    /// Long-poll timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub poll_timeout: u64,
}

/// `ADMIN_IDS="1, 2"` splits into `"1"` and `" 2"`.
fn parse_user_id(raw: &str) -> Result<UserId, String> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|e| format!("invalid user id {trimmed:?}: {e}"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {name}: pass --{flag} or set {env}")]
    MissingCredential {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("--{flag} must be at least 1")]
    ZeroPageSize { flag: &'static str },
}

/// Validated configuration.
pub struct Config {
    pub bot_token: String,
    pub cf_api_token: String,
    pub admins: HashSet<UserId>,
    pub zones_per_page: u32,
    pub records_per_page: u32,
    pub cf_api_base: String,
    pub telegram_api_base: String,
    pub poll_timeout: Duration,
}

fn required(
    value: Option<&str>,
    name: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingCredential { name, flag, env }),
    }
}

fn page_size(value: u32, max: u32, flag: &'static str) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroPageSize { flag });
    }
    if value > max {
        tracing::warn!("--{flag} {value} exceeds the API limit, using {max}");
    }
    Ok(value.min(max))
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let bot_token = required(cli.bot_token.as_deref(), "bot token", "bot-token", "BOT_TOKEN")?;
        let cf_api_token = required(
            cli.cf_api_token.as_deref(),
            "Cloudflare API token",
            "cf-api-token",
            "CF_API_TOKEN",
        )?;

        Ok(Self {
            bot_token,
            cf_api_token,
            admins: cli.admin_ids.iter().copied().collect(),
            zones_per_page: page_size(cli.zones_per_page, MAX_ZONES_PER_PAGE, "zones-per-page")?,
            records_per_page: page_size(
                cli.records_per_page,
                MAX_RECORDS_PER_PAGE,
                "records-per-page",
            )?,
            cf_api_base: cli.cf_api_base.clone(),
            telegram_api_base: cli.telegram_api_base.clone(),
            poll_timeout: Duration::from_secs(cli.poll_timeout),
        })
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            admins: self.admins.clone(),
            zones_per_page: self.zones_per_page,
            records_per_page: self.records_per_page,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("cf_api_token", &"<redacted>")
            .field("admins", &self.admins)
            .field("zones_per_page", &self.zones_per_page)
            .field("records_per_page", &self.records_per_page)
            .field("cf_api_base", &self.cf_api_base)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
