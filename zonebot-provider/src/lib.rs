//! # zonebot-provider
//!
//! Thin client for the Cloudflare DNS API, shaped for a chat console that pages
//! through zones and records and edits them one at a time.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zonebot_provider::{CloudflareProvider, DnsProvider, PaginationParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = CloudflareProvider::new("your-token".to_string())?;
//!
//!     let zones = provider.list_zones(&PaginationParams::new(1, 25)).await?;
//!     for zone in &zones.items {
//!         println!("{} ({})", zone.name, zone.id);
//!     }
//!
//!     let records = provider
//!         .list_records(&zones.items[0].id, &PaginationParams::new(1, 20))
//!         .await?;
//!     for record in &records.items {
//!         println!("{} {} -> {}", record.record_type, record.name, record.content);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Each call is one
//! round trip with a 10 s connect / 15 s total timeout and is never retried.
//! [`ProviderError::operator_message`] gives the text to show a human, with the
//! provider's own wording passed through unchanged.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use traits::DnsProvider;

pub use types::{
    AUTO_TTL, CreateRecordRequest, DnsRecord, Page, PageInfo, PaginationParams, RecordType,
    UpdateRecordRequest, Zone,
};

pub use providers::CloudflareProvider;

pub use providers::CF_API_BASE;
