//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use reqwest::Method;
use urlencoding::encode;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{
    AUTO_TTL, CreateRecordRequest, DnsRecord, Page, PaginationParams, RecordType,
    UpdateRecordRequest, Zone,
};

use super::types::{ProxiedPatch, RecordBody, TokenVerification};
use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    /// 将 Cloudflare 记录转换为 `DnsRecord`
    ///
    /// Older API responses may omit `proxiable`; A/AAAA/CNAME are then assumed
    /// proxiable and the API has the final word when the toggle is attempted.
    pub(crate) fn cf_record_to_dns_record(
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
    ) -> DnsRecord {
        let Ok(record_type) = cf_record.record_type.parse::<RecordType>();
        let proxiable = cf_record.proxiable.unwrap_or(matches!(
            record_type,
            RecordType::A | RecordType::Aaaa | RecordType::Cname
        ));

        DnsRecord {
            id: cf_record.id,
            zone_id: zone_id.to_string(),
            record_type,
            name: cf_record.name,
            content: cf_record.content,
            proxied: cf_record.proxied.unwrap_or(false),
            proxiable,
            ttl: cf_record.ttl,
        }
    }

    fn record_path(zone_id: &str, record_id: &str) -> String {
        format!(
            "/zones/{}/dns_records/{}",
            encode(zone_id),
            encode(record_id)
        )
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn verify_token(&self) -> Result<bool> {
        let verification: TokenVerification = self
            .get("/user/tokens/verify", &ErrorContext::default())
            .await?;
        Ok(verification.status == "active")
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<Page<Zone>> {
        let (zones, info): (Vec<CloudflareZone>, _) = self
            .get_page(
                "/zones",
                params.page,
                params.per_page.min(MAX_PAGE_SIZE_ZONES),
                &ErrorContext::default(),
            )
            .await?;

        Ok(Page {
            items: zones
                .into_iter()
                .map(|z| Zone {
                    id: z.id,
                    name: z.name,
                })
                .collect(),
            info,
        })
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> Result<Page<DnsRecord>> {
        let (cf_records, info): (Vec<CloudflareDnsRecord>, _) = self
            .get_page(
                &format!("/zones/{}/dns_records", encode(zone_id)),
                params.page,
                params.per_page.min(MAX_PAGE_SIZE_RECORDS),
                &ErrorContext::zone(zone_id),
            )
            .await?;

        Ok(Page {
            items: cf_records
                .into_iter()
                .map(|r| Self::cf_record_to_dns_record(r, zone_id))
                .collect(),
            info,
        })
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        let cf_record: CloudflareDnsRecord = self
            .get(
                &Self::record_path(zone_id, record_id),
                &ErrorContext::record(zone_id, record_id),
            )
            .await?;
        Ok(Self::cf_record_to_dns_record(cf_record, zone_id))
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord> {
        let body = RecordBody {
            record_type: req.record_type.as_str(),
            name: &req.name,
            content: &req.content,
            ttl: AUTO_TTL,
            proxied: false,
        };

        let cf_record: CloudflareDnsRecord = self
            .write(
                Method::POST,
                &format!("/zones/{}/dns_records", encode(&req.zone_id)),
                &body,
                &ErrorContext::named(&req.zone_id, &req.name),
            )
            .await?;

        log::info!(
            "[cloudflare] created {} record {} in zone {}",
            req.record_type,
            cf_record.name,
            req.zone_id
        );
        Ok(Self::cf_record_to_dns_record(cf_record, &req.zone_id))
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let body = RecordBody {
            record_type: req.record_type.as_str(),
            name: &req.name,
            content: &req.content,
            ttl: req.ttl,
            proxied: req.proxied,
        };

        let cf_record: CloudflareDnsRecord = self
            .write(
                Method::PUT,
                &Self::record_path(zone_id, record_id),
                &body,
                &ErrorContext::record(zone_id, record_id),
            )
            .await?;

        log::info!("[cloudflare] updated record {record_id} in zone {zone_id}");
        Ok(Self::cf_record_to_dns_record(cf_record, zone_id))
    }

    async fn set_proxied(
        &self,
        zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> Result<DnsRecord> {
        let cf_record: CloudflareDnsRecord = self
            .write(
                Method::PATCH,
                &Self::record_path(zone_id, record_id),
                &ProxiedPatch { proxied },
                &ErrorContext::record(zone_id, record_id),
            )
            .await?;

        log::info!("[cloudflare] set proxied={proxied} on record {record_id}");
        Ok(Self::cf_record_to_dns_record(cf_record, zone_id))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.delete(
            &Self::record_path(zone_id, record_id),
            &ErrorContext::record(zone_id, record_id),
        )
        .await?;
        log::info!("[cloudflare] deleted record {record_id} in zone {zone_id}");
        Ok(())
    }
}
