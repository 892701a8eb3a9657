//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{decode_json, send_request};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::PageInfo;
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::CloudflareError;
use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 发送请求并解析 Cloudflare 响应信封
    ///
    /// `success=false` 被映射为 [`ProviderError`]；非 2xx 且非 JSON 的响应返回
    /// [`ProviderError::HttpStatus`]。
    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: &ErrorContext,
    ) -> Result<CloudflareResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let raw = send_request(builder, self.provider_name(), &format!("{method} {path}")).await?;
        let status = raw.status;

        if !raw.is_success() && serde_json::from_str::<serde_json::Value>(&raw.body).is_err() {
            log::error!("[cloudflare] {method} {path} failed with HTTP {status}");
            return Err(ProviderError::HttpStatus {
                provider: self.provider_name().to_string(),
                status,
                detail: truncate_for_log(&raw.body),
            });
        }

        let response: CloudflareResponse<T> = decode_json(&raw.body, self.provider_name())?;
        if !response.success {
            return Err(self.envelope_error(status, response.errors, context));
        }
        Ok(response)
    }

    /// 将 `errors` 数组映射为统一错误
    ///
    /// The first entry's code picks the variant; the message joins every entry.
    pub(crate) fn envelope_error(
        &self,
        status: u16,
        errors: Vec<CloudflareError>,
        context: &ErrorContext,
    ) -> ProviderError {
        let code = errors.first().map(|e| e.code.to_string());
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");

        let raw = match code {
            Some(code) => RawApiError::with_code(code, message),
            None if status == 404 => RawApiError::new("Not found"),
            None => RawApiError::new("Unknown error"),
        };

        let error = self.map_error(raw, context.clone());
        let error = match error {
            ProviderError::Unknown { raw_message, .. } if status == 404 => {
                self.not_found(context, raw_message)
            }
            other => other,
        };

        if error.is_expected() {
            log::warn!("API 错误: {error}");
        } else {
            log::error!("API 错误: {error}");
        }
        error
    }

    fn not_found(&self, context: &ErrorContext, raw_message: String) -> ProviderError {
        match &context.record_id {
            Some(record_id) => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: record_id.clone(),
                raw_message: Some(raw_message),
            },
            None => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context
                    .zone_id
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw_message),
            },
        }
    }

    /// 执行 GET 请求，要求 result 存在
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &ErrorContext,
    ) -> Result<T> {
        self.send::<T, ()>(Method::GET, path, None, context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 GET 请求 (带分页)
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        context: &ErrorContext,
    ) -> Result<(Vec<T>, PageInfo)> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let path = format!("{path}{separator}page={page}&per_page={per_page}");
        let response = self
            .send::<Vec<T>, ()>(Method::GET, &path, None, context)
            .await?;

        let items = response.result.unwrap_or_default();
        let info = match response.result_info {
            Some(info) => PageInfo {
                page: if info.page == 0 { page } else { info.page },
                per_page: if info.per_page == 0 {
                    per_page
                } else {
                    info.per_page
                },
                total_pages: info.total_pages.max(1),
                total_count: info.total_count,
            },
            None => PageInfo::single(items.len()),
        };
        Ok((items, info))
    }

    /// 执行带请求体的写请求 (POST / PUT / PATCH)
    pub(crate) async fn write<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        context: &ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        log::debug!(
            "Request Body: {}",
            serde_json::to_string(body).unwrap_or_else(|_| "无法序列化请求体".to_string())
        );
        self.send::<T, B>(method, path, Some(body), context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, context: &ErrorContext) -> Result<()> {
        self.send::<serde_json::Value, ()>(Method::DELETE, path, None, context)
            .await
            .map(|_| ())
    }
}
