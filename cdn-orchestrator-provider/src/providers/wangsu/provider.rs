//! 网宿 `CdnProvider` trait 实现

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{
    CdnProvider, DomainOperations, ErrorContext, ProviderErrorMapper, RawApiError,
};
use crate::types::{
    AccessStatsRequest, AccessTotalRequest, AreaCode, CreateDomainRequest, CreateDomainResponse,
    DomainDetail, DomainStatusListRequest, OriginPriority, OriginStatsRequest,
    OriginTotalRequest, PaginatedResponse, ProviderFeatures,
    ProviderLimits, ProviderMetadata, ProviderType, PurgePathRequest, PurgeTaskListRequest,
    PurgeUrlsRequest, PushTaskListRequest, PushUrlsRequest, RegionDistribution,
    RegionDistributionRequest, StatSeries, TaskHandle, TaskStatusResponse, TopUrl,
    TopUrlRequest, UpdateDomainRequest, VerifyDomainRecordRequest, VerifyRecord,
};
use crate::utils::time::normalize_page;

use super::builder::{ConfigUpdate, build_update, steps};
use super::mapping::{channel_from, domain_status, service_areas, service_type};
use super::types::{
    self as api, CreateDomainResponse as WangsuCreateResponse, DomainListResponse,
    DomainNameRequest, DomainSummary, OriginConfig,
};
use super::{MAX_PAGE_SIZE, WangsuProvider};

const DOMAIN_PATH: &str = "/api/domain";
const SRC_CONFIG_PATH: &str = "/api/domain/setsrcconfig";
const API_VERSION: &str = "1.0.0";
/// 创建域名受理
const ACCEPTED: u16 = 202;

impl WangsuProvider {
    fn convert_domain(domain: DomainSummary) -> DomainDetail {
        DomainDetail {
            status: domain_status(&domain),
            channel_type: channel_from(&domain.service_type),
            domain_id: domain.domain_id,
            domain: domain.domain_name,
            // 列表接口不返回加速区域
            area_code: None,
            cname: domain.cname,
            create_time: 0,
            update_time: 0,
        }
    }

    /// 创建请求体；回源地址取主源站，没有主源站时取全部源站
    fn create_body(req: &CreateDomainRequest) -> api::CreateDomainRequest {
        let (primary, _) = req.count_by_priority();
        let origin_ips = req
            .sources
            .iter()
            .filter(|s| primary == 0 || s.priority == OriginPriority::Primary)
            .map(|s| s.address.as_str())
            .collect::<Vec<_>>()
            .join(";");

        api::CreateDomainRequest {
            version: API_VERSION.to_string(),
            domain_name: req.domain.clone(),
            service_type: service_type(req.channel_type).to_string(),
            service_areas: service_areas(req.area_code).to_string(),
            origin_config: OriginConfig {
                origin_ips,
                default_origin_host_header: req
                    .sources
                    .first()
                    .map(|s| s.host.clone())
                    .unwrap_or_default(),
            },
            comment: String::new(),
            cname_with_customized_prefix: true,
            accelerate_no_china: req.area_code == AreaCode::Oversea,
        }
    }

    async fn list_domains(&self) -> Result<Vec<DomainSummary>> {
        let response: DomainListResponse = self
            .get_json(DOMAIN_PATH, ErrorContext::default())
            .await?;
        Ok(response.into_domains())
    }

    async fn switch_domain(&self, action: &str, detail: &DomainDetail) -> Result<()> {
        let body = DomainNameRequest {
            domain_name: detail.domain.clone(),
        };
        self.post_status(
            &format!("{DOMAIN_PATH}/{action}"),
            &body,
            ErrorContext::domain(&detail.domain),
        )
        .await
        .map(|_| ())
    }

    /// 按接口顺序下发一次更新
    async fn apply_update(&self, domain: &str, update: ConfigUpdate) -> Result<()> {
        let ctx = || ErrorContext::domain(domain);
        if let Some(body) = update.src_config {
            self.post_status(SRC_CONFIG_PATH, &body, ctx()).await?;
        }
        if let Some(body) = update.cache_time {
            self.put(&config_path("cachetime", domain), &body, ctx())
                .await?;
        }
        if let Some(body) = update.http_code_cache {
            self.put(&config_path("httpcodecache", domain), &body, ctx())
                .await?;
        }
        if let Some(body) = update.access_speed {
            self.put(&config_path("accessspeed", domain), &body, ctx())
                .await?;
        }
        if let Some(body) = update.header_modify {
            self.put(&config_path("headermodify", domain), &body, ctx())
                .await?;
        }
        if let Some(body) = update.inner_redirect {
            self.put(&config_path("InnerRedirect", domain), &body, ctx())
                .await?;
        }
        if let Some(body) = update.visit_control {
            self.put(&config_path("visitcontrol", domain), &body, ctx())
                .await?;
        }
        Ok(())
    }
}

fn config_path(feature: &str, domain: &str) -> String {
    format!("/api/config/{feature}/{domain}")
}

/// 按状态过滤后本地分页
fn page_domains(
    domains: Vec<DomainSummary>,
    req: &DomainStatusListRequest,
) -> PaginatedResponse<String> {
    let (page, limit) = normalize_page(req.page, req.limit);
    let limit = limit.min(MAX_PAGE_SIZE);
    let matched: Vec<String> = domains
        .into_iter()
        .filter(|d| domain_status(d) == req.status)
        .map(|d| d.domain_name)
        .collect();
    let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
    let offset = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let items = matched
        .into_iter()
        .skip(offset)
        .take(usize::try_from(limit).unwrap_or(0))
        .collect();
    PaginatedResponse::new(items, page, limit, total)
}

#[async_trait]
impl DomainOperations for WangsuProvider {
    fn id(&self) -> &'static str {
        "wangsu"
    }

    async fn show_domain_detail(&self, domain: &str) -> Result<DomainDetail> {
        let found = self
            .list_domains()
            .await?
            .into_iter()
            .find(|d| d.domain_name == domain);
        let Some(item) = found else {
            return Err(ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: domain.to_string(),
                raw_message: None,
            });
        };
        Ok(Self::convert_domain(item))
    }

    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse> {
        if req.sources.is_empty() {
            return Err(self.invalid_request("sources is empty"));
        }
        let body = Self::create_body(req);
        let (status, text) = self
            .post_status(DOMAIN_PATH, &body, ErrorContext::domain(&req.domain))
            .await?;
        if status != ACCEPTED {
            return Err(self.unknown_error(RawApiError::with_code(
                status.to_string(),
                format!("create domain expected HTTP {ACCEPTED}, got {status}: {text}"),
            )));
        }
        // 受理响应体可能为空
        let response: WangsuCreateResponse = serde_json::from_str(&text).unwrap_or_default();
        Ok(CreateDomainResponse {
            domain_id: response.domain_id(),
            cname: Some(response.cname).filter(|c| !c.is_empty()),
        })
    }

    async fn update_domain(&self, req: &UpdateDomainRequest) -> Result<()> {
        let Some(steps) = steps(req.action) else {
            return Err(self.not_implemented(&format!("update_domain({})", req.action)));
        };
        let update = build_update(req, steps);
        if update.is_empty() {
            log::debug!(
                "[wangsu] {} produced no configs for {}, skipped",
                req.action,
                req.domain
            );
            return Ok(());
        }
        self.apply_update(&req.domain, update).await
    }

    async fn enable_domain(&self, detail: &DomainDetail) -> Result<()> {
        self.switch_domain("enable", detail).await
    }

    async fn disable_domain(&self, detail: &DomainDetail) -> Result<()> {
        self.switch_domain("disable", detail).await
    }

    async fn delete_domain(&self, _detail: &DomainDetail) -> Result<()> {
        Err(self.not_implemented("delete_domain"))
    }
}

#[async_trait]
impl CdnProvider for WangsuProvider {
    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Wangsu,
            name: "网宿 CDN".to_string(),
            description: "网宿科技内容分发网络".to_string(),
            required_fields: ProviderType::Wangsu.credential_fields(),
            features: ProviderFeatures {
                delete_domain: false,
                purge: false,
                domain_verification: false,
                statistics: false,
            },
            limits: ProviderLimits {
                max_page_size_domains: MAX_PAGE_SIZE,
                max_page_size_tasks: 0,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.list_domains().await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => {
                log::warn!("凭证验证失败: {e}");
                Ok(false)
            }
        }
    }

    async fn show_domain_status_list(
        &self,
        req: &DomainStatusListRequest,
    ) -> Result<PaginatedResponse<String>> {
        let domains = self.list_domains().await?;
        Ok(page_domains(domains, req))
    }

    async fn create_verify_record(&self, _domain: &str) -> Result<VerifyRecord> {
        Err(self.not_implemented("create_verify_record"))
    }

    async fn verify_domain_record(&self, _req: &VerifyDomainRecordRequest) -> Result<bool> {
        Err(self.not_implemented("verify_domain_record"))
    }

    async fn purge_path_cache(&self, _req: &PurgePathRequest) -> Result<TaskHandle> {
        Err(self.not_implemented("purge_path_cache"))
    }

    async fn purge_urls_cache(&self, _req: &PurgeUrlsRequest) -> Result<TaskHandle> {
        Err(self.not_implemented("purge_urls_cache"))
    }

    async fn push_urls_cache(&self, _req: &PushUrlsRequest) -> Result<TaskHandle> {
        Err(self.not_implemented("push_urls_cache"))
    }

    async fn show_purge_task_status(&self, _task_id: &str) -> Result<TaskStatusResponse> {
        Err(self.not_implemented("show_purge_task_status"))
    }

    async fn show_push_task_status(&self, _task_id: &str) -> Result<TaskStatusResponse> {
        Err(self.not_implemented("show_push_task_status"))
    }

    async fn show_purge_task_list(
        &self,
        _req: &PurgeTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        Err(self.not_implemented("show_purge_task_list"))
    }

    async fn show_push_task_list(
        &self,
        _req: &PushTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        Err(self.not_implemented("show_push_task_list"))
    }

    async fn domain_access_data(&self, _req: &AccessStatsRequest) -> Result<StatSeries> {
        Err(self.not_implemented("domain_access_data"))
    }

    async fn domain_origin_data(&self, _req: &OriginStatsRequest) -> Result<StatSeries> {
        Err(self.not_implemented("domain_origin_data"))
    }

    async fn list_top_urls(&self, _req: &TopUrlRequest) -> Result<Vec<TopUrl>> {
        Err(self.not_implemented("list_top_urls"))
    }

    async fn domain_access_total(
        &self,
        _req: &AccessTotalRequest,
    ) -> Result<BTreeMap<String, i64>> {
        Err(self.not_implemented("domain_access_total"))
    }

    async fn domain_origin_total(
        &self,
        _req: &OriginTotalRequest,
    ) -> Result<BTreeMap<String, i64>> {
        Err(self.not_implemented("domain_origin_total"))
    }

    async fn user_access_region_distribution(
        &self,
        _req: &RegionDistributionRequest,
    ) -> Result<BTreeMap<String, RegionDistribution>> {
        Err(self.not_implemented("user_access_region_distribution"))
    }
}
