//! 腾讯云 `CdnProvider` trait 实现

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono_tz::Tz;

use crate::error::{ProviderError, Result};
use crate::metrics::{
    checked_grid, place_by_time, status_code_key, verify_mutual_exclusion, zero_filled,
    zero_series,
};
use crate::traits::{CdnProvider, DomainOperations, ErrorContext, ProviderErrorMapper};
use crate::types::{
    AccessStatsRequest, AccessTotalRequest, AreaCode, CountryCode, CreateDomainRequest,
    CreateDomainResponse, DomainDetail, DomainStatusListRequest, OriginStatsRequest,
    OriginTotalRequest, PaginatedResponse, ProviderFeatures,
    ProviderLimits, ProviderMetadata, ProviderType, ProvinceCode, PurgePathRequest,
    PurgeTaskListRequest, PurgeUrlsRequest, PushTaskListRequest, PushUrlsRequest,
    RegionDistribution, RegionDistributionRequest, StatPoint, StatSeries, TaskHandle, TaskStatus,
    TaskStatusResponse, TopUrl, TopUrlRequest, UpdateDomainRequest, VerifyDomainRecordRequest,
    VerifyRecord,
};
use crate::utils::time::{
    format_in_time_zone, normalize_page, parse_in_time_zone, resolve_time_zone, utc_offset_label,
};

use super::builder::{build_update_request, create_origin};
use super::mapping::{
    CHINA_COUNTRY, OVERSEA_PROVINCE, access_metric, area, area_from, channel_from, country,
    domain_status, domain_status_filter, flush_type, http_protocol, interval, ip_protocol, isp,
    origin_metric, product, province, purge_type, service_type, task_status, task_status_filter,
    top_filter,
};
use super::types::{
    AddCdnDomainRequest, BriefDomain, CdnData, CreateVerifyRecordResponse,
    DescribeCdnDataRequest, DescribeCdnDataResponse, DescribeDomainsRequest,
    DescribeDomainsResponse, DescribeOriginDataRequest, DescribeOriginDataResponse,
    DescribePurgeTasksResponse, DescribePushTasksResponse, DescribeTasksRequest, DomainFilter,
    DomainRequest, EmptyResponse, ListTopDataRequest, ListTopDataResponse, PurgePathCacheRequest,
    PurgeUrlsCacheRequest, PushUrlsCacheRequest, TaskIdResponse, TaskLog,
    UpdateDomainConfigRequest, VerifyDomainRecordResponse,
};
use super::{MAX_PAGE_SIZE, TencentProvider};

/// 单个任务的日志条数上限（一个任务可能包含多条 URL）
const TASK_LOG_LIMIT: i64 = 100;

/// 未指定时 `Protocol` / `IpProtocol` 的取值
const ALL: &str = "all";

impl TencentProvider {
    /// 将腾讯云域名对象转换为统一详情，时间按北京时间解析
    pub(crate) fn convert_domain(domain: BriefDomain) -> DomainDetail {
        let tz = resolve_time_zone(None);
        DomainDetail {
            domain_id: domain.resource_id,
            domain: domain.domain,
            area_code: Some(area_from(&domain.area)),
            channel_type: channel_from(&domain.service_type),
            cname: domain.cname,
            status: domain_status(&domain.status),
            create_time: parse_in_time_zone(&domain.create_time, tz),
            update_time: parse_in_time_zone(&domain.update_time, tz),
        }
    }

    fn domain_filter(name: &str, value: &str) -> DomainFilter {
        DomainFilter {
            name: name.to_string(),
            value: vec![value.to_string()],
            fuzzy: false,
        }
    }

    /// `DescribeCdnData` 请求体
    fn cdn_data_request(req: &AccessStatsRequest, tz: Tz) -> DescribeCdnDataRequest {
        let district = req.district.map(|d| match req.area {
            AreaCode::Mainland => province(ProvinceCode::from_code(d)),
            AreaCode::Oversea | AreaCode::Global => country(CountryCode::from_code(d)),
        });
        DescribeCdnDataRequest {
            start_time: format_in_time_zone(req.start_time, tz),
            end_time: format_in_time_zone(req.end_time, tz),
            metric: access_metric(req.metric).to_string(),
            domains: req.domains.clone(),
            interval: interval(req.interval).to_string(),
            detail: true,
            area: area(req.area).to_string(),
            area_type: (req.area == AreaCode::Oversea && req.area_type == 1)
                .then(|| "client".to_string()),
            isp: req.isp.map(isp),
            district,
            protocol: req
                .protocol
                .map_or(ALL, http_protocol)
                .to_string(),
            ip_protocol: req.ip_protocol.map_or(ALL, ip_protocol).to_string(),
            product: product(req.product).to_string(),
            time_zone: utc_offset_label(tz),
        }
    }

    async fn list_domains(&self, req: &DescribeDomainsRequest) -> Result<DescribeDomainsResponse> {
        self.request("DescribeDomains", req, ErrorContext::default())
            .await
    }

    async fn purge_logs(&self, req: &DescribeTasksRequest, ctx: ErrorContext) -> Result<(Vec<TaskLog>, i64)> {
        let response: DescribePurgeTasksResponse =
            self.request("DescribePurgeTasks", req, ctx).await?;
        Ok((response.purge_logs, response.total_count))
    }

    async fn push_logs(&self, req: &DescribeTasksRequest, ctx: ErrorContext) -> Result<(Vec<TaskLog>, i64)> {
        let response: DescribePushTasksResponse =
            self.request("DescribePushTasks", req, ctx).await?;
        Ok((response.push_logs, response.total_count))
    }

    fn task_query(task_id: &str) -> DescribeTasksRequest {
        DescribeTasksRequest {
            task_id: Some(task_id.to_string()),
            offset: 0,
            limit: TASK_LOG_LIMIT,
            ..DescribeTasksRequest::default()
        }
    }

    fn task_status_response(&self, task_id: &str, logs: &[TaskLog]) -> Result<TaskStatusResponse> {
        let Some(status) = fold_task_status(logs) else {
            return Err(ProviderError::TaskNotFound {
                provider: self.provider_name().to_string(),
                task_id: task_id.to_string(),
                raw_message: None,
            });
        };
        Ok(TaskStatusResponse {
            task_id: task_id.to_string(),
            status,
        })
    }

    /// 任务列表请求体，时间窗口按请求时区格式化
    fn task_list_query(
        page: i64,
        limit: i64,
        start_time: i64,
        end_time: i64,
        time_zone: Option<&str>,
    ) -> (DescribeTasksRequest, i64, i64) {
        let (page, limit) = normalize_page(page, limit);
        let limit = limit.min(MAX_PAGE_SIZE);
        let tz = resolve_time_zone(time_zone);
        let query = DescribeTasksRequest {
            start_time: Some(format_in_time_zone(start_time, tz)),
            end_time: Some(format_in_time_zone(end_time, tz)),
            offset: (page - 1) * limit,
            limit,
            ..DescribeTasksRequest::default()
        };
        (query, page, limit)
    }

    async fn cdn_data(&self, req: &DescribeCdnDataRequest) -> Result<DescribeCdnDataResponse> {
        self.request("DescribeCdnData", req, ErrorContext::default())
            .await
    }

    async fn origin_data(
        &self,
        req: &DescribeOriginDataRequest,
    ) -> Result<DescribeOriginDataResponse> {
        self.request("DescribeOriginData", req, ErrorContext::default())
            .await
    }

    async fn top_data(&self, req: &ListTopDataRequest) -> Result<ListTopDataResponse> {
        self.request("ListTopData", req, ErrorContext::default())
            .await
    }
}

// ============ 任务 / 统计结果解析 ============

/// 任务日志折叠为一个状态：任一进行中即为进行中，否则取最后一条
fn fold_task_status(logs: &[TaskLog]) -> Option<TaskStatus> {
    let mut status = None;
    for log in logs {
        let s = task_status(&log.status);
        status = Some(s);
        if s == TaskStatus::Doing {
            break;
        }
    }
    status
}

fn points(data: &CdnData, tz: Tz) -> Vec<StatPoint> {
    data.detail_data
        .iter()
        .map(|d| StatPoint::new(parse_in_time_zone(&d.time, tz), d.value))
        .collect()
}

/// `[{Resource, [CdnData]}]` -> 时间序列
///
/// 状态码指标跳过与请求指标同名的汇总项，其余按 `resource#code` 展开；
/// 其他指标为每个请求域名生成零填充网格，再按时间写入。
fn series_from_data<'a>(
    resources: impl IntoIterator<Item = (&'a str, &'a [CdnData])>,
    domains: &[String],
    metric: &str,
    is_status_code: bool,
    grid: &[i64],
    tz: Tz,
) -> StatSeries {
    let mut series = if is_status_code {
        StatSeries::new()
    } else {
        zero_filled(domains, grid)
    };

    for (resource, data) in resources {
        for item in data {
            if is_status_code {
                if item.metric == metric {
                    continue;
                }
                let mut entry = zero_series(grid);
                place_by_time(&mut entry, grid, &points(item, tz));
                series.insert(status_code_key(resource, &item.metric), entry);
                continue;
            }
            let entry = series.entry(resource.to_string()).or_default();
            place_by_time(entry, grid, &points(item, tz));
        }
    }
    series
}

#[allow(clippy::cast_possible_truncation)]
fn integer(value: f64) -> i64 {
    value as i64
}

/// 汇总：各资源与请求指标同名的 `SummarizedData` 求和
fn totals_from_data<'a>(
    resources: impl IntoIterator<Item = (&'a str, &'a [CdnData])>,
    metric: &str,
) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for (resource, data) in resources {
        for item in data.iter().filter(|d| d.metric == metric) {
            *totals.entry(resource.to_string()).or_insert(0) += integer(item.summarized_data.value);
        }
    }
    totals
}

/// 地区分布：境内查询中 `-1` 计为境外，境外查询中 `4460` 计为境内；全球查询不统计
fn region_from_data(
    response: &ListTopDataResponse,
    query_area: AreaCode,
) -> BTreeMap<String, RegionDistribution> {
    let oversea_province = OVERSEA_PROVINCE.to_string();
    let china_country = CHINA_COUNTRY.to_string();
    let mut out = BTreeMap::new();
    for top in &response.data {
        let entry: &mut RegionDistribution = out.entry(top.resource.clone()).or_default();
        for item in &top.detail_data {
            let n = integer(item.value);
            match query_area {
                AreaCode::Mainland if item.name == oversea_province => entry.oversea_value += n,
                AreaCode::Mainland => entry.mainland_value += n,
                AreaCode::Oversea if item.name == china_country => entry.mainland_value += n,
                AreaCode::Oversea => entry.oversea_value += n,
                AreaCode::Global => {}
            }
        }
    }
    out
}

#[async_trait]
impl DomainOperations for TencentProvider {
    fn id(&self) -> &'static str {
        "tencent"
    }

    async fn show_domain_detail(&self, domain: &str) -> Result<DomainDetail> {
        let query = DescribeDomainsRequest {
            offset: 0,
            limit: 1,
            filters: vec![Self::domain_filter("domain", domain)],
        };
        let response: DescribeDomainsResponse = self
            .request("DescribeDomains", &query, ErrorContext::domain(domain))
            .await?;
        let Some(item) = response.domains.into_iter().next() else {
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
        let body = AddCdnDomainRequest {
            domain: req.domain.clone(),
            service_type: service_type(req.channel_type).to_string(),
            origin: create_origin(req.origin_protocol, &req.sources),
            area: area(req.area_code).to_string(),
        };
        let _: EmptyResponse = self
            .request("AddCdnDomain", &body, ErrorContext::domain(&req.domain))
            .await?;
        Ok(CreateDomainResponse::default())
    }

    async fn update_domain(&self, req: &UpdateDomainRequest) -> Result<()> {
        let body = build_update_request(req);
        let untouched = UpdateDomainConfigRequest {
            domain: req.domain.clone(),
            ..UpdateDomainConfigRequest::default()
        };
        if body == untouched {
            log::debug!(
                "[tencent] {} produced no configs for {}, skipped",
                req.action,
                req.domain
            );
            return Ok(());
        }
        let _: EmptyResponse = self
            .request("UpdateDomainConfig", &body, ErrorContext::domain(&req.domain))
            .await?;
        Ok(())
    }

    async fn enable_domain(&self, detail: &DomainDetail) -> Result<()> {
        let body = DomainRequest {
            domain: detail.domain.clone(),
        };
        let _: EmptyResponse = self
            .request("StartCdnDomain", &body, ErrorContext::domain(&detail.domain))
            .await?;
        Ok(())
    }

    async fn disable_domain(&self, detail: &DomainDetail) -> Result<()> {
        let body = DomainRequest {
            domain: detail.domain.clone(),
        };
        let _: EmptyResponse = self
            .request("StopCdnDomain", &body, ErrorContext::domain(&detail.domain))
            .await?;
        Ok(())
    }

    async fn delete_domain(&self, detail: &DomainDetail) -> Result<()> {
        let body = DomainRequest {
            domain: detail.domain.clone(),
        };
        let _: EmptyResponse = self
            .request("DeleteCdnDomain", &body, ErrorContext::domain(&detail.domain))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CdnProvider for TencentProvider {
    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Tencent,
            name: "腾讯云 CDN".to_string(),
            description: "腾讯云内容分发网络".to_string(),
            required_fields: ProviderType::Tencent.credential_fields(),
            features: ProviderFeatures {
                delete_domain: true,
                purge: true,
                domain_verification: true,
                statistics: true,
            },
            limits: ProviderLimits {
                max_page_size_domains: MAX_PAGE_SIZE,
                max_page_size_tasks: MAX_PAGE_SIZE,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let query = DescribeDomainsRequest {
            offset: 0,
            limit: 1,
            filters: Vec::new(),
        };
        match self.list_domains(&query).await {
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
        let (page, limit) = normalize_page(req.page, req.limit);
        let limit = limit.min(MAX_PAGE_SIZE);
        let query = DescribeDomainsRequest {
            offset: (page - 1) * limit,
            limit,
            filters: vec![Self::domain_filter(
                "status",
                domain_status_filter(req.status),
            )],
        };
        let response = self.list_domains(&query).await?;
        let domains = response.domains.into_iter().map(|d| d.domain).collect();
        Ok(PaginatedResponse::new(
            domains,
            page,
            limit,
            response.total_number,
        ))
    }

    async fn create_verify_record(&self, domain: &str) -> Result<VerifyRecord> {
        let body = DomainRequest {
            domain: domain.to_string(),
        };
        let response: CreateVerifyRecordResponse = self
            .request("CreateVerifyRecord", &body, ErrorContext::domain(domain))
            .await?;
        Ok(VerifyRecord {
            record: response.record,
            file_verify_url: response.file_verify_url,
        })
    }

    async fn verify_domain_record(&self, req: &VerifyDomainRecordRequest) -> Result<bool> {
        let body = super::types::VerifyDomainRecordRequest {
            domain: req.domain.clone(),
            verify_type: req.verify_type.clone(),
        };
        let response: VerifyDomainRecordResponse = self
            .request("VerifyDomainRecord", &body, ErrorContext::domain(&req.domain))
            .await?;
        Ok(response.result)
    }

    async fn purge_path_cache(&self, req: &PurgePathRequest) -> Result<TaskHandle> {
        let body = PurgePathCacheRequest {
            paths: req.paths.clone(),
            flush_type: flush_type(req.mode).to_string(),
            url_encode: req.url_encode,
        };
        let response: TaskIdResponse = self
            .request("PurgePathCache", &body, ErrorContext::default())
            .await?;
        Ok(TaskHandle::new(response.task_id))
    }

    async fn purge_urls_cache(&self, req: &PurgeUrlsRequest) -> Result<TaskHandle> {
        let body = PurgeUrlsCacheRequest {
            urls: req.urls.clone(),
            url_encode: req.url_encode,
        };
        let response: TaskIdResponse = self
            .request("PurgeUrlsCache", &body, ErrorContext::default())
            .await?;
        Ok(TaskHandle::new(response.task_id))
    }

    async fn push_urls_cache(&self, req: &PushUrlsRequest) -> Result<TaskHandle> {
        let body = PushUrlsCacheRequest {
            urls: req.urls.clone(),
            area: area(AreaCode::Global).to_string(),
            url_encode: req.url_encode,
        };
        let response: TaskIdResponse = self
            .request("PushUrlsCache", &body, ErrorContext::default())
            .await?;
        Ok(TaskHandle::new(response.task_id))
    }

    async fn show_purge_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let (logs, _) = self
            .purge_logs(&Self::task_query(task_id), ErrorContext::task(task_id))
            .await?;
        self.task_status_response(task_id, &logs)
    }

    async fn show_push_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let (logs, _) = self
            .push_logs(&Self::task_query(task_id), ErrorContext::task(task_id))
            .await?;
        self.task_status_response(task_id, &logs)
    }

    async fn show_purge_task_list(
        &self,
        req: &PurgeTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        let (mut query, page, limit) = Self::task_list_query(
            req.page,
            req.limit,
            req.start_time,
            req.end_time,
            req.time_zone.as_deref(),
        );
        query.purge_type = Some(purge_type(req.purge_type).to_string());
        query.status = Some(task_status_filter(req.status).to_string());
        let (logs, total) = self.purge_logs(&query, ErrorContext::default()).await?;
        let ids = logs.into_iter().map(|l| l.task_id).collect();
        Ok(PaginatedResponse::new(ids, page, limit, total))
    }

    async fn show_push_task_list(
        &self,
        req: &PushTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        let (mut query, page, limit) = Self::task_list_query(
            req.page,
            req.limit,
            req.start_time,
            req.end_time,
            req.time_zone.as_deref(),
        );
        query.status = Some(task_status_filter(req.status).to_string());
        let (logs, total) = self.push_logs(&query, ErrorContext::default()).await?;
        let ids = logs.into_iter().map(|l| l.task_id).collect();
        Ok(PaginatedResponse::new(ids, page, limit, total))
    }

    async fn domain_access_data(&self, req: &AccessStatsRequest) -> Result<StatSeries> {
        verify_mutual_exclusion(self.provider_name(), req)?;
        let grid = checked_grid(
            self.provider_name(),
            req.start_time,
            req.end_time,
            req.interval.seconds(),
        )?;
        let tz = resolve_time_zone(req.time_zone.as_deref());
        let query = Self::cdn_data_request(req, tz);
        let response = self.cdn_data(&query).await?;
        Ok(series_from_data(
            response
                .data
                .iter()
                .map(|r| (r.resource.as_str(), r.cdn_data.as_slice())),
            &req.domains,
            &query.metric,
            req.metric.is_status_code(),
            &grid,
            tz,
        ))
    }

    async fn domain_origin_data(&self, req: &OriginStatsRequest) -> Result<StatSeries> {
        let grid = checked_grid(
            self.provider_name(),
            req.start_time,
            req.end_time,
            req.interval.seconds(),
        )?;
        let tz = resolve_time_zone(req.time_zone.as_deref());
        let query = DescribeOriginDataRequest {
            start_time: format_in_time_zone(req.start_time, tz),
            end_time: format_in_time_zone(req.end_time, tz),
            metric: origin_metric(req.metric).to_string(),
            domains: req.domains.clone(),
            interval: interval(req.interval).to_string(),
            detail: true,
            area: area(req.area).to_string(),
            time_zone: utc_offset_label(tz),
        };
        let response = self.origin_data(&query).await?;
        Ok(series_from_data(
            response
                .data
                .iter()
                .map(|r| (r.resource.as_str(), r.origin_data.as_slice())),
            &req.domains,
            &query.metric,
            req.metric.is_status_code(),
            &grid,
            tz,
        ))
    }

    async fn list_top_urls(&self, req: &TopUrlRequest) -> Result<Vec<TopUrl>> {
        let tz = resolve_time_zone(None);
        let query = ListTopDataRequest {
            start_time: format_in_time_zone(req.start_time, tz),
            end_time: format_in_time_zone(req.end_time, tz),
            metric: "url".to_string(),
            filter: top_filter(req.filter).to_string(),
            domains: vec![req.domain.clone()],
            product: product(req.product).to_string(),
            area: area(req.area).to_string(),
            area_type: None,
            detail: false,
        };
        let response = self.top_data(&query).await?;
        Ok(response
            .data
            .into_iter()
            .flat_map(|top| top.detail_data)
            .map(|item| TopUrl {
                url: item.name,
                value: item.value,
            })
            .collect())
    }

    async fn domain_access_total(
        &self,
        req: &AccessTotalRequest,
    ) -> Result<BTreeMap<String, i64>> {
        if req.metric.is_status_code() {
            return Err(self.invalid_request("status code metrics have no summary"));
        }
        let stats = AccessStatsRequest {
            domains: req.domains.clone(),
            metric: req.metric,
            start_time: req.start_time,
            end_time: req.end_time,
            area: req.area,
            product: req.product,
            channel_type: req.channel_type,
            time_zone: req.time_zone.clone(),
            ..AccessStatsRequest::default()
        };
        let query = Self::cdn_data_request(&stats, resolve_time_zone(req.time_zone.as_deref()));
        let response = self.cdn_data(&query).await?;
        Ok(totals_from_data(
            response
                .data
                .iter()
                .map(|r| (r.resource.as_str(), r.cdn_data.as_slice())),
            &query.metric,
        ))
    }

    async fn domain_origin_total(
        &self,
        req: &OriginTotalRequest,
    ) -> Result<BTreeMap<String, i64>> {
        if req.metric.is_status_code() {
            return Err(self.invalid_request("status code metrics have no summary"));
        }
        let tz = resolve_time_zone(req.time_zone.as_deref());
        let query = DescribeOriginDataRequest {
            start_time: format_in_time_zone(req.start_time, tz),
            end_time: format_in_time_zone(req.end_time, tz),
            metric: origin_metric(req.metric).to_string(),
            domains: req.domains.clone(),
            interval: interval(crate::types::DataInterval::FiveMinutes).to_string(),
            detail: true,
            area: area(req.area).to_string(),
            time_zone: utc_offset_label(tz),
        };
        let response = self.origin_data(&query).await?;
        Ok(totals_from_data(
            response
                .data
                .iter()
                .map(|r| (r.resource.as_str(), r.origin_data.as_slice())),
            &query.metric,
        ))
    }

    async fn user_access_region_distribution(
        &self,
        req: &RegionDistributionRequest,
    ) -> Result<BTreeMap<String, RegionDistribution>> {
        let tz = resolve_time_zone(None);
        let query = ListTopDataRequest {
            start_time: format_in_time_zone(req.start_time, tz),
            end_time: format_in_time_zone(req.end_time, tz),
            metric: "district".to_string(),
            filter: access_metric(req.metric).to_string(),
            domains: req.domains.clone(),
            product: product(req.product).to_string(),
            area: area(req.area).to_string(),
            area_type: None,
            detail: true,
        };
        let response = self.top_data(&query).await?;
        Ok(region_from_data(&response, req.area))
    }
}
