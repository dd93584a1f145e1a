//! 华为云 `CdnProvider` trait 实现

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{ProviderError, Result};
use crate::metrics::{
    checked_grid, index_aligned, place_by_index, status_code_key, verify_mutual_exclusion,
    zero_filled,
};
use crate::traits::{CdnProvider, DomainOperations, ErrorContext, ProviderErrorMapper};
use crate::types::{
    AccessMetric, AccessStatsRequest, AccessTotalRequest, AreaCode, CountryCode,
    CreateDomainRequest, CreateDomainResponse, DomainDetail, DomainStatusListRequest,
    IspCode, OriginStatsRequest, OriginTotalRequest, PaginatedResponse,
    ProviderFeatures, ProviderLimits, ProviderMetadata, ProviderType, ProvinceCode,
    PurgePathRequest, PurgeTaskListRequest, PurgeUrlsRequest, PushTaskListRequest,
    PushUrlsRequest, RegionDistribution, RegionDistributionRequest, StatSeries, StatisticType,
    TaskHandle, TaskStatusResponse, TopUrl, TopUrlRequest, UpdateDomainRequest,
    VerifyDomainRecordRequest, VerifyRecord,
};
use crate::utils::time::normalize_page;

use super::builder::{build_configs, create_sources, steps};
use super::http::build_query;
use super::mapping::{
    access_stat_type, all_countries_except, area_from_service_area, business_type,
    channel_from_business_type, country, domain_status, domain_status_filter, http_protocol,
    ip_version, isp, location_action, origin_stat_type, province, purge_mode, service_area,
    stats_action, task_file_type, task_status, task_status_filter, top_url_stat_type,
};
use super::types::{
    Configs, CreateDomainBody, CreateDomainItem, DomainResponse, HistoryTaskDetailResponse,
    HistoryTasksResponse, HuaweicloudDomain, ListDomainsResponse, ModifyDomainConfigRequest,
    PreheatingTask, PreheatingTaskBody, PreheatingTaskResponse, RefreshTask, RefreshTaskBody,
    RefreshTaskResponse, StatsResponse, TopUrlResponse,
};
use super::{HuaweicloudProvider, MAX_PAGE_SIZE};

const DOMAINS_PATH: &str = "/v1.0/cdn/domains";
const REFRESH_TASKS_PATH: &str = "/v1.0/cdn/content/refresh-tasks";
const PREHEATING_TASKS_PATH: &str = "/v1.0/cdn/content/preheating-tasks";
const HISTORY_TASKS_PATH: &str = "/v1.0/cdn/historytasks";
const DOMAIN_STATS_PATH: &str = "/v1.0/cdn/statistics/domain-stats";
const DOMAIN_LOCATION_STATS_PATH: &str = "/v1.0/cdn/statistics/domain-location-stats";
const TOP_URL_PATH: &str = "/v1.0/cdn/statistics/top-url";

/// 汇总查询使用的固定粒度（秒）
const SUMMARY_INTERVAL: i64 = 300;

/// Unix 秒 -> 毫秒
const fn millis(seconds: i64) -> i64 {
    seconds.saturating_mul(1000)
}

impl HuaweicloudProvider {
    /// 将华为云域名对象转换为统一详情，时间由毫秒换算为秒
    pub(crate) fn convert_domain(domain: HuaweicloudDomain, fallback_name: &str) -> DomainDetail {
        DomainDetail {
            domain_id: domain.id.unwrap_or_default(),
            domain: domain
                .domain_name
                .unwrap_or_else(|| fallback_name.to_string()),
            area_code: Some(area_from_service_area(
                domain.service_area.as_deref().unwrap_or_default(),
            )),
            channel_type: channel_from_business_type(
                domain.business_type.as_deref().unwrap_or_default(),
            ),
            cname: domain.cname.unwrap_or_default(),
            status: domain_status(domain.domain_status.as_deref().unwrap_or_default()),
            create_time: domain.create_time.unwrap_or_default() / 1000,
            update_time: domain
                .update_time
                .or(domain.modify_time)
                .unwrap_or_default()
                / 1000,
        }
    }

    /// 访问数据的查询路径与参数
    ///
    /// 命中类指标或没有任何细分条件时走域名统计（按服务区域），否则走地区运营商统计。
    fn access_stats_query(
        req: &AccessStatsRequest,
    ) -> (&'static str, Vec<(&'static str, String)>) {
        let mut params = vec![
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domains.join(",")),
            ("stat_type", access_stat_type(req.metric).to_string()),
            ("interval", req.interval.seconds().to_string()),
            ("group_by", "domain".to_string()),
        ];

        let unfiltered = req.isp.is_none()
            && req.district.is_none()
            && req.ip_protocol.is_none()
            && req.protocol.is_none();
        if matches!(req.metric, AccessMetric::HitFlux | AccessMetric::HitRequest) || unfiltered {
            params.push(("action", stats_action(StatisticType::Detail).to_string()));
            params.push(("service_area", service_area(req.area).to_string()));
            return (DOMAIN_STATS_PATH, params);
        }

        params.push(("action", location_action(StatisticType::Detail).to_string()));
        let mut country_filter = None;
        match req.area {
            AreaCode::Mainland => {
                country_filter = Some(country(CountryCode::Cn).to_string());
                if let Some(district) = req.district {
                    params.push((
                        "province",
                        province(ProvinceCode::from_code(district)).to_string(),
                    ));
                }
            }
            AreaCode::Oversea => {
                country_filter = Some(match req.district {
                    Some(district) => country(CountryCode::from_code(district)).to_string(),
                    None => all_countries_except(&["cn"]),
                });
            }
            AreaCode::Global => {}
        }
        if let Some(code) = req.isp {
            params.push(("isp", isp(code).to_string()));
            if code == IspCode::Other {
                country_filter = Some(all_countries_except(&["cn"]));
            }
        }
        if let Some(country) = country_filter {
            params.push(("country", country));
        }
        if let Some(ip) = req.ip_protocol {
            params.push(("ip_version", ip_version(ip).to_string()));
        }
        if let Some(protocol) = req.protocol {
            params.push(("protocol", http_protocol(protocol).to_string()));
        }
        (DOMAIN_LOCATION_STATS_PATH, params)
    }

    async fn stats_result(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Map<String, Value>> {
        let response: StatsResponse = self
            .get(path, &build_query(params), ErrorContext::default())
            .await?;
        Ok(response.result.unwrap_or_default())
    }

    async fn history_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let path = format!("{HISTORY_TASKS_PATH}/{task_id}/detail");
        let response: HistoryTaskDetailResponse = self
            .get(&path, "page_size=1&page_number=1", ErrorContext::task(task_id))
            .await?;
        Ok(TaskStatusResponse {
            task_id: response.id.unwrap_or_else(|| task_id.to_string()),
            status: task_status(response.status.as_deref().unwrap_or_default()),
        })
    }

    async fn task_list(
        &self,
        mut params: Vec<(&'static str, String)>,
        page: i64,
        limit: i64,
        start_time: i64,
        end_time: i64,
    ) -> Result<PaginatedResponse<String>> {
        let (page, limit) = normalize_page(page, limit);
        let limit = limit.min(MAX_PAGE_SIZE);
        params.push(("page_size", limit.to_string()));
        params.push(("page_number", page.to_string()));
        if start_time != 0 {
            params.push(("start_date", millis(start_time).to_string()));
        }
        if end_time != 0 {
            params.push(("end_date", millis(end_time).to_string()));
        }

        let response: HistoryTasksResponse = self
            .get(HISTORY_TASKS_PATH, &build_query(&params), ErrorContext::default())
            .await?;
        let ids = response
            .tasks
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.id)
            .collect();
        Ok(PaginatedResponse::new(
            ids,
            page,
            limit,
            response.total.unwrap_or(0),
        ))
    }
}

// ============ 统计结果解析 ============

/// `{domain: {key: [v0, v1, ...]}}` -> 时间序列
///
/// 状态码指标按 `domain#code` 展开；其余指标为每个请求域名生成零填充网格，
/// 再按下标写入 `stat_type` 对应的数组。
fn series_from_result(
    result: &Map<String, Value>,
    domains: &[String],
    stat_type: &str,
    grid: &[i64],
) -> StatSeries {
    let is_status_code = stat_type.contains("status_code");
    let mut series = if is_status_code {
        StatSeries::new()
    } else {
        zero_filled(domains, grid)
    };

    for (domain, value) in result {
        let Some(metrics) = value.as_object() else {
            continue;
        };
        if is_status_code {
            for (code, values) in metrics {
                series.insert(
                    status_code_key(domain, code),
                    index_aligned(grid, &numbers(values)),
                );
            }
            continue;
        }
        if let Some(values) = metrics.get(stat_type) {
            let entry = series.entry(domain.clone()).or_default();
            place_by_index(entry, grid, &numbers(values));
        }
    }
    series
}

fn numbers(value: &Value) -> Vec<f64> {
    value
        .as_array()
        .map(|items| items.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect())
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation)]
fn integer(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

/// `{domain: {stat_type: n}}` -> `domain -> n`
fn totals_from_result(result: &Map<String, Value>, stat_type: &str) -> BTreeMap<String, i64> {
    result
        .iter()
        .filter_map(|(domain, value)| {
            value
                .get(stat_type)
                .map(|n| (domain.clone(), integer(n)))
        })
        .collect()
}

/// `{domain: {country: {stat_type: n}}}` -> 境内（`cn`）/境外汇总
fn region_from_result(
    result: &Map<String, Value>,
    stat_type: &str,
) -> BTreeMap<String, RegionDistribution> {
    let mut out = BTreeMap::new();
    for (domain, value) in result {
        let Some(countries) = value.as_object() else {
            continue;
        };
        let entry: &mut RegionDistribution = out.entry(domain.clone()).or_default();
        for (code, metrics) in countries {
            let Some(n) = metrics.get(stat_type).map(integer) else {
                continue;
            };
            if code == "cn" {
                entry.mainland_value += n;
            } else {
                entry.oversea_value += n;
            }
        }
    }
    out
}

#[async_trait]
impl DomainOperations for HuaweicloudProvider {
    fn id(&self) -> &'static str {
        "huaweicloud"
    }

    async fn show_domain_detail(&self, domain: &str) -> Result<DomainDetail> {
        let path = format!("/v1.0/cdn/configuration/domains/{domain}");
        let response: DomainResponse = self.get(&path, "", ErrorContext::domain(domain)).await?;
        let Some(item) = response.domain else {
            return Err(ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: domain.to_string(),
                raw_message: None,
            });
        };
        Ok(Self::convert_domain(item, domain))
    }

    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse> {
        if req.sources.is_empty() {
            return Err(self.invalid_request("sources is empty"));
        }
        let body = CreateDomainBody {
            domain: CreateDomainItem {
                domain_name: req.domain.clone(),
                business_type: business_type(req.channel_type).to_string(),
                service_area: service_area(req.area_code).to_string(),
                sources: create_sources(&req.sources),
            },
        };
        let response: DomainResponse = self
            .post(DOMAINS_PATH, &body, ErrorContext::domain(&req.domain))
            .await?;
        let domain = response.domain.unwrap_or_default();
        Ok(CreateDomainResponse {
            domain_id: domain.id,
            cname: domain.cname,
        })
    }

    async fn update_domain(&self, req: &UpdateDomainRequest) -> Result<()> {
        if steps(req.action).is_none() {
            return Err(self.not_implemented(&format!("update_domain({})", req.action)));
        }
        let configs = build_configs(req);
        if configs == Configs::default() {
            log::debug!(
                "[huaweicloud] {} produced no configs for {}, skipped",
                req.action,
                req.domain
            );
            return Ok(());
        }
        let path = format!("/v1.1/cdn/configuration/domains/{}/configs", req.domain);
        self.put(
            &path,
            Some(&ModifyDomainConfigRequest { configs }),
            ErrorContext::domain(&req.domain),
        )
        .await
    }

    async fn enable_domain(&self, detail: &DomainDetail) -> Result<()> {
        let path = format!("{DOMAINS_PATH}/{}/enable", detail.domain_id);
        self.put::<()>(&path, None, ErrorContext::domain(&detail.domain))
            .await
    }

    async fn disable_domain(&self, detail: &DomainDetail) -> Result<()> {
        let path = format!("{DOMAINS_PATH}/{}/disable", detail.domain_id);
        self.put::<()>(&path, None, ErrorContext::domain(&detail.domain))
            .await
    }

    async fn delete_domain(&self, detail: &DomainDetail) -> Result<()> {
        let path = format!("{DOMAINS_PATH}/{}", detail.domain_id);
        self.delete(&path, ErrorContext::domain(&detail.domain)).await
    }
}

#[async_trait]
impl CdnProvider for HuaweicloudProvider {
    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Huaweicloud,
            name: "华为云 CDN".to_string(),
            description: "华为云内容分发网络".to_string(),
            required_fields: ProviderType::Huaweicloud.credential_fields(),
            features: ProviderFeatures {
                delete_domain: true,
                purge: true,
                domain_verification: false,
                statistics: true,
            },
            limits: ProviderLimits {
                max_page_size_domains: MAX_PAGE_SIZE,
                max_page_size_tasks: MAX_PAGE_SIZE,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .get::<ListDomainsResponse>(
                DOMAINS_PATH,
                "page_size=1&page_number=1",
                ErrorContext::default(),
            )
            .await
        {
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
        let query = build_query(&[
            ("domain_status", domain_status_filter(req.status).to_string()),
            ("page_size", limit.to_string()),
            ("page_number", page.to_string()),
        ]);
        let response: ListDomainsResponse = self
            .get(DOMAINS_PATH, &query, ErrorContext::default())
            .await?;
        let domains = response
            .domains
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| d.domain_name)
            .collect();
        Ok(PaginatedResponse::new(
            domains,
            page,
            limit,
            response.total.unwrap_or(0),
        ))
    }

    async fn create_verify_record(&self, _domain: &str) -> Result<VerifyRecord> {
        Err(self.not_implemented("create_verify_record"))
    }

    async fn verify_domain_record(&self, _req: &VerifyDomainRecordRequest) -> Result<bool> {
        Err(self.not_implemented("verify_domain_record"))
    }

    async fn purge_path_cache(&self, req: &PurgePathRequest) -> Result<TaskHandle> {
        let body = RefreshTaskBody {
            refresh_task: RefreshTask {
                task_type: "directory".to_string(),
                mode: Some(purge_mode(req.mode).to_string()),
                zh_url_encode: req.url_encode,
                urls: req.paths.clone(),
            },
        };
        let response: RefreshTaskResponse = self
            .post(REFRESH_TASKS_PATH, &body, ErrorContext::default())
            .await?;
        response
            .refresh_task
            .map(TaskHandle::new)
            .ok_or_else(|| self.parse_error("missing refresh_task in response"))
    }

    async fn purge_urls_cache(&self, req: &PurgeUrlsRequest) -> Result<TaskHandle> {
        let body = RefreshTaskBody {
            refresh_task: RefreshTask {
                task_type: "file".to_string(),
                mode: None,
                zh_url_encode: req.url_encode,
                urls: req.urls.clone(),
            },
        };
        let response: RefreshTaskResponse = self
            .post(REFRESH_TASKS_PATH, &body, ErrorContext::default())
            .await?;
        response
            .refresh_task
            .map(TaskHandle::new)
            .ok_or_else(|| self.parse_error("missing refresh_task in response"))
    }

    async fn push_urls_cache(&self, req: &PushUrlsRequest) -> Result<TaskHandle> {
        let body = PreheatingTaskBody {
            preheating_task: PreheatingTask {
                zh_url_encode: req.url_encode,
                urls: req.urls.clone(),
            },
        };
        let response: PreheatingTaskResponse = self
            .post(PREHEATING_TASKS_PATH, &body, ErrorContext::default())
            .await?;
        response
            .preheating_task
            .map(TaskHandle::new)
            .ok_or_else(|| self.parse_error("missing preheating_task in response"))
    }

    async fn show_purge_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        self.history_task_status(task_id).await
    }

    async fn show_push_task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        self.history_task_status(task_id).await
    }

    async fn show_purge_task_list(
        &self,
        req: &PurgeTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        let params = vec![
            ("task_type", "refresh".to_string()),
            ("file_type", task_file_type(req.purge_type).to_string()),
            ("status", task_status_filter(req.status).to_string()),
        ];
        self.task_list(params, req.page, req.limit, req.start_time, req.end_time)
            .await
    }

    async fn show_push_task_list(
        &self,
        req: &PushTaskListRequest,
    ) -> Result<PaginatedResponse<String>> {
        let params = vec![
            ("task_type", "preheating".to_string()),
            ("status", task_status_filter(req.status).to_string()),
        ];
        self.task_list(params, req.page, req.limit, req.start_time, req.end_time)
            .await
    }

    async fn domain_access_data(&self, req: &AccessStatsRequest) -> Result<StatSeries> {
        verify_mutual_exclusion(self.provider_name(), req)?;
        let grid = checked_grid(
            self.provider_name(),
            req.start_time,
            req.end_time,
            req.interval.seconds(),
        )?;
        let (path, params) = Self::access_stats_query(req);
        let result = self.stats_result(path, &params).await?;
        Ok(series_from_result(
            &result,
            &req.domains,
            access_stat_type(req.metric),
            &grid,
        ))
    }

    async fn domain_origin_data(&self, req: &OriginStatsRequest) -> Result<StatSeries> {
        let grid = checked_grid(
            self.provider_name(),
            req.start_time,
            req.end_time,
            req.interval.seconds(),
        )?;
        let stat_type = origin_stat_type(req.metric);
        let params = vec![
            ("action", stats_action(StatisticType::Detail).to_string()),
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domains.join(",")),
            ("stat_type", stat_type.to_string()),
            ("interval", req.interval.seconds().to_string()),
            ("group_by", "domain".to_string()),
        ];
        let result = self.stats_result(DOMAIN_STATS_PATH, &params).await?;
        Ok(series_from_result(&result, &req.domains, stat_type, &grid))
    }

    async fn list_top_urls(&self, req: &TopUrlRequest) -> Result<Vec<TopUrl>> {
        let query = build_query(&[
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domain.clone()),
            ("stat_type", top_url_stat_type(req.filter).to_string()),
            ("service_area", service_area(req.area).to_string()),
        ]);
        let response: TopUrlResponse = self
            .get(TOP_URL_PATH, &query, ErrorContext::domain(&req.domain))
            .await?;
        Ok(response
            .top_url_summary
            .unwrap_or_default()
            .into_iter()
            .map(|item| TopUrl {
                url: item.url.unwrap_or_default(),
                value: item.value.unwrap_or_default(),
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
        let stat_type = access_stat_type(req.metric);
        let params = vec![
            ("action", stats_action(StatisticType::Sum).to_string()),
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domains.join(",")),
            ("stat_type", stat_type.to_string()),
            ("interval", SUMMARY_INTERVAL.to_string()),
            ("group_by", "domain".to_string()),
            ("service_area", service_area(req.area).to_string()),
        ];
        let result = self.stats_result(DOMAIN_STATS_PATH, &params).await?;
        Ok(totals_from_result(&result, stat_type))
    }

    async fn domain_origin_total(
        &self,
        req: &OriginTotalRequest,
    ) -> Result<BTreeMap<String, i64>> {
        if req.metric.is_status_code() {
            return Err(self.invalid_request("status code metrics have no summary"));
        }
        let stat_type = origin_stat_type(req.metric);
        let params = vec![
            ("action", stats_action(StatisticType::Sum).to_string()),
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domains.join(",")),
            ("stat_type", stat_type.to_string()),
            ("interval", SUMMARY_INTERVAL.to_string()),
            ("group_by", "domain".to_string()),
        ];
        let result = self.stats_result(DOMAIN_STATS_PATH, &params).await?;
        Ok(totals_from_result(&result, stat_type))
    }

    async fn user_access_region_distribution(
        &self,
        req: &RegionDistributionRequest,
    ) -> Result<BTreeMap<String, RegionDistribution>> {
        let stat_type = access_stat_type(req.metric);
        let params = vec![
            ("action", location_action(StatisticType::Sum).to_string()),
            ("start_time", millis(req.start_time).to_string()),
            ("end_time", millis(req.end_time).to_string()),
            ("domain_name", req.domains.join(",")),
            ("stat_type", stat_type.to_string()),
            ("interval", SUMMARY_INTERVAL.to_string()),
            ("group_by", "domain,country".to_string()),
            ("country", "all".to_string()),
        ];
        let result = self
            .stats_result(DOMAIN_LOCATION_STATS_PATH, &params)
            .await?;
        Ok(region_from_result(&result, stat_type))
    }
}
