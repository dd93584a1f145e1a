use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    AccessStatsRequest, AccessTotalRequest, CreateDomainRequest, CreateDomainResponse,
    DomainDetail, DomainStatusListRequest, OriginStatsRequest, OriginTotalRequest,
    PaginatedResponse, ProviderMetadata, PurgePathRequest, PurgeTaskListRequest,
    PurgeUrlsRequest, PushTaskListRequest, PushUrlsRequest, RegionDistribution,
    RegionDistributionRequest, StatSeries, TaskHandle, TaskStatusResponse, TopUrl, TopUrlRequest,
    UpdateDomainRequest, VerifyDomainRecordRequest, VerifyRecord,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 域名（用于 `DomainNotFound`）
    pub domain: Option<String>,
    /// 任务 ID（用于 `TaskNotFound`）
    pub task_id: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            task_id: None,
        }
    }

    pub fn task(task_id: &str) -> Self {
        Self {
            domain: None,
            task_id: Some(task_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：本地参数错误
    fn invalid_request(&self, detail: impl ToString) -> ProviderError {
        ProviderError::InvalidRequest {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：厂商不支持的能力
    fn not_implemented(&self, operation: &str) -> ProviderError {
        ProviderError::NotImplemented {
            provider: self.provider_name().to_string(),
            operation: operation.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::VendorError {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 域名生命周期所需的最小操作集
///
/// [`DomainLifecycle`](crate::DomainLifecycle) 只依赖这一组方法，
/// 测试中可以用内存实现替换真实厂商。
#[async_trait]
pub trait DomainOperations: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 按域名查询详情，不存在时返回 `DomainNotFound`
    async fn show_domain_detail(&self, domain: &str) -> Result<DomainDetail>;

    /// 创建加速域名
    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse>;

    /// 按 `req.action` 更新域名配置
    async fn update_domain(&self, req: &UpdateDomainRequest) -> Result<()>;

    /// 启用域名
    async fn enable_domain(&self, detail: &DomainDetail) -> Result<()>;

    /// 停用域名
    async fn disable_domain(&self, detail: &DomainDetail) -> Result<()>;

    /// 删除域名
    async fn delete_domain(&self, detail: &DomainDetail) -> Result<()>;
}

/// CDN 提供商 Trait
#[async_trait]
pub trait CdnProvider: DomainOperations {
    /// 获取 Provider 元数据（类型级别）
    ///
    /// 此方法不需要实例，可以在创建 Provider 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 按状态分页列出域名
    async fn show_domain_status_list(
        &self,
        req: &DomainStatusListRequest,
    ) -> Result<PaginatedResponse<String>>;

    /// 生成域名归属权验证记录
    async fn create_verify_record(&self, domain: &str) -> Result<VerifyRecord>;

    /// 校验域名归属权
    async fn verify_domain_record(&self, req: &VerifyDomainRecordRequest) -> Result<bool>;

    /// 刷新目录
    async fn purge_path_cache(&self, req: &PurgePathRequest) -> Result<TaskHandle>;

    /// 刷新 URL
    async fn purge_urls_cache(&self, req: &PurgeUrlsRequest) -> Result<TaskHandle>;

    /// 预热 URL
    async fn push_urls_cache(&self, req: &PushUrlsRequest) -> Result<TaskHandle>;

    async fn show_purge_task_status(&self, task_id: &str) -> Result<TaskStatusResponse>;

    async fn show_push_task_status(&self, task_id: &str) -> Result<TaskStatusResponse>;

    /// 刷新任务 ID 列表
    async fn show_purge_task_list(
        &self,
        req: &PurgeTaskListRequest,
    ) -> Result<PaginatedResponse<String>>;

    /// 预热任务 ID 列表
    async fn show_push_task_list(
        &self,
        req: &PushTaskListRequest,
    ) -> Result<PaginatedResponse<String>>;

    /// 访问数据时间序列
    ///
    /// 普通指标每个请求域名都有完整的零填充时间网格；
    /// 状态码指标按 `domain#code` 展开，只包含实际返回的状态码。
    async fn domain_access_data(&self, req: &AccessStatsRequest) -> Result<StatSeries>;

    /// 回源数据时间序列
    async fn domain_origin_data(&self, req: &OriginStatsRequest) -> Result<StatSeries>;

    async fn list_top_urls(&self, req: &TopUrlRequest) -> Result<Vec<TopUrl>>;

    /// 访问数据汇总，`domain -> value`
    async fn domain_access_total(&self, req: &AccessTotalRequest)
    -> Result<BTreeMap<String, i64>>;

    /// 回源数据汇总，`domain -> value`
    async fn domain_origin_total(&self, req: &OriginTotalRequest)
    -> Result<BTreeMap<String, i64>>;

    /// 用户访问境内/境外分布
    async fn user_access_region_distribution(
        &self,
        req: &RegionDistributionRequest,
    ) -> Result<BTreeMap<String, RegionDistribution>>;

    /// 批量查询任务状态
    ///
    /// 默认实现并发调用 `show_purge_task_status()`，逐个返回结果。
    async fn batch_show_purge_task_status(
        &self,
        task_ids: &[String],
    ) -> Vec<Result<TaskStatusResponse>> {
        let futures: Vec<_> = task_ids
            .iter()
            .map(|id| self.show_purge_task_status(id))
            .collect();
        futures::future::join_all(futures).await
    }
}
