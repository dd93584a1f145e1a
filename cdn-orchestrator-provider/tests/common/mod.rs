//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cdn_orchestrator_provider::{
    AreaCode, CdnProvider, CreateDomainRequest, CreateDomainResponse, DomainDetail,
    DomainOperations, DomainStatus, OriginServer, ProviderCredentials, ProviderError, Result,
    UpdateAction, UpdateDomainRequest, create_provider,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 单源站的创建请求
pub fn create_request(domain: &str, area_code: AreaCode) -> CreateDomainRequest {
    CreateDomainRequest {
        domain: domain.to_string(),
        area_code,
        sources: vec![OriginServer {
            address: "192.0.2.10".to_string(),
            http_port: 80,
            https_port: 443,
            ..OriginServer::default()
        }],
        ..CreateDomainRequest::default()
    }
}

// ============ Mock Provider ============

/// Mock provider 记录的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Detail(String),
    Create(String),
    Update(UpdateAction, AreaCode),
    Enable(String),
    Disable(String),
    Delete(String),
}

#[derive(Default)]
struct MockState {
    domains: Vec<DomainDetail>,
    calls: Vec<Call>,
    /// 区域更新的预设结果，按调用顺序弹出；为空时成功
    area_results: VecDeque<Result<()>>,
    /// 详情查询不返回区域
    hide_area: bool,
}

/// 内存中的 `DomainOperations` 实现
#[derive(Default)]
pub struct MockProvider {
    state: Mutex<MockState>,
}

impl MockProvider {
    pub fn with_domain(detail: DomainDetail) -> Self {
        let provider = Self::default();
        provider.lock().domains.push(detail);
        provider
    }

    /// 像网宿一样，查询结果不带加速区域
    pub fn hiding_area() -> Self {
        let provider = Self::default();
        provider.lock().hide_area = true;
        provider
    }

    /// 预设接下来几次区域更新的结果
    pub fn script_area_results(&self, results: Vec<Result<()>>) {
        self.lock().area_results.extend(results);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn domain(&self, name: &str) -> Option<DomainDetail> {
        self.lock().domains.iter().find(|d| d.domain == name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn not_found(domain: &str) -> ProviderError {
        ProviderError::DomainNotFound {
            provider: "mock".to_string(),
            domain: domain.to_string(),
            raw_message: None,
        }
    }

    fn set_status(&self, domain: &str, status: DomainStatus) {
        let mut state = self.lock();
        if let Some(d) = state.domains.iter_mut().find(|d| d.domain == domain) {
            d.status = status;
        }
    }
}

#[async_trait]
impl DomainOperations for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn show_domain_detail(&self, domain: &str) -> Result<DomainDetail> {
        let hide_area = {
            let mut state = self.lock();
            state.calls.push(Call::Detail(domain.to_string()));
            state.hide_area
        };
        let mut detail = self.domain(domain).ok_or_else(|| Self::not_found(domain))?;
        if hide_area {
            detail.area_code = None;
        }
        Ok(detail)
    }

    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse> {
        let mut state = self.lock();
        state.calls.push(Call::Create(req.domain.clone()));
        state.domains.push(DomainDetail {
            domain_id: format!("id-{}", req.domain),
            domain: req.domain.clone(),
            area_code: Some(req.area_code),
            status: DomainStatus::Deploying,
            ..DomainDetail::default()
        });
        Ok(CreateDomainResponse {
            domain_id: Some(format!("id-{}", req.domain)),
            cname: Some(format!("{}.cdn.example.net", req.domain)),
        })
    }

    async fn update_domain(&self, req: &UpdateDomainRequest) -> Result<()> {
        let area = req
            .config
            .base
            .as_ref()
            .map(|b| b.area_code)
            .unwrap_or_default();
        let mut state = self.lock();
        state.calls.push(Call::Update(req.action, area));
        if req.action == UpdateAction::Area && state.hide_area {
            return Err(ProviderError::NotImplemented {
                provider: "mock".to_string(),
                operation: "update_domain(area)".to_string(),
            });
        }
        if req.action == UpdateAction::Area {
            let result = state.area_results.pop_front().unwrap_or(Ok(()));
            if result.is_ok()
                && let Some(d) = state.domains.iter_mut().find(|d| d.domain == req.domain)
            {
                d.area_code = Some(area);
            }
            return result;
        }
        Ok(())
    }

    async fn enable_domain(&self, detail: &DomainDetail) -> Result<()> {
        self.lock().calls.push(Call::Enable(detail.domain.clone()));
        self.set_status(&detail.domain, DomainStatus::Deployed);
        Ok(())
    }

    async fn disable_domain(&self, detail: &DomainDetail) -> Result<()> {
        self.lock().calls.push(Call::Disable(detail.domain.clone()));
        self.set_status(&detail.domain, DomainStatus::Stopped);
        Ok(())
    }

    async fn delete_domain(&self, detail: &DomainDetail) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Delete(detail.domain.clone()));
        state.domains.retain(|d| d.domain != detail.domain);
        Ok(())
    }
}

// ============ 真实厂商 ============

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn CdnProvider>,
    pub domain: String,
}

impl TestContext {
    fn from_env(credentials: ProviderCredentials) -> Option<Self> {
        let domain = env::var("TEST_CDN_DOMAIN").ok()?;
        Some(Self {
            provider: create_provider(credentials),
            domain,
        })
    }

    /// 创建 Huaweicloud 测试上下文
    pub fn huaweicloud() -> Option<Self> {
        Self::from_env(ProviderCredentials::Huaweicloud {
            access_key_id: env::var("HUAWEICLOUD_ACCESS_KEY_ID").ok()?,
            secret_access_key: env::var("HUAWEICLOUD_SECRET_ACCESS_KEY").ok()?,
        })
    }

    /// 创建腾讯云测试上下文
    pub fn tencent() -> Option<Self> {
        Self::from_env(ProviderCredentials::Tencent {
            secret_id: env::var("TENCENT_SECRET_ID").ok()?,
            secret_key: env::var("TENCENT_SECRET_KEY").ok()?,
        })
    }

    /// 创建网宿测试上下文
    pub fn wangsu() -> Option<Self> {
        Self::from_env(ProviderCredentials::Wangsu {
            access_key_id: env::var("WANGSU_ACCESS_KEY_ID").ok()?,
            secret_access_key: env::var("WANGSU_SECRET_ACCESS_KEY").ok()?,
        })
    }
}
