//! Tencent Cloud CDN Provider integration test
//!
//! Operation mode:
//! ```bash
//! TENCENT_SECRET_ID=xxx TENCENT_SECRET_KEY=xxx TEST_CDN_DOMAIN=cdn.example.com \
//!     cargo test -p cdn-orchestrator-provider --test tencent_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use cdn_orchestrator_provider::{
    AccessStatsRequest, DataInterval, DomainStatus, DomainStatusListRequest, ProviderError,
    UpdateAction, UpdateDomainRequest,
};
use common::TestContext;

// ============ Basic Test ============

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_validate_credentials() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let valid = require_ok!(
        ctx.provider.validate_credentials().await,
        "validate_credentials 调用失败"
    );
    assert!(valid, "凭证应该有效");

    println!("✓ validate_credentials 测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_show_domain_detail() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let detail = require_ok!(
        ctx.provider.show_domain_detail(&ctx.domain).await,
        "show_domain_detail 调用失败"
    );
    assert_eq!(detail.domain, ctx.domain, "域名名称不匹配");
    assert!(!detail.cname.is_empty(), "CNAME 不应为空");

    println!("✓ show_domain_detail 测试通过: {} ({:?})", detail.cname, detail.status);
}

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_missing_domain() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let r = ctx
        .provider
        .show_domain_detail("missing-cdn-domain.invalid")
        .await;
    assert!(
        matches!(&r, Err(ProviderError::DomainNotFound { .. })),
        "unexpected result: {r:?}"
    );

    println!("✓ 不存在的域名返回 DomainNotFound");
}

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_domain_status_list() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let page = require_ok!(
        ctx.provider
            .show_domain_status_list(&DomainStatusListRequest {
                page: 1,
                limit: 20,
                status: DomainStatus::Deployed,
            })
            .await,
        "show_domain_status_list 调用失败"
    );
    assert!(page.items.len() <= 20, "单页数量超过 limit");

    println!(
        "✓ show_domain_status_list 测试通过，共 {} 个已部署域名",
        page.total_count
    );
}

// ============ Config Test ============

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_empty_recommend_update() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let req = UpdateDomainRequest::new(
        UpdateAction::Recommend,
        ctx.domain.clone(),
        Default::default(),
    );
    require_ok!(
        ctx.provider.update_domain(&req).await,
        "空配置的推荐更新应直接跳过"
    );

    println!("✓ 空推荐配置测试通过");
}

// ============ Statistics Test ============

#[tokio::test]
#[ignore = "integration test: requires TENCENT_SECRET_ID, TENCENT_SECRET_KEY and TEST_CDN_DOMAIN"]
async fn test_tencent_access_data_grid() {
    skip_if_no_credentials!("TENCENT_SECRET_ID", "TENCENT_SECRET_KEY", "TEST_CDN_DOMAIN");

    let ctx = require_some!(TestContext::tencent(), "创建测试上下文失败");
    let end = chrono::Utc::now().timestamp() / 300 * 300;
    let req = AccessStatsRequest {
        domains: vec![ctx.domain.clone()],
        start_time: end - 3600,
        end_time: end,
        interval: DataInterval::FiveMinutes,
        ..AccessStatsRequest::default()
    };
    let series = require_ok!(
        ctx.provider.domain_access_data(&req).await,
        "domain_access_data 调用失败"
    );
    let points = require_some!(series.get(&ctx.domain), "缺少请求域名的序列");
    assert_eq!(points.len(), 12, "一小时五分钟粒度应有 12 个点");

    println!("✓ domain_access_data 测试通过");
}
