//! 域名生命周期控制
//!
//! 状态：`Unregistered -> Deploying -> Deployed -> Stopping -> Stopped -> Deleting -> Deleted`，
//! `Deploying` 可转入 `Failed`。`Deleted` 与 `Failed` 为终态。
//!
//! 区域迁移 X -> Y（X != Y）：
//! 1. X 不是全球时，同步把区域切到全球；
//! 2. Y 是全球则结束；
//! 3. 否则在后台任务中最多尝试 `max_attempts` 次，每次先等待 `retry_interval`
//!    再切到 Y，首次成功即停止。后台任务以 [`MigrationHandle`] 交给调用方。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::error::{ProviderError, Result};
use crate::traits::DomainOperations;
use crate::types::{
    AreaCode, CreateDomainRequest, CreateDomainResponse, DomainDetail, DomainStatus,
    UpdateDomainRequest,
};

/// 后台迁移重试耗尽后的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExhaustedPolicy {
    /// 记录日志，返回 [`MigrationOutcome::Abandoned`]
    #[default]
    FailSilent,
    /// 返回 [`ProviderError::MigrationFailed`]
    FailLoud,
}

/// 区域迁移重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPolicy {
    pub max_attempts: u32,
    pub retry_interval: Duration,
    pub on_exhausted: ExhaustedPolicy,
}

impl Default for MigrationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_interval: Duration::from_secs(60),
            on_exhausted: ExhaustedPolicy::FailSilent,
        }
    }
}

/// 后台迁移结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationOutcome {
    /// 第 `attempts` 次尝试成功切到目标区域
    Converged { attempts: u32 },
    /// 重试耗尽，域名停留在全球
    Abandoned { attempts: u32, last_error: String },
}

/// 后台区域迁移任务句柄
///
/// 丢弃句柄不会取消任务。
#[derive(Debug)]
pub struct MigrationHandle {
    provider: &'static str,
    domain: String,
    target: AreaCode,
    handle: JoinHandle<Result<MigrationOutcome>>,
}

impl MigrationHandle {
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub const fn target(&self) -> AreaCode {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 取消后台任务
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// 等待迁移结束
    pub async fn wait(self) -> Result<MigrationOutcome> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ProviderError::MigrationFailed {
                provider: self.provider.to_string(),
                domain: self.domain,
                target_area: self.target.code(),
                attempts: 0,
                last_error: e.to_string(),
            }),
        }
    }
}

/// `create_or_reconcile` 对域名做了什么
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// 域名不存在，已创建
    Created(CreateDomainResponse),
    /// 域名已存在；`enabled` 表示是否先启用了停用中的域名
    Reused { enabled: bool },
}

/// `create_or_reconcile` 的结果
#[derive(Debug)]
pub struct Reconciliation {
    pub action: ReconcileAction,
    /// 需要后台迁移时的任务句柄
    pub migration: Option<MigrationHandle>,
}

/// 域名生命周期控制器
pub struct DomainLifecycle<P: DomainOperations + ?Sized + 'static> {
    provider: Arc<P>,
    policy: MigrationPolicy,
}

impl<P: DomainOperations + ?Sized + 'static> DomainLifecycle<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            policy: MigrationPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: MigrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn policy(&self) -> &MigrationPolicy {
        &self.policy
    }

    /// 创建域名，或复用已存在的域名并调整到期望区域
    ///
    /// 对已存在的域名不会再次发起创建。
    /// 源站列表只在需要创建时校验，复用已有域名不要求源站。
    pub async fn create_or_reconcile(&self, req: &CreateDomainRequest) -> Result<Reconciliation> {
        let detail = match self.provider.show_domain_detail(&req.domain).await {
            Ok(detail) => detail,
            Err(ProviderError::DomainNotFound { .. }) => {
                if req.sources.is_empty() {
                    return Err(ProviderError::InvalidRequest {
                        provider: self.provider.id().to_string(),
                        detail: "sources is empty".to_string(),
                    });
                }
                log::info!(
                    "[{}] Domain {} not found, creating",
                    self.provider.id(),
                    req.domain
                );
                let created = self.provider.create_domain(req).await?;
                return Ok(Reconciliation {
                    action: ReconcileAction::Created(created),
                    migration: None,
                });
            }
            Err(e) => return Err(e),
        };

        if detail.status.is_terminal() {
            log::warn!(
                "[{}] Domain {} is in terminal state {:?}, reconciling anyway",
                self.provider.id(),
                detail.domain,
                detail.status
            );
        }

        let enabled = if detail.status == DomainStatus::Stopped {
            self.provider.enable_domain(&detail).await?;
            true
        } else {
            false
        };

        let migration = match detail.area_code {
            Some(current) => self.migrate_area(&req.domain, current, req.area_code).await?,
            None => {
                log::debug!(
                    "[{}] Area of {} is not reported, skipping area reconciliation",
                    self.provider.id(),
                    req.domain
                );
                None
            }
        };

        Ok(Reconciliation {
            action: ReconcileAction::Reused { enabled },
            migration,
        })
    }

    /// 区域迁移
    ///
    /// 返回 `None` 表示已同步完成（或无需迁移）。
    pub async fn migrate_area(
        &self,
        domain: &str,
        from: AreaCode,
        to: AreaCode,
    ) -> Result<Option<MigrationHandle>> {
        if from == to {
            return Ok(None);
        }

        if from != AreaCode::Global {
            self.provider
                .update_domain(&UpdateDomainRequest::area(domain, AreaCode::Global))
                .await?;
        }

        if to == AreaCode::Global {
            return Ok(None);
        }

        Ok(Some(self.spawn_migration(domain, to)))
    }

    fn spawn_migration(&self, domain: &str, target: AreaCode) -> MigrationHandle {
        let provider = Arc::clone(&self.provider);
        let policy = self.policy;
        let request = UpdateDomainRequest::area(domain, target);
        let provider_name = provider.id();
        let task_domain = domain.to_string();

        let handle = tokio::spawn(async move {
            let mut last_error = String::new();
            for attempt in 1..=policy.max_attempts {
                tokio::time::sleep(policy.retry_interval).await;
                match provider.update_domain(&request).await {
                    Ok(()) => {
                        log::info!(
                            "[{provider_name}] Domain {task_domain} migrated to {target:?} (attempt {attempt})"
                        );
                        return Ok(MigrationOutcome::Converged { attempts: attempt });
                    }
                    Err(e) => {
                        log::warn!(
                            "[{provider_name}] Migrating {task_domain} to {target:?} failed (attempt {attempt}/{}): {e}",
                            policy.max_attempts
                        );
                        last_error = e.to_string();
                    }
                }
            }

            match policy.on_exhausted {
                ExhaustedPolicy::FailSilent => {
                    log::warn!(
                        "[{provider_name}] Giving up migrating {task_domain} to {target:?}, domain stays global"
                    );
                    Ok(MigrationOutcome::Abandoned {
                        attempts: policy.max_attempts,
                        last_error,
                    })
                }
                ExhaustedPolicy::FailLoud => Err(ProviderError::MigrationFailed {
                    provider: provider_name.to_string(),
                    domain: task_domain,
                    target_area: target.code(),
                    attempts: policy.max_attempts,
                    last_error,
                }),
            }
        });

        MigrationHandle {
            provider: provider_name,
            domain: domain.to_string(),
            target,
            handle,
        }
    }

    /// 启用域名
    pub async fn enable(&self, domain: &str) -> Result<()> {
        let detail = self.provider.show_domain_detail(domain).await?;
        self.provider.enable_domain(&detail).await
    }

    /// 停用域名
    pub async fn disable(&self, domain: &str) -> Result<()> {
        let detail = self.provider.show_domain_detail(domain).await?;
        self.provider.disable_domain(&detail).await
    }

    /// 删除域名，域名不存在视为成功
    pub async fn delete(&self, domain: &str) -> Result<()> {
        let detail = match self.provider.show_domain_detail(domain).await {
            Ok(detail) => detail,
            Err(ProviderError::DomainNotFound { .. }) => {
                log::debug!(
                    "[{}] Domain {domain} already absent, nothing to delete",
                    self.provider.id()
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        match self.provider.delete_domain(&detail).await {
            Err(ProviderError::DomainNotFound { .. }) => Ok(()),
            other => other,
        }
    }

    /// 查询域名详情
    pub async fn detail(&self, domain: &str) -> Result<DomainDetail> {
        self.provider.show_domain_detail(domain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let p = MigrationPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.retry_interval, Duration::from_secs(60));
        assert_eq!(p.on_exhausted, ExhaustedPolicy::FailSilent);
    }
}
