//! 域名数据服务
//! 管理域名设置的拉取生命周期（idle → fetching → fetched/stale）与管理员授权判定

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::{
    domain::{admin_from_owner, parse_settings, AdminStatus, DomainSettings},
    infrastructure::storage::DomainStorage,
};

/// 对外暴露的状态快照
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainDataSnapshot {
    pub domain: String,
    /// 兼容旧接口的布尔视图：仅 `adminStatus == authorized` 时为 true
    pub is_admin: bool,
    pub admin_status: AdminStatus,
    /// 首次成功拉取前为 null，之后保留最后一次成功结果
    pub domain_settings: Option<DomainSettings>,
    pub is_domain_data_fetching: bool,
    /// 粘滞标志：同一域名一旦拉取成功就不再被后续重拉清除
    pub is_domain_data_fetched: bool,
}

#[derive(Debug)]
struct DomainDataState {
    admin_status: AdminStatus,
    settings: Option<DomainSettings>,
    /// 最近一次上报的已连接身份
    account: Option<String>,
    is_fetching: bool,
    is_fetched: bool,
    /// 已写入状态的最新请求代号，更旧代号的响应不允许覆盖
    written_generation: u64,
}

/// 域名数据控制器
///
/// 域名在构造时解析一次；设置只会被成功解析的结果整体替换，
/// 拉取失败时保留上一次的值（不自动重试，重试通过手动触发器）。
pub struct DomainDataService {
    domain: String,
    storage: Arc<dyn DomainStorage>,
    state: RwLock<DomainDataState>,
    /// 拉取请求代号，单调递增
    generation: AtomicU64,
    /// 在途拉取计数，并发重拉时据此正确清除 fetching 标志
    in_flight: AtomicU64,
}

impl DomainDataService {
    pub fn new(domain: String, storage: Arc<dyn DomainStorage>) -> Self {
        Self {
            domain,
            storage,
            state: RwLock::new(DomainDataState {
                admin_status: AdminStatus::Unknown,
                settings: None,
                account: None,
                is_fetching: false,
                is_fetched: false,
                written_generation: 0,
            }),
            generation: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// 手动重拉触发器，语义与拉取效果一致
    pub async fn trigger_domain_data(&self, chain_id: Option<u64>) {
        self.fetch_domain_data(chain_id).await;
    }

    /// 拉取效果
    ///
    /// 仅当网络标识和已解析域名都存在时才执行。失败只记日志，
    /// `settings` 与 `is_fetched` 保持不变，调用方据此感知陈旧数据。
    pub async fn fetch_domain_data(&self, chain_id: Option<u64>) {
        let Some(chain_id) = chain_id else {
            tracing::debug!("No network id yet, skipping domain data fetch");
            return;
        };
        if self.domain.is_empty() {
            tracing::debug!("No domain context, skipping domain data fetch");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.write().await.is_fetching = true;

        let result = self.storage.get_data(&self.domain).await;

        let mut state = self.state.write().await;
        match result {
            Ok(record) => {
                // 代号检查：只允许比已写入状态更新的请求落盘，陈旧响应直接丢弃
                if generation > state.written_generation {
                    state.written_generation = generation;

                    // 空负载等价于空对象，走默认值且不告警
                    let raw = if record.info.is_empty() {
                        "{}"
                    } else {
                        record.info.as_str()
                    };
                    let mut settings = parse_settings(raw, chain_id);
                    settings.admin = admin_from_owner(&record.owner);

                    // 设置变化即重新判定授权（连接身份沿用最近一次上报值）
                    state.admin_status = state
                        .admin_status
                        .evaluate(state.account.as_deref(), &settings.admin);
                    state.settings = Some(settings);
                    state.is_fetched = true;

                    tracing::info!(
                        domain = %self.domain,
                        chain_id,
                        generation,
                        "Domain data fetched"
                    );
                } else {
                    tracing::debug!(
                        generation,
                        written_generation = state.written_generation,
                        "Discarding stale domain data response"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    domain = %self.domain,
                    chain_id,
                    error = %e,
                    "Failed to fetch domain data, keeping previous settings"
                );
            }
        }

        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            state.is_fetching = false;
        }
    }

    /// 授权效果：已连接身份变化时重新判定
    ///
    /// 传 None 表示"本次请求未携带身份"，沿用之前的身份与状态
    pub async fn set_account(&self, account: Option<String>) {
        let mut state = self.state.write().await;
        if let Some(account) = account {
            state.account = Some(account);
        }

        let admin = state
            .settings
            .as_ref()
            .map(|s| s.admin.clone())
            .unwrap_or_default();
        state.admin_status = state.admin_status.evaluate(state.account.as_deref(), &admin);
    }

    pub async fn snapshot(&self) -> DomainDataSnapshot {
        let state = self.state.read().await;
        DomainDataSnapshot {
            domain: self.domain.clone(),
            is_admin: state.admin_status.is_admin(),
            admin_status: state.admin_status,
            domain_settings: state.settings.clone(),
            is_domain_data_fetching: state.is_fetching,
            is_domain_data_fetched: state.is_fetched,
        }
    }
}
