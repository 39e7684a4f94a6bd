//! 域名数据集成测试套件
//!
//! 测试覆盖：
//! - ✅ 域名解析 → 拉取 → 授权的完整链路
//! - ✅ 设置的整体替换语义（重拉不做字段级合并）
//! - ✅ 拉取失败后的陈旧数据保留
//! - ✅ 配置加载与校验
//!
//! 运行方式：
//! ```bash
//! cargo test --test domain_data_tests
//! ```

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use domaincore::{
    domain::{resolve_current_domain, AdminStatus, ZERO_ADDRESS},
    infrastructure::storage::{DomainRecord, DomainStorage, StorageError},
    service::domain_data::DomainDataService,
};
use tokio::sync::Mutex;

// ============ 测试辅助 ============

/// 可在运行中更换响应的内存注册表
struct FakeRegistry {
    record: Mutex<Result<DomainRecord, String>>,
    calls: AtomicU64,
}

impl FakeRegistry {
    fn with_record(info: &str, owner: &str) -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(Ok(DomainRecord {
                info: info.to_string(),
                owner: owner.to_string(),
            })),
            calls: AtomicU64::new(0),
        })
    }

    async fn set_record(&self, info: &str, owner: &str) {
        *self.record.lock().await = Ok(DomainRecord {
            info: info.to_string(),
            owner: owner.to_string(),
        });
    }

    async fn set_failure(&self, message: &str) {
        *self.record.lock().await = Err(message.to_string());
    }

    fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainStorage for FakeRegistry {
    async fn get_data(&self, _domain: &str) -> Result<DomainRecord, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record
            .lock()
            .await
            .clone()
            .map_err(StorageError::Call)
    }
}

fn service_for(host: &str, registry: Arc<FakeRegistry>) -> DomainDataService {
    DomainDataService::new(resolve_current_domain(host), registry)
}

// ============ 完整链路 ============

/// Test 1.1: 解析域名、拉取记录、判定授权的端到端链路
#[tokio::test]
async fn test_resolve_fetch_authorize_roundtrip() {
    let registry = FakeRegistry::with_record(
        r#"{"app":{"projectName":"Acme Swap","logoUrl":"https://acme/logo.svg"}}"#,
        "0xAbCd567890abcdef1234567890abcdef12345678",
    );
    let svc = service_for("https://www.Acme-Swap.example:443/pool", registry.clone());

    assert_eq!(svc.domain(), "acme-swap.example");

    svc.fetch_domain_data(Some(56)).await;
    svc.set_account(Some("0xABCD567890ABCDEF1234567890ABCDEF12345678".into()))
        .await;

    let snap = svc.snapshot().await;
    assert!(snap.is_domain_data_fetched);
    assert!(snap.is_admin);
    assert_eq!(snap.admin_status, AdminStatus::Authorized);

    let settings = snap.domain_settings.unwrap();
    assert_eq!(settings.project_name, "Acme Swap");
    assert_eq!(settings.logo_url, "https://acme/logo.svg");
    assert!(settings.is_locker_enabled);
    assert_eq!(registry.call_count(), 1);
}

/// Test 1.2: 无域名上下文时从不触碰注册表
#[tokio::test]
async fn test_no_domain_context_never_calls_registry() {
    let registry = FakeRegistry::with_record("{}", ZERO_ADDRESS);
    let svc = service_for("", registry.clone());

    svc.fetch_domain_data(Some(1)).await;
    svc.trigger_domain_data(Some(1)).await;

    assert_eq!(registry.call_count(), 0);
    assert!(!svc.snapshot().await.is_domain_data_fetched);
}

// ============ 重拉语义 ============

/// Test 2.1: 重拉整体替换设置，不做字段级合并
#[tokio::test]
async fn test_refetch_replaces_settings_wholesale() {
    let registry = FakeRegistry::with_record(
        r#"{"app":{"projectName":"First","logoUrl":"https://a/1.png"}}"#,
        "0xABC0000000000000000000000000000000000001",
    );
    let svc = service_for("swap.example.org", registry.clone());

    svc.fetch_domain_data(Some(1)).await;

    // 新记录没有 logoUrl：重拉后必须回到默认值，而不是保留旧值
    registry
        .set_record(
            r#"{"app":{"projectName":"Second"}}"#,
            "0xABC0000000000000000000000000000000000001",
        )
        .await;
    svc.trigger_domain_data(Some(1)).await;

    let settings = svc.snapshot().await.domain_settings.unwrap();
    assert_eq!(settings.project_name, "Second");
    assert_eq!(settings.logo_url, "");
    assert_eq!(registry.call_count(), 2);
}

/// Test 2.2: 每次手动触发都会发起一次真实拉取
#[tokio::test]
async fn test_each_trigger_issues_a_fetch() {
    let registry = FakeRegistry::with_record("{}", ZERO_ADDRESS);
    let svc = service_for("swap.example.org", registry.clone());

    svc.trigger_domain_data(Some(1)).await;
    svc.trigger_domain_data(Some(1)).await;

    assert_eq!(registry.call_count(), 2);
}

// ============ 失败路径 ============

/// Test 3.1: 拉取失败保留最后一次成功的设置与粘滞标志
#[tokio::test]
async fn test_failure_keeps_last_known_good() {
    let registry = FakeRegistry::with_record(
        r#"{"app":{"projectName":"Good","disableSourceCopyright":true}}"#,
        "0xABC0000000000000000000000000000000000001",
    );
    let svc = service_for("swap.example.org", registry.clone());

    svc.fetch_domain_data(Some(1)).await;
    registry.set_failure("rpc timeout").await;
    svc.trigger_domain_data(Some(1)).await;

    let snap = svc.snapshot().await;
    assert!(snap.is_domain_data_fetched, "fetched flag is sticky");
    assert!(!snap.is_domain_data_fetching, "fetching flag always cleared");
    let settings = snap.domain_settings.unwrap();
    assert_eq!(settings.project_name, "Good");
    assert!(settings.disable_source_copyright);
}

/// Test 3.2: 首次拉取就失败时快照保持初始形态，可经手动触发恢复
#[tokio::test]
async fn test_first_failure_then_manual_recovery() {
    let registry = FakeRegistry::with_record("{}", ZERO_ADDRESS);
    registry.set_failure("connection refused").await;
    let svc = service_for("swap.example.org", registry.clone());

    svc.fetch_domain_data(Some(1)).await;
    let snap = svc.snapshot().await;
    assert!(!snap.is_domain_data_fetched);
    assert!(snap.domain_settings.is_none());

    registry
        .set_record("{}", "0xABC0000000000000000000000000000000000001")
        .await;
    svc.trigger_domain_data(Some(1)).await;

    let snap = svc.snapshot().await;
    assert!(snap.is_domain_data_fetched);
    assert_eq!(
        snap.domain_settings.unwrap().admin,
        "0xABC0000000000000000000000000000000000001"
    );
}

// ============ 授权粘滞 ============

/// Test 4.1: 换帐号后授权状态跟随最新身份
#[tokio::test]
async fn test_account_change_reevaluates_authorization() {
    let registry = FakeRegistry::with_record("{}", "0xABC0000000000000000000000000000000000001");
    let svc = service_for("swap.example.org", registry);

    svc.fetch_domain_data(Some(1)).await;

    svc.set_account(Some("0xabc0000000000000000000000000000000000001".into()))
        .await;
    assert_eq!(svc.snapshot().await.admin_status, AdminStatus::Authorized);

    svc.set_account(Some("0xdef0000000000000000000000000000000000002".into()))
        .await;
    let snap = svc.snapshot().await;
    assert_eq!(snap.admin_status, AdminStatus::NotAuthorized);
    assert!(!snap.is_admin);
}

/// Test 4.2: 记录所有者未设置时授权永远停留在 Unknown
#[tokio::test]
async fn test_unset_owner_leaves_status_unknown() {
    let registry = FakeRegistry::with_record("{}", ZERO_ADDRESS);
    let svc = service_for("swap.example.org", registry);

    svc.fetch_domain_data(Some(1)).await;
    svc.set_account(Some("0xabc0000000000000000000000000000000000001".into()))
        .await;

    let snap = svc.snapshot().await;
    assert_eq!(snap.admin_status, AdminStatus::Unknown);
    assert!(!snap.is_admin);
    assert_eq!(snap.domain_settings.unwrap().admin, "");
}
