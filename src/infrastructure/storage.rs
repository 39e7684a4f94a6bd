//! 设置注册表读取
//! 通过 EVM JSON-RPC 调用注册表合约的 getData(domain)

use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::{Http, Provider},
    types::Address,
};
use thiserror::Error;

abigen!(
    SettingsRegistry,
    r#"[
        function getData(string key) external view returns (string info, address owner)
    ]"#
);

/// 注册表为某域名返回的原始记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// 期望为 JSON 的文本负载，内容不可信
    pub info: String,
    /// 所有者地址，零地址表示未设置
    pub owner: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid registry rpc url '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("invalid registry contract address: {0}")]
    InvalidAddress(String),

    #[error("registry call failed: {0}")]
    Call(String),
}

/// 注册表读取接口
/// 拉取逻辑只依赖这个 trait，测试用内存实现替换真实合约
#[async_trait]
pub trait DomainStorage: Send + Sync {
    async fn get_data(&self, domain: &str) -> Result<DomainRecord, StorageError>;
}

/// 基于 ethers 的注册表合约客户端
pub struct EvmDomainStorage {
    contract: SettingsRegistry<Provider<Http>>,
}

impl EvmDomainStorage {
    pub fn new(rpc_url: &str, registry_address: &str) -> Result<Self, StorageError> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            StorageError::InvalidRpcUrl {
                url: rpc_url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let address: Address = registry_address
            .parse()
            .map_err(|_| StorageError::InvalidAddress(registry_address.to_string()))?;

        Ok(Self {
            contract: SettingsRegistry::new(address, Arc::new(provider)),
        })
    }
}

#[async_trait]
impl DomainStorage for EvmDomainStorage {
    async fn get_data(&self, domain: &str) -> Result<DomainRecord, StorageError> {
        let (info, owner) = self
            .contract
            .get_data(domain.to_string())
            .call()
            .await
            .map_err(|e| StorageError::Call(e.to_string()))?;

        // Address 的 Debug 输出是完整的 0x 前缀小写十六进制
        let owner = format!("{owner:?}");

        tracing::debug!(
            domain = %domain,
            owner = %owner,
            info_len = info.len(),
            "Fetched domain record from registry"
        );

        Ok(DomainRecord { info, owner })
    }
}
