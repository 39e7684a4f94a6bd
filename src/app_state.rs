use std::sync::Arc;

use crate::{
    config::Config,
    domain::resolve_current_domain,
    infrastructure::storage::EvmDomainStorage,
    service::domain_data::DomainDataService,
};

/// 应用状态
/// 包含所有共享资源
#[derive(Clone)]
pub struct AppState {
    pub domain_data: Arc<DomainDataService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// 创建新的应用状态
    /// 域名只在这里解析一次，之后整个生命周期不变
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let domain = resolve_current_domain(&config.server.public_host);
        if domain.is_empty() {
            tracing::warn!("PUBLIC_HOST not set or unresolvable, domain data will not be fetched");
        }

        let storage = Arc::new(EvmDomainStorage::new(
            &config.registry.rpc_url,
            &config.registry.address,
        )?);

        let domain_data = Arc::new(DomainDataService::new(domain, storage));

        Ok(Self {
            domain_data,
            config,
        })
    }
}
