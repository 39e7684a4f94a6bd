//! DomainCore 主入口
//! 域名设置解析服务

use std::sync::Arc;

use anyhow::Result;
use domaincore::{api, app_state::AppState, config::Config, infrastructure::logging};

#[tokio::main]
async fn main() -> Result<()> {
    // ✅ 1. 加载环境变量
    dotenvy::dotenv().ok();

    // ✅ 2. 加载配置（CONFIG_PATH 指向的文件优先于环境变量）
    let config = Arc::new(Config::from_env_and_file(
        std::env::var("CONFIG_PATH").ok().as_deref(),
    )?);
    config.validate()?;

    // ✅ 3. 初始化日志
    logging::init_logging(&config.logging)?;

    tracing::info!("🚀 Starting DomainCore domain settings service");

    // ✅ 4. 初始化应用状态（解析域名、构建注册表客户端）
    let state = Arc::new(AppState::new(config.clone())?);
    tracing::info!(domain = %state.domain_data.domain(), "✅ Domain resolved");

    // ✅ 5. 启动时预拉一次域名数据（配置了网络标识才会执行）
    {
        let domain_data = state.domain_data.clone();
        let chain_id = config.registry.chain_id;
        tokio::spawn(async move {
            domain_data.fetch_domain_data(chain_id).await;
        });
    }

    // ✅ 6. 构建API路由并启动服务器
    let app = api::routes(state.clone());

    let bind_addr = config.server.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("🎉 Server listening on http://{}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/docs", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
