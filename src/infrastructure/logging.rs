//! 日志系统配置模块
//! 支持结构化 JSON/文本格式与按天轮转的文件输出

use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::LoggingConfig;

/// 初始化日志系统
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    // 环境变量优先于配置文件的级别设置
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let json = config.format == "json";

    if config.enable_file_logging {
        let log_dir = config
            .log_file_path
            .as_deref()
            .map(Path::new)
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("./logs"));
        std::fs::create_dir_all(log_dir)?;

        let file_appender = rolling::daily(log_dir, "domaincore.log");

        if json {
            Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_writer(file_appender))
                .with(fmt::layer().json())
                .init();
        } else {
            Registry::default()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(file_appender))
                .with(fmt::layer())
                .init();
        }
    } else if json {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        Registry::default().with(filter).with(fmt::layer()).init();
    }

    Ok(())
}
