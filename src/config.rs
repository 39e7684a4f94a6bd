//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// 本部署面向外界的宿主地址，域名解析的输入
    /// 留空表示"无域名上下文"，服务照常启动但不拉取设置
    #[serde(default)]
    pub public_host: String,
}

/// 设置注册表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// EVM JSON-RPC 端点
    pub rpc_url: String,
    /// 注册表合约地址
    pub address: String,
    /// 启动时首次拉取使用的网络标识，缺省则等待客户端上报
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub enable_file_logging: bool,
    pub log_file_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8088".into()),
            public_host: std::env::var("PUBLIC_HOST").unwrap_or_default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rpc_url: std::env::var("REGISTRY_RPC_URL")
                .unwrap_or_else(|_| "https://bsc-dataseed1.binance.org".into()),
            address: std::env::var("REGISTRY_ADDRESS")
                .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".into()),
            chain_id: std::env::var("REGISTRY_CHAIN_ID")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
            enable_file_logging: std::env::var("LOG_FILE_ENABLED")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(false),
            log_file_path: std::env::var("LOG_FILE_PATH").ok(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::default(),
            registry: RegistryConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                let file_config = Self::from_file(path)?;
                // 合并配置（文件配置覆盖环境变量）
                config = file_config;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证RPC端点格式
        if !self.registry.rpc_url.starts_with("http://")
            && !self.registry.rpc_url.starts_with("https://")
        {
            anyhow::bail!("REGISTRY_RPC_URL must start with http:// or https://");
        }

        // 验证注册表合约地址形状
        let addr = &self.registry.address;
        if !addr.starts_with("0x")
            || addr.len() != 42
            || !addr[2..].chars().all(|c| c.is_ascii_hexdigit())
        {
            anyhow::bail!("REGISTRY_ADDRESS must be a 0x-prefixed 20-byte hex address");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
