//! Domain 模块
//!
//! 包含核心业务逻辑和领域模型

pub mod admin;
pub mod resolver;
pub mod settings;

// Re-exports
// 重新导出常用类型
pub use admin::{admin_from_owner, AdminStatus, ZERO_ADDRESS};
pub use resolver::resolve_current_domain;
pub use settings::{parse_settings, DomainSettings, STORAGE_APP_KEY};
