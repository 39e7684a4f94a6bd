//! DomainCore - 多租户 dapp 的域名设置解析服务
//!
//! 以域名为键从远端注册表合约读取配置记录，解析为带默认值的
//! 类型化设置，并把记录所有者与已连接身份核对为授权状态

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode};

// 统一模块导出
pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{parse_settings, resolve_current_domain, AdminStatus, DomainSettings},
        error::{AppError, AppErrorCode},
        service::domain_data::{DomainDataService, DomainDataSnapshot},
    };
}
