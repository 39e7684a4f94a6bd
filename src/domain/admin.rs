//! 管理员身份推导与授权状态机

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 哨兵地址，注册表用它表示"所有者未设置"
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// 授权状态
/// 区分"尚未可判定"与"已判定为非管理员"，避免布尔默认值掩盖未评估状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    /// 尚无足够输入做出判定
    Unknown,
    /// 已连接身份即域名管理员
    Authorized,
    /// 已连接身份不是域名管理员
    NotAuthorized,
}

impl AdminStatus {
    /// 兼容旧接口的布尔视图
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// 用已连接身份与记录管理员重新判定
    ///
    /// 粘滞策略：任一输入缺失时保持原状态，在能证明之前不翻转
    pub fn evaluate(self, account: Option<&str>, admin: &str) -> Self {
        match account {
            Some(account) if !admin.is_empty() => {
                if account.eq_ignore_ascii_case(admin) {
                    Self::Authorized
                } else {
                    Self::NotAuthorized
                }
            }
            _ => self,
        }
    }
}

/// 从记录所有者推导管理员身份，零地址视为未设置
/// 非零所有者原样透传，此阶段不做大小写归一化
pub fn admin_from_owner(owner: &str) -> String {
    if owner == ZERO_ADDRESS {
        String::new()
    } else {
        owner.to_string()
    }
}
