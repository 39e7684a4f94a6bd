//! 域名设置领域模型
//! 从注册表记录的 JSON 文本解析出带默认值的类型化配置

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 记录 JSON 中本应用的命名空间键
pub const STORAGE_APP_KEY: &str = "app";

/// 某域名经过校验后的配置
/// 不变式：所有字段始终存在且类型正确，输入再畸形也只会回落到默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainSettings {
    /// 管理员身份（空串表示未设置所有者）
    pub admin: String,
    pub project_name: String,
    pub logo_url: String,
    pub disable_source_copyright: bool,
    pub is_locker_enabled: bool,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            admin: String::new(),
            project_name: String::new(),
            logo_url: String::new(),
            disable_source_copyright: false,
            is_locker_enabled: true,
        }
    }
}

/// 字段容忍策略
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// 仅非空 JSON 字符串覆盖默认值（空串、null、错误类型一律视为"未提供"）
    NonEmptyString,
    /// 仅严格 JSON 布尔覆盖默认值（"true" 字符串、0 等一律忽略）
    StrictBool,
}

/// 显式 schema：字段名、期望类型、默认值保留策略
/// 新增字段时在这里登记，容忍策略即可被单独审计和测试
const SETTINGS_SCHEMA: &[(&str, FieldKind)] = &[
    ("projectName", FieldKind::NonEmptyString),
    ("logoUrl", FieldKind::NonEmptyString),
    ("disableSourceCopyright", FieldKind::StrictBool),
    ("isLockerEnabled", FieldKind::StrictBool),
];

/// 解析域名设置记录，任何失败都回落到完整默认值，绝不向调用方抛错
///
/// `_chain_id` 为前向兼容参数（按网络区分默认值集），当前策略不做分支
pub fn parse_settings(raw: &str, _chain_id: u64) -> DomainSettings {
    let mut settings = DomainSettings::default();

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                error = %e,
                raw = %raw,
                "Failed to deserialize domain settings record, using defaults"
            );
            return settings;
        }
    };

    // 顶层不是对象、命名空间键缺失或其值不是对象，统统退化为"未提供任何字段"
    let namespace = parsed.get(STORAGE_APP_KEY).cloned().unwrap_or(Value::Null);

    for (key, kind) in SETTINGS_SCHEMA.iter().copied() {
        apply_field(&mut settings, key, kind, namespace.get(key));
    }

    settings
}

fn apply_field(settings: &mut DomainSettings, key: &str, kind: FieldKind, value: Option<&Value>) {
    match kind {
        FieldKind::NonEmptyString => {
            if let Some(Value::String(s)) = value {
                if !s.is_empty() {
                    match key {
                        "projectName" => settings.project_name = s.clone(),
                        "logoUrl" => settings.logo_url = s.clone(),
                        _ => {}
                    }
                }
            }
        }
        FieldKind::StrictBool => {
            if let Some(Value::Bool(b)) = value {
                match key {
                    "disableSourceCopyright" => settings.disable_source_copyright = *b,
                    "isLockerEnabled" => settings.is_locker_enabled = *b,
                    _ => {}
                }
            }
        }
    }
}
