//! 当前域名解析
//! 从显式传入的宿主地址推导设置注册表的查询键

/// 从宿主地址推导当前域名
///
/// 纯函数：去掉协议、用户信息、端口、路径和前导 `www.`，统一小写。
/// 无法推导时返回空串，表示"无域名上下文"，下游必须据此跳过拉取。
pub fn resolve_current_domain(host: &str) -> String {
    let mut rest = host.trim();

    if let Some((_, after)) = rest.split_once("://") {
        rest = after;
    }
    rest = rest.split('/').next().unwrap_or_default();
    rest = rest.rsplit('@').next().unwrap_or_default();
    rest = rest.split(':').next().unwrap_or_default();

    let domain = rest.trim().to_ascii_lowercase();
    domain.strip_prefix("www.").unwrap_or(&domain).to_string()
}
