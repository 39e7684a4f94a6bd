// 域名数据 API
// 暴露域名设置快照与手动重拉触发器，供前端渲染层消费

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{success_response, ApiResponse},
    app_state::AppState,
    error::AppError,
    service::domain_data::DomainDataSnapshot,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DomainDataQuery {
    /// 钱包当前连接的身份，携带时会更新授权判定
    pub account: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshDomainDataReq {
    /// 钱包当前连接的网络标识
    pub chain_id: u64,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/domain-data", get(get_domain_data))
        .route("/domain-data/refresh", post(refresh_domain_data))
}

/// 查询域名数据快照
#[utoipa::path(
    get,
    path = "/api/v1/domain-data",
    params(DomainDataQuery),
    responses(
        (status = 200, description = "当前域名设置快照", body = DomainDataSnapshot)
    ),
    tag = "domain-data"
)]
pub async fn get_domain_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DomainDataQuery>,
) -> Result<Json<ApiResponse<DomainDataSnapshot>>, AppError> {
    if let Some(account) = query.account {
        state.domain_data.set_account(Some(account)).await;
    }

    success_response(state.domain_data.snapshot().await)
}

/// 手动触发域名数据重拉
#[utoipa::path(
    post,
    path = "/api/v1/domain-data/refresh",
    request_body = RefreshDomainDataReq,
    responses(
        (status = 200, description = "重拉后的域名设置快照", body = DomainDataSnapshot)
    ),
    tag = "domain-data"
)]
pub async fn refresh_domain_data(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshDomainDataReq>,
) -> Result<Json<ApiResponse<DomainDataSnapshot>>, AppError> {
    state
        .domain_data
        .trigger_domain_data(Some(req.chain_id))
        .await;

    success_response(state.domain_data.snapshot().await)
}
