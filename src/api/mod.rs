use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{from_fn, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::{app_state::AppState, error::AppError};

pub mod domain_data_api;

// ============ 统一响应格式 ============

/// 统一成功响应格式：{ code, message, data }
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }
}

/// 辅助函数：将数据包装为统一响应格式
pub fn success_response<T: Serialize>(data: T) -> Result<Json<ApiResponse<T>>, AppError> {
    Ok(Json(ApiResponse::success(data)))
}

// ============ OpenAPI 文档 ============

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DomainCore API",
        version = "0.1.0",
        description = "Per-domain settings resolution service"
    ),
    paths(
        domain_data_api::get_domain_data,
        domain_data_api::refresh_domain_data,
    ),
    components(schemas(
        crate::service::domain_data::DomainDataSnapshot,
        crate::domain::settings::DomainSettings,
        crate::domain::admin::AdminStatus,
        domain_data_api::RefreshDomainDataReq,
    )),
    tags(
        (name = "domain-data", description = "域名设置解析与授权判定")
    )
)]
struct ApiDoc;

// ============ 路由 ============

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/v1", domain_data_api::routes())
        .merge(utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn(trace_id_middleware)),
        )
        .with_state(state)
}

/// 健康检查
async fn healthz() -> &'static str {
    "ok"
}

// ============ Trace ID 中间件 ============

/// 为每个请求生成或透传 trace_id，写入请求扩展与响应头
async fn trace_id_middleware(mut req: Request, next: Next) -> Response {
    let trace_id = req
        .headers()
        .get("X-Trace-Id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(trace_id.clone());

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert("X-Trace-Id", value);
    }
    response
}
