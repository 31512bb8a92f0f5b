use axum::extract::{MatchedPath, State};
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::{Json, Router, middleware, routing::get};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::DbPool;
use crate::presentation::http::security;

#[derive(OpenApi)]
#[openapi(
    paths(health),
    components(schemas(
        HealthResp,
        crate::domain::entities::SampleTable1Entity,
        crate::domain::entities::UserEntity,
    )),
    tags((name = "Health", description = "System health checks"))
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
}

#[utoipa::path(get, path = "/api/health", tag = "Health", responses((status = 200, body = HealthResp)))]
pub async fn health(State(pool): State<DbPool>) -> Json<HealthResp> {
    let db_ok = sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok();
    Json(HealthResp {
        status: if db_ok { "ok" } else { "degraded" },
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "path": uri.path() })),
    )
}

pub fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        // Config::from_env already refuses production without a usable origin.
        _ if cfg.is_production => AllowOrigin::exact(HeaderValue::from_static("http://invalid")),
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Full application router: routes, fallback, security chain, CORS and request tracing.
pub fn build_app(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/health", get(health).with_state(ctx.pool()))
        .route("/api/openapi.json", get(openapi_json))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            ctx.security(),
            security::enforce,
        ))
        .layer(cors_layer(&ctx.cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
