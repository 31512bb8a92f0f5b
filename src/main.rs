use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use basic_api::bootstrap::app_context::{AppContext, AppServices};
use basic_api::bootstrap::config::Config;
use basic_api::bootstrap::web_security;
use basic_api::presentation::http::security::HttpSecurity;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "basic_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting basic API");

    // Database
    let pool =
        basic_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    if cfg.schema_auto_create {
        basic_api::infrastructure::db::schema::register_all(&pool).await?;
    }

    let security = web_security::configure(HttpSecurity::new())?;
    info!(
        http_basic = security.is_http_basic_enabled(),
        csrf = security.is_csrf_enabled(),
        session_policy = ?security.session_creation_policy(),
        "security_filter_chain_built"
    );

    let ctx = AppContext::new(cfg.clone(), AppServices::with_sqlx(pool, security));
    let app = basic_api::presentation::http::router::build_app(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?e, "API server failed");
        return Err(e.into());
    }
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
