use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth};
use service::auth::repo::seaorm::SeaOrmUserStore;
use service::auth::repository::UserStore;
use service::auth::service::{AuthConfig, AuthService};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Translate the config file's auth section into the service configuration.
/// Without a config file, the secret comes from JWT_SECRET with a dev-only
/// fallback, everything else uses defaults.
fn build_auth_config(cfg: Option<&configs::AppConfig>) -> Result<AuthConfig, StartupError> {
    let section = match cfg {
        Some(cfg) => cfg.auth.clone(),
        None => {
            let mut section = configs::AuthConfig::default();
            section.normalize_from_env();
            if section.jwt_secret.trim().is_empty() {
                section.jwt_secret = "dev-secret-change-me".to_string();
            }
            section
        }
    };

    let algorithm = section
        .algorithm
        .parse::<jsonwebtoken::Algorithm>()
        .map_err(|_| StartupError::InvalidConfig(format!("unsupported auth.algorithm: {}", section.algorithm)))?;

    Ok(AuthConfig {
        jwt_secret: section.jwt_secret,
        algorithm,
        access_ttl_secs: section.access_token_expire_minutes * 60,
        refresh_ttl_secs: section.refresh_token_expire_days * 24 * 3600,
        argon2_memory_kib: section.argon2.memory_kib,
        argon2_iterations: section.argon2.iterations,
        argon2_parallelism: section.argon2.parallelism,
    })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let app_cfg = configs::AppConfig::load_and_validate().ok();

    // DB connection and schema
    let db = match app_cfg.as_ref() {
        Some(cfg) => models::db::connect_with(&cfg.database).await?,
        None => models::db::connect().await?,
    };
    migration::Migrator::up(&db, None).await?;

    // Wire the service core against the SeaORM-backed store
    let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore { db });
    let auth_cfg = build_auth_config(app_cfg.as_ref())?;
    let auth = Arc::new(AuthService::new(store, auth_cfg)?);
    let state = auth::ServerState { auth };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr = load_bind_addr(app_cfg.as_ref())?;
    info!(%addr, "starting auth server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
