//! Fair Share Calculator HTTP server.
//!
//! Reads its configuration from the YAML file named by `FAIR_SHARE_CONFIG`
//! (defaults apply when unset) and serves the API on `server.bind`.

use std::net::SocketAddr;

use fair_share::api::{AppState, create_router};
use fair_share::config::{AppConfig, ConfigLoader};
use fair_share::error::FairShareResult;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "FAIR_SHARE_CONFIG";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fair_share=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> FairShareResult<AppConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(path = %path, "Loading configuration");
            Ok(ConfigLoader::load(path)?.into_config())
        }
        Err(_) => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let bind = config.server.bind.clone();
    let listener = match TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind, e);
            std::process::exit(1);
        }
    };

    info!(bind = %bind, public_url = %config.server.public_url, "Fair Share server listening");
    let router = create_router(AppState::new(config));
    let service = router.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(e) = axum::serve(listener, service).await {
        tracing::error!("Server error: {}", e);
    }
}
