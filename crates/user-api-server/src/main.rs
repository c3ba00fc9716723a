use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use user_api_server::config::Settings;
use user_api_server::registry::UserRegistry;
use user_api_server::security::BearerTokenValidator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,user_api_server=debug".to_string()),
        )
        .with_target(true)
        .json()
        .init();

    info!("🚀 Starting User API Server...");

    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    if settings.security.api_tokens.is_empty() {
        warn!("No API tokens configured; every non-public request will be rejected");
    }

    let registry = Arc::new(UserRegistry::with_unique_email(
        settings.registry.enforce_unique_email,
    ));

    let validator = Arc::new(BearerTokenValidator::new(
        settings.security.api_tokens.clone(),
        settings.security.public_paths.clone(),
    ));

    let app = user_api_server::build_router(registry, validator);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
