// Intranet API server
// Decision: In-memory stores; the admin account is seeded from the environment on every boot

use anyhow::{Context, Result};
use intranet_core::{BcryptPasswordEncoder, Metadata};
use intranet_server::{
    app, auth::bootstrap::ensure_admin_account, config::ServerConfig, in_memory_auth_state,
    spawn_session_purge,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("intranet_server=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("intranet-server starting...");

    let config = ServerConfig::from_env();
    tracing::info!(
        session_max_age_secs = config.auth.session_max_age.as_secs(),
        bcrypt_cost = config.auth.bcrypt_cost,
        cookie_secure = config.auth.cookie_secure,
        "Authentication configured"
    );

    let auth_state = in_memory_auth_state(config.auth.clone(), Metadata::default());

    let encoder = BcryptPasswordEncoder::new(config.auth.bcrypt_cost);
    ensure_admin_account(&config.auth, auth_state.accounts.as_ref(), &encoder)
        .await
        .context("Failed to create admin account")?;

    spawn_session_purge(
        auth_state.sessions.clone(),
        config.auth.session_purge_interval,
    );

    let app = app(auth_state, config.cors_policy());

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;
    tracing::info!("HTTP server listening on {}", config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
