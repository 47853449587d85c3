// Intranet server library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests
// Decision: Layer order is trace -> CORS -> gate -> routes, so preflights never hit the gate

use axum::{middleware, Router};
use intranet_core::{
    AccountAuthProvider, AccountStore, BcryptPasswordEncoder, CorsPolicyProvider, Metadata,
    PasswordEncoder, RouteClassifier, SessionStore,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Authentication module
pub mod auth;

pub mod config;

// OpenAPI spec generation
pub mod openapi;

// Storage layer
pub mod storage;

use auth::{cors::cors_layer, require_authentication, AuthConfig, AuthState};
use storage::{InMemoryAccountStore, InMemorySessionStore};

/// Auth state backed by the in-memory stores
pub fn in_memory_auth_state(config: AuthConfig, metadata: Metadata) -> AuthState {
    let accounts: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let encoder: Arc<dyn PasswordEncoder> =
        Arc::new(BcryptPasswordEncoder::new(config.bcrypt_cost));
    let provider = Arc::new(AccountAuthProvider::new(accounts.clone(), encoder));

    AuthState::new(
        config,
        RouteClassifier::default(),
        provider,
        accounts,
        sessions,
        metadata,
    )
}

/// Build the full application router
pub fn app(auth_state: AuthState, cors: CorsPolicyProvider) -> Router {
    let accounts_state = api::accounts::AccountsState::new(auth_state.clone());
    let metadata = auth_state.metadata.clone();

    Router::new()
        .merge(api::index::routes())
        .merge(api::metadata::routes(metadata))
        .merge(auth::routes(auth_state.clone()))
        .merge(api::accounts::routes(accounts_state))
        // Unknown paths still go through the gate
        .fallback(api::common::not_found)
        .layer(middleware::from_fn_with_state(
            auth_state,
            require_authentication,
        ))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Periodically drop expired sessions
pub fn spawn_session_purge(sessions: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => {
                    let remaining = sessions.count().await.unwrap_or_default();
                    tracing::debug!(purged, remaining, "Purged expired sessions");
                }
                Err(e) => tracing::warn!("Failed to purge sessions: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intranet_core::Principal;

    fn principal() -> Principal {
        Principal {
            account_id: 1,
            name: "alice".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_drops_expired_sessions() {
        let store = Arc::new(InMemorySessionStore::new());
        store
            .create(principal(), chrono::Duration::zero())
            .await
            .unwrap();
        let live = store
            .create(principal(), chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        let handle = spawn_session_purge(store.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get(&live).await.unwrap().is_some());
        handle.abort();
    }
}
