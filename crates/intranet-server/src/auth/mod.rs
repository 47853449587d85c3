// Authentication module
// Decision: Cookie-backed server-side sessions for the browser client
// Decision: One gate middleware in front of every route instead of per-handler checks

pub mod bootstrap;
pub mod config;
pub mod cors;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use middleware::{require_authentication, AuthError, AuthState, AuthUser, SESSION_COOKIE};
pub use routes::routes;
