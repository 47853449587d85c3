// Authentication middleware and extractors
// Decision: Every request passes the gate; public paths are decided by the RouteClassifier
// Decision: Logout is let through before the check so it always clears the cookie

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use intranet_core::{
    paths::PATH_API_LOGOUT, AccountId, AccountStore, AuthenticationProvider, Metadata, Principal,
    RouteClassifier, SessionStore,
};
use serde::Serialize;
use std::sync::Arc;

use super::config::AuthConfig;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal() -> Self {
        Self {
            error: "Internal server error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<intranet_core::Error> for AuthError {
    fn from(err: intranet_core::Error) -> Self {
        match err {
            intranet_core::Error::Unauthorized(message) => Self::unauthorized(&message),
            intranet_core::Error::NotFound(message) => Self {
                error: message,
                status: StatusCode::NOT_FOUND,
            },
            other => {
                tracing::error!("Authentication failure: {}", other);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated user context extracted from request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: AccountId,
    pub name: String,
}

impl From<Principal> for AuthUser {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.account_id,
            name: principal.name,
        }
    }
}

/// Auth state shared across routes and the gate
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub classifier: Arc<RouteClassifier>,
    pub provider: Arc<dyn AuthenticationProvider>,
    pub accounts: Arc<dyn AccountStore>,
    pub sessions: Arc<dyn SessionStore>,
    /// Client rules, also applied to login input
    pub metadata: Arc<Metadata>,
}

impl AuthState {
    pub fn new(
        config: AuthConfig,
        classifier: RouteClassifier,
        provider: Arc<dyn AuthenticationProvider>,
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionStore>,
        metadata: Metadata,
    ) -> Self {
        Self {
            config,
            classifier: Arc::new(classifier),
            provider,
            accounts,
            sessions,
            metadata: Arc::new(metadata),
        }
    }
}

/// Extractor for authenticated user
/// Returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by the gate
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let auth_state = AuthState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        extract_auth_user(&jar, &auth_state).await
    }
}

/// Resolve the session cookie to a user
async fn extract_auth_user(jar: &CookieJar, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

    let session = auth_state
        .sessions
        .get(&token)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load session: {}", e);
            AuthError::unauthorized("Authentication required")
        })?
        .ok_or_else(|| {
            tracing::debug!("Unknown or expired session");
            AuthError::unauthorized("Authentication required")
        })?;

    Ok(AuthUser::from(session.principal))
}

/// Gate in front of every route
///
/// Public paths pass untouched. Everything else needs a live session;
/// the resolved `AuthUser` is stored in the request extensions.
pub async fn require_authentication(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path();
    if state.classifier.is_public(path) || path == PATH_API_LOGOUT {
        return Ok(next.run(request).await);
    }

    let jar = CookieJar::from_headers(request.headers());
    let user = extract_auth_user(&jar, &state).await.map_err(|e| {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected unauthenticated request"
        );
        e
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error() {
        let error = AuthError::unauthorized("Test error");
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.error, "Test error");

        let bad = AuthError::bad_request("Bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_from_core() {
        let error = AuthError::from(intranet_core::Error::bad_credentials());
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.error, "Bad credentials");

        let error = AuthError::from(intranet_core::Error::not_found(5));
        assert_eq!(error.status, StatusCode::NOT_FOUND);

        let error = AuthError::from(intranet_core::Error::PasswordHash("boom".to_string()));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error, "Internal server error");
    }

    #[test]
    fn test_auth_user_from_principal() {
        let user = AuthUser::from(Principal {
            account_id: 9,
            name: "alice".to_string(),
        });
        assert_eq!(user.id, 9);
        assert_eq!(user.name, "alice");
    }

    #[test]
    fn test_auth_error_serializes_message_only() {
        let json = serde_json::to_value(AuthError::unauthorized("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "nope" }));
    }
}
