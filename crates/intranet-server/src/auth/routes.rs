// Authentication HTTP routes
// Decision: Login accepts the browser form (urlencoded or multipart FormData) as well as JSON
// Decision: Logout is POST only, so a cross-site link cannot end a session
// Decision: Login input is checked against the metadata rules before bcrypt runs

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use intranet_core::{
    paths::{PATH_API_ACCOUNTS, PATH_API_LOGIN, PATH_API_LOGOUT, PATH_ROOT},
    Account, AccountStore, AuthenticationProvider, Credentials, SessionStore,
};

use crate::api::common::ErrorResponse;

use super::middleware::{AuthError, AuthState, AuthUser, SESSION_COOKIE};

/// Login credentials, from a form post (urlencoded or multipart) or a JSON body
pub struct LoginForm(pub Credentials);

#[axum::async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(credentials) = Json::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AuthError::bad_request(&e.body_text()))?;
            Ok(LoginForm(credentials))
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AuthError::bad_request(&e.body_text()))?;
            read_multipart_credentials(multipart).await.map(LoginForm)
        } else {
            let Form(credentials) = Form::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AuthError::bad_request(&e.body_text()))?;
            Ok(LoginForm(credentials))
        }
    }
}

/// Browser `FormData` posts arrive as multipart
async fn read_multipart_credentials(mut multipart: Multipart) -> Result<Credentials, AuthError> {
    let mut name = None;
    let mut password = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthError::bad_request(&e.body_text()))?
    {
        let key = field.name().map(str::to_string);
        let value = field
            .text()
            .await
            .map_err(|e| AuthError::bad_request(&e.body_text()))?;

        match key.as_deref() {
            Some("name") => name = Some(value),
            Some("password") => password = Some(value),
            _ => {}
        }
    }

    match (name, password) {
        (Some(name), Some(password)) => Ok(Credentials::new(name, password)),
        _ => Err(AuthError::bad_request("Missing name or password")),
    }
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route(PATH_API_LOGIN, post(login))
        .route(PATH_API_LOGOUT, post(logout))
        .route(&format!("{}/me", PATH_API_ACCOUNTS), get(get_current_account))
        .with_state(state)
}

/// POST /api/login - Login with name and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body(content(
        (Credentials = "application/x-www-form-urlencoded"),
        (Credentials = "multipart/form-data"),
        (Credentials = "application/json")
    )),
    responses(
        (status = 200, description = "Logged in, session cookie set", body = Account),
        (status = 400, description = "Malformed login form", body = ErrorResponse),
        (status = 401, description = "Bad credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    LoginForm(credentials): LoginForm,
) -> Result<(CookieJar, Json<Account>), AuthError> {
    if !state.metadata.accepts_credentials(&credentials) {
        tracing::debug!(name = %credentials.name, "Login input outside metadata rules");
        return Err(intranet_core::Error::bad_credentials().into());
    }

    let principal = state.provider.authenticate(&credentials).await?;
    let account = state.accounts.get(principal.account_id).await?;

    let max_age = chrono::Duration::from_std(state.config.session_max_age).map_err(|e| {
        tracing::error!("Invalid session max age: {}", e);
        AuthError::internal()
    })?;

    let token = state.sessions.create(principal, max_age).await?;

    let session_cookie = Cookie::build((SESSION_COOKIE, token))
        .path(PATH_ROOT)
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build();

    tracing::info!(account_id = account.id, name = %account.name, "Login succeeded");

    Ok((jar.add(session_cookie), Json(account)))
}

/// POST /api/logout - Terminate the session and go back to root
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 303, description = "Session terminated, redirect to root")
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match state.sessions.remove(cookie.value()).await {
            Ok(true) => tracing::info!("Session terminated"),
            Ok(false) => tracing::debug!("Logout for unknown session"),
            Err(e) => tracing::warn!("Failed to terminate session: {}", e),
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path(PATH_ROOT));
    (jar, Redirect::to(PATH_ROOT))
}

/// GET /api/accounts/me - Account of the logged-in user
#[utoipa::path(
    get,
    path = "/api/accounts/me",
    responses(
        (status = 200, description = "Current account", body = Account),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_account(
    State(state): State<AuthState>,
    user: AuthUser,
) -> Result<Json<Account>, AuthError> {
    let account = state.accounts.get(user.id).await.map_err(|e| {
        // Session outlived its account
        tracing::warn!(account_id = user.id, "Session for missing account: {}", e);
        AuthError::unauthorized("Authentication required")
    })?;
    Ok(Json(account))
}
