// Accounts API routes
// Decision: Lookup by id only; unknown ids surface the core NotFound message

use axum::{
    extract::{FromRef, Path, State},
    routing::get,
    Json, Router,
};
use intranet_core::{paths::PATH_API_ACCOUNTS, Account, AccountId, AccountStore};
use std::sync::Arc;

use super::common::{ApiError, ErrorResponse};
use crate::auth::middleware::{AuthState, AuthUser};

/// App state for accounts routes
#[derive(Clone)]
pub struct AccountsState {
    pub accounts: Arc<dyn AccountStore>,
    pub auth: AuthState,
}

impl AccountsState {
    pub fn new(auth: AuthState) -> Self {
        Self {
            accounts: auth.accounts.clone(),
            auth,
        }
    }
}

impl FromRef<AccountsState> for AuthState {
    fn from_ref(input: &AccountsState) -> Self {
        input.auth.clone()
    }
}

/// Create accounts routes
pub fn routes(state: AccountsState) -> Router {
    Router::new()
        .route(&format!("{}/:id", PATH_API_ACCOUNTS), get(get_account))
        .with_state(state)
}

/// GET /api/accounts/{id} - Get account by id
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn get_account(
    State(state): State<AccountsState>,
    _auth: AuthUser, // Require authentication
    Path(id): Path<AccountId>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.get(id).await.map_err(|e| {
        tracing::debug!(account_id = id, "Account lookup failed: {}", e);
        e
    })?;
    Ok(Json(account))
}
