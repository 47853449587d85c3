// Storage traits for pluggable backends
//
// The server ships in-memory implementations; a database backend only has
// to implement these two traits.

use async_trait::async_trait;
use chrono::Duration;

use crate::account::{Account, AccountId, NewAccount, Principal};
use crate::error::Result;
use crate::session::Session;

// ============================================================================
// AccountStore - account lookup for authentication and the accounts API
// ============================================================================

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by its login name
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>>;

    /// Find an account by id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;

    /// Get an account by id, failing with NotFound when absent
    async fn get(&self, id: AccountId) -> Result<Account> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| crate::Error::not_found(id))
    }

    /// Create an account. Fails with Conflict if the name is taken.
    async fn create(&self, input: NewAccount) -> Result<Account>;

    async fn count(&self) -> Result<usize>;
}

// ============================================================================
// SessionStore - server-side login sessions
// ============================================================================

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session and return the opaque token for the cookie
    async fn create(&self, principal: Principal, max_age: Duration) -> Result<String>;

    /// Resolve a token. Expired sessions resolve to None.
    async fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Terminate a session. Returns whether it existed.
    async fn remove(&self, token: &str) -> Result<bool>;

    /// Drop expired sessions, returning how many were removed
    async fn purge_expired(&self) -> Result<usize>;

    /// Number of stored sessions, expired or not
    async fn count(&self) -> Result<usize>;
}
