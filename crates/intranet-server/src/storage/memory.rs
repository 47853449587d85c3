// In-memory storage implementation
// Decision: Use parking_lot for thread-safe access, locks never held across .await
// Decision: Session tokens are stored hashed (SHA-256), the raw token only lives in the cookie
//
// All data is lost on restart; accounts are re-seeded from the admin
// configuration at startup.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use intranet_core::{
    Account, AccountId, AccountStore, Error, NewAccount, Principal, Result, Session, SessionStore,
};
use parking_lot::RwLock;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Random bytes per session token (64 hex chars)
const SESSION_TOKEN_BYTES: usize = 32;

/// Generate a random session token
fn generate_session_token() -> String {
    let bytes: [u8; SESSION_TOKEN_BYTES] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Hash a session token for storage/lookup
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

// ============================================
// Accounts
// ============================================

pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    next_id: AtomicI64,
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.accounts.read().get(&id).cloned())
    }

    async fn create(&self, input: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write();
        if accounts.values().any(|a| a.name == input.name) {
            return Err(Error::conflict(format!(
                "Account '{}' already exists",
                input.name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let account = Account {
            id,
            name: input.name,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.accounts.read().len())
    }
}

// ============================================
// Sessions
// ============================================

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, principal: Principal, max_age: Duration) -> Result<String> {
        let token = generate_session_token();
        let session = Session::start(principal, max_age)?;
        self.sessions
            .write()
            .insert(hash_session_token(&token), session);
        Ok(token)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let key = hash_session_token(token);
        let session = self.sessions.read().get(&key).cloned();

        match session {
            Some(session) if session.is_expired() => {
                self.sessions.write().remove(&key);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn remove(&self, token: &str) -> Result<bool> {
        Ok(self
            .sessions
            .write()
            .remove(&hash_session_token(token))
            .is_some())
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.sessions.read().len())
    }
}
