// Authentication provider
// Decision: Verify credentials against the account store with the password encoder
// Decision: Unknown user and wrong password fail identically ("Bad credentials")

use async_trait::async_trait;
use std::sync::Arc;

use crate::account::{Credentials, Principal};
use crate::error::{Error, Result};
use crate::password::PasswordEncoder;
use crate::traits::AccountStore;

/// Turns credentials into an authenticated identity
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal>;
}

/// Authenticates against stored accounts
pub struct AccountAuthProvider {
    accounts: Arc<dyn AccountStore>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl AccountAuthProvider {
    pub fn new(accounts: Arc<dyn AccountStore>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { accounts, encoder }
    }
}

#[async_trait]
impl AuthenticationProvider for AccountAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal> {
        let account = self
            .accounts
            .find_by_name(&credentials.name)
            .await?
            .ok_or_else(|| {
                tracing::debug!(name = %credentials.name, "Login for unknown account");
                Error::bad_credentials()
            })?;

        let valid = self
            .encoder
            .matches(&credentials.password, &account.password_hash)
            .map_err(|e| {
                // A stored hash bcrypt cannot parse is an account we cannot log into
                tracing::error!(account_id = account.id, "Password verification error: {}", e);
                Error::bad_credentials()
            })?;

        if !valid {
            tracing::debug!(account_id = account.id, "Login with wrong password");
            return Err(Error::bad_credentials());
        }

        Ok(Principal::from(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountId, NewAccount};
    use crate::password::BcryptPasswordEncoder;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecAccountStore {
        accounts: Mutex<Vec<Account>>,
    }

    #[async_trait]
    impl AccountStore for VecAccountStore {
        async fn find_by_name(&self, name: &str) -> Result<Option<Account>> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.name == name)
                .cloned())
        }

        async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned())
        }

        async fn create(&self, input: NewAccount) -> Result<Account> {
            let mut accounts = self.accounts.lock().unwrap();
            let account = Account {
                id: accounts.len() as AccountId + 1,
                name: input.name,
                password_hash: input.password_hash,
                created_at: Utc::now(),
            };
            accounts.push(account.clone());
            Ok(account)
        }

        async fn count(&self) -> Result<usize> {
            Ok(self.accounts.lock().unwrap().len())
        }
    }

    async fn provider_with_alice() -> AccountAuthProvider {
        let encoder = Arc::new(BcryptPasswordEncoder::new(4));
        let store = Arc::new(VecAccountStore::default());
        store
            .create(NewAccount {
                name: "alice".to_string(),
                password_hash: encoder.encode("Secret123").unwrap(),
            })
            .await
            .unwrap();
        AccountAuthProvider::new(store, encoder)
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let provider = provider_with_alice().await;
        let principal = provider
            .authenticate(&Credentials::new("alice", "Secret123"))
            .await
            .unwrap();
        assert_eq!(principal.account_id, 1);
        assert_eq!(principal.name, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let provider = provider_with_alice().await;

        let wrong_password = provider
            .authenticate(&Credentials::new("alice", "nope"))
            .await
            .unwrap_err();
        let unknown_user = provider
            .authenticate(&Credentials::new("mallory", "Secret123"))
            .await
            .unwrap_err();

        assert!(wrong_password.is_unauthorized());
        assert!(unknown_user.is_unauthorized());
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_rejected() {
        let store = Arc::new(VecAccountStore::default());
        store
            .create(NewAccount {
                name: "broken".to_string(),
                password_hash: "plaintext".to_string(),
            })
            .await
            .unwrap();
        let provider = AccountAuthProvider::new(store, Arc::new(BcryptPasswordEncoder::new(4)));

        let err = provider
            .authenticate(&Credentials::new("broken", "plaintext"))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_store_get_not_found() {
        let store = VecAccountStore::default();
        let err = store.get(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Could not find id : 99");
    }
}
