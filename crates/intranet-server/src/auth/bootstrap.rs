// Admin account creation at startup
//
// The in-memory account store starts empty, so the admin account from
// ADMIN_USERNAME / ADMIN_PASSWORD is seeded on every boot.

use intranet_core::{AccountStore, Error, NewAccount, PasswordEncoder, Result};

use super::config::AuthConfig;

/// Seed the configured admin account
///
/// # Returns
/// * `Ok(Some(name))` - admin account exists (created now or before)
/// * `Ok(None)` - no admin configured
/// * `Err(Error)` - hashing or storage failed
pub async fn ensure_admin_account(
    config: &AuthConfig,
    accounts: &dyn AccountStore,
    encoder: &dyn PasswordEncoder,
) -> Result<Option<String>> {
    let Some(admin) = &config.admin else {
        if accounts.count().await? == 0 {
            tracing::warn!("ADMIN_PASSWORD not set and no accounts exist; nobody can log in");
        }
        return Ok(None);
    };

    let password_hash = encoder.encode(&admin.password)?;

    match accounts
        .create(NewAccount {
            name: admin.username.clone(),
            password_hash,
        })
        .await
    {
        Ok(account) => {
            tracing::info!(account_id = account.id, name = %account.name, "Created admin account");
            Ok(Some(account.name))
        }
        Err(Error::Conflict(_)) => {
            tracing::warn!("Admin account {} already exists, skipping creation", admin.username);
            Ok(Some(admin.username.clone()))
        }
        Err(e) => {
            tracing::error!("Failed to create admin account: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::AdminConfig;
    use crate::storage::InMemoryAccountStore;
    use intranet_core::BcryptPasswordEncoder;

    fn config_with_admin() -> AuthConfig {
        AuthConfig {
            admin: Some(AdminConfig {
                username: "admin".to_string(),
                password: "Secret123".to_string(),
            }),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_creates_admin() {
        let store = InMemoryAccountStore::new();
        let encoder = BcryptPasswordEncoder::new(4);

        let name = ensure_admin_account(&config_with_admin(), &store, &encoder)
            .await
            .unwrap();
        assert_eq!(name, Some("admin".to_string()));

        let account = store.find_by_name("admin").await.unwrap().unwrap();
        assert!(encoder.matches("Secret123", &account.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_existing_admin_is_kept() {
        let store = InMemoryAccountStore::new();
        let encoder = BcryptPasswordEncoder::new(4);
        let config = config_with_admin();

        ensure_admin_account(&config, &store, &encoder).await.unwrap();
        let name = ensure_admin_account(&config, &store, &encoder)
            .await
            .unwrap();

        assert_eq!(name, Some("admin".to_string()));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_admin_configured() {
        let store = InMemoryAccountStore::new();
        let encoder = BcryptPasswordEncoder::new(4);

        let name = ensure_admin_account(&AuthConfig::default(), &store, &encoder)
            .await
            .unwrap();
        assert!(name.is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
