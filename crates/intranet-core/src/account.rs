// Account domain types
//
// Accounts are identified by a numeric id, like the rows of the
// intranet's account table. The password hash never leaves the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Numeric account identifier
pub type AccountId = i64;

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    #[cfg_attr(feature = "openapi", schema(ignore))]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub password_hash: String,
}

/// Credentials submitted by the login form
#[derive(Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Principal {
    pub account_id: AccountId,
    pub name: String,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_serialization_hides_hash() {
        let account = Account {
            id: 7,
            name: "alice".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "alice");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("alice", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_principal_from_account() {
        let account = Account {
            id: 3,
            name: "bob".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let principal = Principal::from(&account);
        assert_eq!(principal.account_id, 3);
        assert_eq!(principal.name, "bob");
    }
}
