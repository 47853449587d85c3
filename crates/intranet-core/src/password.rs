// Password hashing using bcrypt
// Decision: bcrypt so hashes from the existing account table keep verifying
// Decision: Cost 10 by default, configurable per deployment

use crate::error::{Error, Result};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Work factor range accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Hashes and verifies passwords
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password
    fn encode(&self, raw_password: &str) -> Result<String>;

    /// Check a raw password against a stored hash
    fn matches(&self, raw_password: &str, encoded_password: &str) -> Result<bool>;
}

/// bcrypt-backed password encoder
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptPasswordEncoder {
    /// Create an encoder; the cost is clamped to bcrypt's valid range
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String> {
        bcrypt::hash(raw_password, self.cost)
            .map_err(|e| Error::PasswordHash(format!("Failed to hash password: {}", e)))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> Result<bool> {
        bcrypt::verify(raw_password, encoded_password)
            .map_err(|e| Error::PasswordHash(format!("Failed to verify password: {}", e)))
    }
}
