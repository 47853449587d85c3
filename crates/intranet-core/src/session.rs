// Authenticated session state

use chrono::{DateTime, Duration, Utc};

use crate::account::Principal;
use crate::error::{Error, Result};

/// A server-side login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session now, valid for `max_age`
    ///
    /// Fails when the expiry is past the range chrono can represent.
    pub fn start(principal: Principal, max_age: Duration) -> Result<Self> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(max_age).ok_or_else(|| {
            Error::Internal(anyhow::anyhow!(
                "Session max age of {}s is out of range",
                max_age.num_seconds()
            ))
        })?;

        Ok(Self {
            principal,
            created_at: now,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal {
            account_id: 1,
            name: "alice".to_string(),
        }
    }

    #[test]
    fn test_session_expiry() {
        let session = Session::start(principal(), Duration::minutes(5)).unwrap();
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.created_at + Duration::minutes(5)));
        assert!(!session.is_expired_at(session.created_at + Duration::minutes(4)));
    }

    #[test]
    fn test_zero_max_age_is_expired() {
        let session = Session::start(principal(), Duration::zero()).unwrap();
        assert!(session.is_expired());
    }

    #[test]
    fn test_out_of_range_max_age_is_an_error() {
        let err = Session::start(principal(), Duration::days(365 * 1_000_000)).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("out of range"));
    }
}
