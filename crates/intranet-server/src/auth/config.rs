// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config, ADMIN_ for the bootstrap account
// Decision: Session cookies are not Secure by default (intranet over plain HTTP)

use intranet_core::password::DEFAULT_BCRYPT_COST;
use std::time::Duration;

/// Longest accepted session lifetime (10 years)
pub const MAX_SESSION_MAX_AGE: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Bootstrap account created at startup
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime (default: 30 days)
    pub session_max_age: Duration,
    /// How often expired sessions are purged (default: 5 minutes)
    pub session_purge_interval: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Mark the session cookie Secure
    pub cookie_secure: bool,
    /// Admin account to seed (only when ADMIN_PASSWORD is set)
    pub admin: Option<AdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_max_age: Duration::from_secs(30 * 24 * 60 * 60), // 30 days
            session_purge_interval: Duration::from_secs(5 * 60),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            cookie_secure: false,
            admin: None,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let session_max_age = var("AUTH_SESSION_MAX_AGE")
            .and_then(|s| s.parse().ok())
            .map(|mins: u64| {
                let max_age = mins
                    .checked_mul(60)
                    .map(Duration::from_secs)
                    .unwrap_or(MAX_SESSION_MAX_AGE);
                if max_age > MAX_SESSION_MAX_AGE {
                    tracing::warn!(
                        minutes = mins,
                        "AUTH_SESSION_MAX_AGE too large, capping at {} days",
                        MAX_SESSION_MAX_AGE.as_secs() / 86_400
                    );
                }
                max_age.min(MAX_SESSION_MAX_AGE)
            })
            .unwrap_or(defaults.session_max_age);

        let session_purge_interval = var("AUTH_SESSION_PURGE_INTERVAL")
            .and_then(|s| s.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_purge_interval);

        let bcrypt_cost = var("AUTH_BCRYPT_COST")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bcrypt_cost);

        let cookie_secure = var("AUTH_COOKIE_SECURE")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(defaults.cookie_secure);

        let admin = match var("ADMIN_PASSWORD") {
            Some(password) if !password.is_empty() => {
                let username = var("ADMIN_USERNAME")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "admin".to_string());
                Some(AdminConfig { username, password })
            }
            _ => None,
        };

        Self {
            session_max_age,
            session_purge_interval,
            bcrypt_cost,
            cookie_secure,
            admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AuthConfig::from_vars(vars(&[]));
        assert_eq!(config.session_max_age, Duration::from_secs(30 * 24 * 60 * 60));
        assert_eq!(config.session_purge_interval, Duration::from_secs(300));
        assert_eq!(config.bcrypt_cost, 10);
        assert!(!config.cookie_secure);
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_vars(vars(&[
            ("AUTH_SESSION_MAX_AGE", "60"),
            ("AUTH_SESSION_PURGE_INTERVAL", "30"),
            ("AUTH_BCRYPT_COST", "12"),
            ("AUTH_COOKIE_SECURE", "TRUE"),
        ]));
        assert_eq!(config.session_max_age, Duration::from_secs(3600));
        assert_eq!(config.session_purge_interval, Duration::from_secs(30));
        assert_eq!(config.bcrypt_cost, 12);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AuthConfig::from_vars(vars(&[
            ("AUTH_SESSION_MAX_AGE", "forever"),
            ("AUTH_SESSION_PURGE_INTERVAL", "0"),
            ("AUTH_BCRYPT_COST", "-1"),
        ]));
        assert_eq!(config.session_max_age, AuthConfig::default().session_max_age);
        assert_eq!(config.session_purge_interval, Duration::from_secs(300));
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_huge_session_max_age_is_capped() {
        for minutes in ["18446744073709551615", "1000000000000"] {
            let config = AuthConfig::from_vars(vars(&[("AUTH_SESSION_MAX_AGE", minutes)]));
            assert_eq!(config.session_max_age, MAX_SESSION_MAX_AGE, "{}", minutes);
        }

        // Capped value still fits chrono
        assert!(chrono::Duration::from_std(MAX_SESSION_MAX_AGE).is_ok());
    }

    #[test]
    fn test_admin_requires_password() {
        let config = AuthConfig::from_vars(vars(&[("ADMIN_USERNAME", "root")]));
        assert!(config.admin.is_none());

        let config = AuthConfig::from_vars(vars(&[("ADMIN_PASSWORD", "Secret123")]));
        let admin = config.admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password, "Secret123");

        let config = AuthConfig::from_vars(vars(&[
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "Secret123"),
        ]));
        assert_eq!(config.admin.unwrap().username, "root");
    }
}
