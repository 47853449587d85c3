// Server configuration loaded from environment variables.
// Decision: CORS_ALLOWED_ORIGIN_PATTERNS replaces the default host patterns when set

use intranet_core::{cors::DEFAULT_ORIGIN_PATTERNS, CorsPolicy, CorsPolicyProvider};

use crate::auth::AuthConfig;

/// Default listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (INTRANET_ADDR)
    pub addr: String,
    pub auth: AuthConfig,
    /// Allowed origin host patterns, e.g. `192.168.*`
    pub cors_origin_patterns: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            auth: AuthConfig::default(),
            cors_origin_patterns: DEFAULT_ORIGIN_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let addr = var("INTRANET_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.addr);

        let cors_origin_patterns = var("CORS_ALLOWED_ORIGIN_PATTERNS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|patterns| !patterns.is_empty())
            .unwrap_or(defaults.cors_origin_patterns);

        Self {
            addr,
            auth: AuthConfig::from_vars(&var),
            cors_origin_patterns,
        }
    }

    pub fn cors_policy(&self) -> CorsPolicyProvider {
        CorsPolicyProvider::new(CorsPolicy::with_origin_patterns(&self.cors_origin_patterns))
    }
}
