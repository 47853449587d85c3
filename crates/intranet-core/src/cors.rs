// CORS policy for the browser client
// Decision: One fixed policy for every origin; only the origin check varies
// Decision: Patterns match the origin's host, so "localhost" allows http://localhost:3000

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use url::{Host, Url};

/// Methods the client is allowed to use cross-origin
pub const DEFAULT_ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Hosts allowed by default: loopback and the office LAN
pub const DEFAULT_ORIGIN_PATTERNS: [&str; 3] = ["127.0.0.1", "localhost", "192.168.*"];

/// A single allowed-origin pattern
///
/// A trailing `*` stands for the remaining octets of an IPv4 host
/// (`192.168.*` matches `192.168.1.5`, never `192.168.evil.com`);
/// anything else must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    Exact(String),
    Wildcard { prefix: String },
}

impl OriginPattern {
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim().to_ascii_lowercase();
        match pattern.strip_suffix('*') {
            Some(prefix) => OriginPattern::Wildcard {
                prefix: prefix.to_string(),
            },
            None => OriginPattern::Exact(pattern),
        }
    }

    /// Check a request origin (full `scheme://host:port` or bare host)
    pub fn matches(&self, origin: &str) -> bool {
        let host = origin_host(origin);
        match self {
            OriginPattern::Exact(expected) => host == expected.as_str(),
            OriginPattern::Wildcard { prefix } => match host.strip_prefix(prefix.as_str()) {
                Some(rest) => is_octet_tail(rest) && is_ipv4(&host),
                None => false,
            },
        }
    }
}

impl FromStr for OriginPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OriginPattern::parse(s))
    }
}

impl fmt::Display for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginPattern::Exact(host) => write!(f, "{}", host),
            OriginPattern::Wildcard { prefix } => write!(f, "{}*", prefix),
        }
    }
}

/// One or more dot-separated decimal octets, e.g. `1.5`
fn is_octet_tail(rest: &str) -> bool {
    rest.split('.').all(|octet| {
        !octet.is_empty() && octet.len() <= 3 && octet.bytes().all(|b| b.is_ascii_digit())
    })
}

fn is_ipv4(host: &str) -> bool {
    matches!(Host::parse(host), Ok(Host::Ipv4(_)))
}

/// Reduce an origin to its lowercase host
fn origin_host(origin: &str) -> Cow<'_, str> {
    let origin = origin.trim();
    if origin.contains("://") {
        if let Some(host) = Url::parse(origin)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
        {
            return Cow::Owned(host);
        }
        return Cow::Borrowed("");
    }

    // Bare "host" or "host:port"
    let host = match origin.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => origin,
    };
    Cow::Owned(host.to_ascii_lowercase())
}

/// Allowed methods, origins and credential policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_methods: Vec<String>,
    pub allowed_origin_patterns: Vec<OriginPattern>,
    pub allow_credentials: bool,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::with_origin_patterns(DEFAULT_ORIGIN_PATTERNS)
    }
}

impl CorsPolicy {
    /// Default methods and credentials with custom origin patterns
    pub fn with_origin_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_methods: DEFAULT_ALLOWED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_origin_patterns: patterns
                .into_iter()
                .map(|p| OriginPattern::parse(p.as_ref()))
                .collect(),
            allow_credentials: true,
        }
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origin_patterns
            .iter()
            .any(|pattern| pattern.matches(origin))
    }

    /// Value of `Access-Control-Allow-Methods`
    pub fn allowed_methods_header(&self) -> String {
        self.allowed_methods.join(",")
    }
}

/// Hands out the CORS policy for a request origin
#[derive(Debug, Clone, Default)]
pub struct CorsPolicyProvider {
    policy: CorsPolicy,
}

impl CorsPolicyProvider {
    pub fn new(policy: CorsPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CorsPolicy {
        &self.policy
    }

    /// The policy is the same for every origin; callers check
    /// `allows_origin` on the result.
    pub fn policy_for(&self, origin: &str) -> &CorsPolicy {
        tracing::trace!(origin, "Resolving CORS policy");
        &self.policy
    }
}
