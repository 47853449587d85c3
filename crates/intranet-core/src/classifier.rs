// Route classifier: which request paths skip authentication
// Decision: Exact string match only, no wildcard or prefix matching
// Decision: The set is built once at startup and never mutated

use std::collections::BTreeSet;

use crate::paths::{PATH_API_LOGIN, PATH_METADATA, PATH_ROOT, PATH_STATIC};

/// Set of paths reachable without an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteClassifier {
    public_paths: BTreeSet<String>,
}

impl Default for RouteClassifier {
    /// Root, static assets, metadata and login
    fn default() -> Self {
        Self::new([PATH_ROOT, PATH_STATIC, PATH_METADATA, PATH_API_LOGIN])
    }
}

impl RouteClassifier {
    pub fn new<I, S>(public_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public_paths: public_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff `path` exactly matches one of the public paths
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(path)
    }

    pub fn public_paths(&self) -> impl Iterator<Item = &str> {
        self.public_paths.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{PATH_API_ACCOUNTS, PATH_API_LOGOUT};

    #[test]
    fn test_configured_paths_are_public() {
        let classifier = RouteClassifier::default();
        for path in ["/", "/static", "/metadata", "/api/login"] {
            assert!(classifier.is_public(path), "{} should be public", path);
        }
        assert_eq!(classifier.public_paths().count(), 4);
    }

    #[test]
    fn test_other_paths_require_authentication() {
        let classifier = RouteClassifier::default();
        for path in [
            PATH_API_LOGOUT,
            PATH_API_ACCOUNTS,
            "/api/accounts/1",
            "/api/accounts/me",
            "",
            "/unknown",
        ] {
            assert!(!classifier.is_public(path), "{} should be protected", path);
        }
    }

    #[test]
    fn test_no_prefix_or_wildcard_matching() {
        let classifier = RouteClassifier::default();
        assert!(!classifier.is_public("/static/app.js"));
        assert!(!classifier.is_public("/static/"));
        assert!(!classifier.is_public("/metadata/extra"));
        assert!(!classifier.is_public("/api/login/"));
        assert!(!classifier.is_public("metadata"));
        assert!(!classifier.is_public("/METADATA"));
    }

    #[test]
    fn test_custom_paths() {
        let classifier = RouteClassifier::new(["/health"]);
        assert!(classifier.is_public("/health"));
        assert!(!classifier.is_public("/"));
    }
}
