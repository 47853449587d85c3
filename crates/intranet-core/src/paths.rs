// Route paths shared by the server and the route classifier
//
// The browser client builds its URLs from `API_PREFIX` (served by the
// metadata endpoint), so these values must stay in sync with it.

/// Prefix of every JSON API route, without slashes
pub const API_PREFIX: &str = "api";

pub const PATH_ROOT: &str = "/";

/// Static assets of the web client
pub const PATH_STATIC: &str = "/static";

/// Client bootstrap metadata (API prefix, validation rules)
pub const PATH_METADATA: &str = "/metadata";

pub const PATH_API_LOGIN: &str = "/api/login";

pub const PATH_API_LOGOUT: &str = "/api/logout";

pub const PATH_API_ACCOUNTS: &str = "/api/accounts";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_paths_use_prefix() {
        for path in [PATH_API_LOGIN, PATH_API_LOGOUT, PATH_API_ACCOUNTS] {
            assert!(path.starts_with(&format!("/{}/", API_PREFIX)), "{}", path);
        }
    }
}
