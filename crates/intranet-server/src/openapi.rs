// OpenAPI specification generation
//
// Used by the export-openapi binary for static spec generation.

use crate::{api, auth};
use intranet_core::{Account, Credentials, LengthRule, Metadata};
use utoipa::OpenApi;

/// OpenAPI documentation for the intranet API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::index::index,
        api::index::static_root,
        api::metadata::get_metadata,
        auth::routes::login,
        auth::routes::logout,
        auth::routes::get_current_account,
        api::accounts::get_account,
    ),
    components(
        schemas(
            Account,
            Credentials,
            Metadata,
            LengthRule,
            api::index::StatusResponse,
            api::common::ErrorResponse,
        )
    ),
    tags(
        (name = "public", description = "Endpoints reachable without a session"),
        (name = "metadata", description = "Client metadata and validation rules"),
        (name = "auth", description = "Login, logout and current account"),
        (name = "accounts", description = "Account lookup")
    ),
    info(
        title = "Intranet API",
        version = "0.1.0",
        description = "Security layer of the intranet backend: public routes, session login and logout, CORS",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_all_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/static",
            "/metadata",
            "/api/login",
            "/api/logout",
            "/api/accounts/me",
            "/api/accounts/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_spec_serializes() {
        let json = ApiDoc::to_json().unwrap();
        assert!(json.contains("Intranet API"));
    }
}
