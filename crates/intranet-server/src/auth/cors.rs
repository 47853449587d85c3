// CORS layer built from the core CORS policy
// Decision: Origins are checked per request by a predicate, so wildcard host patterns work
// Decision: Explicit header list (wildcard headers cannot be combined with credentials)

use axum::http::{header, request::Parts, HeaderValue, Method};
use intranet_core::CorsPolicyProvider;
use std::sync::Arc;
use tower_http::cors::{AllowMethods, AllowOrigin, CorsLayer};

/// Build the tower-http CORS layer for a policy provider
pub fn cors_layer(provider: CorsPolicyProvider) -> CorsLayer {
    let provider = Arc::new(provider);
    let policy = provider.policy().clone();

    let methods: Vec<Method> = policy
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();

    tracing::info!(
        origins = ?policy
            .allowed_origin_patterns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        methods = %policy.allowed_methods_header(),
        credentials = policy.allow_credentials,
        "CORS policy configured"
    );

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| provider.policy_for(origin).allows_origin(origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::list(methods))
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
        ])
        .allow_credentials(policy.allow_credentials)
}
