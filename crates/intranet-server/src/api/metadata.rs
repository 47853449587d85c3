// Client metadata route
// Decision: Public, so the login page can read validation rules before logging in

use axum::{extract::State, routing::get, Json, Router};
use intranet_core::{paths::PATH_METADATA, Metadata};
use std::sync::Arc;

/// Create metadata routes
pub fn routes(metadata: Arc<Metadata>) -> Router {
    Router::new()
        .route(PATH_METADATA, get(get_metadata))
        .with_state(metadata)
}

/// GET /metadata - API prefix and input validation rules
#[utoipa::path(
    get,
    path = "/metadata",
    responses(
        (status = 200, description = "Client metadata", body = Metadata)
    ),
    tag = "metadata"
)]
pub async fn get_metadata(State(metadata): State<Arc<Metadata>>) -> Json<Metadata> {
    Json(metadata.as_ref().clone())
}
