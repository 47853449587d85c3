// Root and static routes

use axum::{http::StatusCode, routing::get, Json, Router};
use intranet_core::paths::{PATH_ROOT, PATH_STATIC};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Server status shown at the root
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

pub fn routes() -> Router {
    Router::new()
        .route(PATH_ROOT, get(index))
        .route(PATH_STATIC, get(static_root))
}

/// GET / - Landing endpoint, also the logout redirect target
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server status", body = StatusResponse)
    ),
    tag = "public"
)]
pub async fn index() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /static - Static asset root; assets are served by the frontend build
#[utoipa::path(
    get,
    path = "/static",
    responses(
        (status = 204, description = "No static content served by the API")
    ),
    tag = "public"
)]
pub async fn static_root() -> StatusCode {
    StatusCode::NO_CONTENT
}
