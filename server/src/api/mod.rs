pub mod root;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(root::handler))]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Every route the server answers.
pub fn router() -> Router {
    Router::new().route(root::PATH, get(root::handler))
}
