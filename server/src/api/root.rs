pub const PATH: &str = "/";

pub const READY_MESSAGE: &str = "Backend ready";

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Static readiness message", body = String, content_type = "text/plain")
    )
)]
pub async fn handler() -> &'static str {
    READY_MESSAGE
}
