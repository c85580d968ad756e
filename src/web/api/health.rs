#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "OK"
}
