//! Plain-text landing route.

use actix_web::{HttpResponse, get, http::header::ContentType};

/// Body served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the liquor store";

/// Greet visitors hitting the service root.
#[utoipa::path(
    get,
    path = "/",
    tags = ["root"],
    responses((status = 200, description = "Welcome message", body = String, content_type = "text/plain"))
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(WELCOME_MESSAGE)
}
