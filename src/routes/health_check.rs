use actix_web::HttpResponse;

pub const HOME_MESSAGE: &str = "Backend is running 🚀";
pub const HELLO_MESSAGE: &str = "Hello working ✅";

/******************************************/
// Liveness routes
/******************************************/
/**
 * @route   GET /
 * @access  Public
 */
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(HOME_MESSAGE)
}

/**
 * @route   GET /hello
 * @access  Public
 */
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(HELLO_MESSAGE)
}
