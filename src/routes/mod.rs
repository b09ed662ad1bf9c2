// Route exports
pub mod suggestions;

use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use crate::models::{ErrorResponse, ServiceInfoResponse};

/// Suggestion routes are served under `/api/v1` and, for existing callers, at the root
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(service_info))
        .service(web::scope("/api/v1").configure(suggestions::configure))
        .configure(suggestions::configure);
}

/// Root endpoint with API information
async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "Experience Recommendations API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: serde_json::json!({
            "suggested": "/suggested?user_id={user_id}&k={k}",
            "health": "/health",
            "v1": {
                "suggested": "/api/v1/suggested?user_id={user_id}&k={k}",
                "health": "/api/v1/health",
            },
        }),
    })
}

/// Render query string errors (missing user_id, non-numeric k) as the error envelope
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let body = ErrorResponse::new(format!("Invalid query: {}", err), None);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
