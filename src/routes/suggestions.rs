use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Recommender;
use crate::models::{ErrorResponse, HealthResponse, SuggestedQuery, SuggestionsResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

/// Configure suggestion routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/suggested", web::get().to(suggested_for_you));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "experience-recommendations".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Suggested experiences endpoint
///
/// GET /api/v1/suggested?user_id={user_id}&k={k}
///
/// `k` must be within 1..=20 and defaults to 5. Any empty result is still a
/// success; only catalog store failures produce an error envelope.
async fn suggested_for_you(
    state: web::Data<AppState>,
    query: web::Query<SuggestedQuery>,
) -> impl Responder {
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for suggested request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            errors.to_string(),
            Some(query.user_id),
        ));
    }

    tracing::info!("Finding suggestions for user: {}, k: {}", query.user_id, query.k);

    match state.recommender.suggest(&query.user_id, query.k).await {
        Ok(suggestions) => {
            HttpResponse::Ok().json(SuggestionsResponse::success(query.user_id, suggestions.experiences))
        }
        Err(e) => {
            tracing::error!("Failed to build suggestions for {}: {}", query.user_id, e);
            HttpResponse::BadGateway().json(ErrorResponse::new(e.to_string(), Some(query.user_id)))
        }
    }
}
