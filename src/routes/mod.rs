// Route exports
pub mod agents;
pub mod discovery;
pub mod matches;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::FeedBuilder;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, StoreError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub feed: FeedBuilder,
    pub default_feed_limit: usize,
    pub max_feed_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(agents::configure)
            .configure(discovery::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map a store error to its JSON error response.
pub(crate) fn store_error_response(err: StoreError) -> HttpResponse {
    let status_code = err.status_code();
    if status_code >= 500 {
        tracing::error!("Store failure: {}", err);
    } else {
        tracing::info!("Request rejected: {}", err);
    }

    let body = ErrorResponse {
        error: err.error_label().to_string(),
        message: err.to_string(),
        status_code,
    };

    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        403 => HttpResponse::Forbidden().json(body),
        404 => HttpResponse::NotFound().json(body),
        409 => HttpResponse::Conflict().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// 400 response for request validation failures.
pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
