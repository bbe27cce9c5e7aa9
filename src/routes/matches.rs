use actix_web::{web, HttpResponse, Responder};

use crate::models::{ListMatchesQuery, MatchSummary, UnmatchResponse};
use crate::routes::{store_error_response, AppState};

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/matches")
            .route("/{agent_id}", web::get().to(list_matches))
            .route("/{agent_id}/match/{match_id}", web::get().to(get_match))
            .route("/{agent_id}/match/{match_id}", web::delete().to(unmatch)),
    );
}

/// List matches for an agent
///
/// GET /api/v1/matches/{agent_id}?activeOnly=true
async fn list_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListMatchesQuery>,
) -> impl Responder {
    let agent_id = path.into_inner();

    match state
        .postgres
        .matches_for_agent(&agent_id, query.active_only)
        .await
    {
        Ok(matches) => {
            let summaries: Vec<MatchSummary> = matches
                .into_iter()
                .map(|(record, partner)| MatchSummary {
                    id: record.id,
                    partner,
                    match_type: record.match_type,
                    compatibility_score: record.compatibility_score,
                    compatibility_reasons: record.compatibility_reasons,
                    created_at: record.created_at,
                    is_active: record.is_active,
                })
                .collect();
            HttpResponse::Ok().json(summaries)
        }
        Err(e) => store_error_response(e),
    }
}

/// Get a specific match
///
/// GET /api/v1/matches/{agent_id}/match/{match_id}
async fn get_match(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
) -> impl Responder {
    let (agent_id, match_id) = path.into_inner();

    match state.postgres.get_match_for(&agent_id, match_id).await {
        Ok((record, partner)) => HttpResponse::Ok().json(MatchSummary {
            id: record.id,
            partner,
            match_type: record.match_type,
            compatibility_score: record.compatibility_score,
            compatibility_reasons: record.compatibility_reasons,
            created_at: record.created_at,
            is_active: record.is_active,
        }),
        Err(e) => store_error_response(e),
    }
}

/// Unmatch endpoint
///
/// DELETE /api/v1/matches/{agent_id}/match/{match_id}
///
/// Sets the match inactive; deactivation is terminal. A second unmatch
/// on an already-inactive match returns 409.
async fn unmatch(state: web::Data<AppState>, path: web::Path<(String, i64)>) -> impl Responder {
    let (agent_id, match_id) = path.into_inner();

    match state.postgres.unmatch(&agent_id, match_id).await {
        Ok(()) => HttpResponse::Ok().json(UnmatchResponse { unmatched: true }),
        Err(e) => store_error_response(e),
    }
}
