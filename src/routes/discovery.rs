use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AgentCard, ErrorResponse, FeedQuery, FeedResponse, MatchIntent, SwipeDirection, SwipeRequest,
    SwipeResponse,
};
use crate::routes::{store_error_response, validation_error_response, AppState};

/// Configure discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/discovery")
            .route("/{agent_id}/feed", web::get().to(get_feed))
            .route("/{agent_id}/swipe/{target_id}", web::post().to(swipe)),
    );
}

/// Discovery feed endpoint
///
/// GET /api/v1/discovery/{agent_id}/feed?limit=10&matchType=rivalry
///
/// Returns agents the requester has not yet swiped on, ranked by
/// compatibility score descending.
async fn get_feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
) -> impl Responder {
    let agent_id = path.into_inner();

    let limit = query
        .limit
        .map(|l| l as usize)
        .unwrap_or(state.default_feed_limit)
        .min(state.max_feed_limit);

    let intent_filter = match &query.match_type {
        Some(raw) => match MatchIntent::parse(raw).filter(MatchIntent::filterable) {
            Some(intent) => Some(intent),
            None => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "invalid_match_type".to_string(),
                    message: "matchType must be one of: rivalry, collaboration, friendship"
                        .to_string(),
                    status_code: 400,
                });
            }
        },
        None => None,
    };

    let requester = match state.postgres.get_agent(&agent_id).await {
        Ok(agent) => agent,
        Err(e) => return store_error_response(e),
    };

    let candidates = match state.postgres.candidate_pool(&agent_id).await {
        Ok(pool) => pool,
        Err(e) => return store_error_response(e),
    };

    tracing::debug!(
        "Building feed for {}: {} candidates, limit {}",
        agent_id,
        candidates.len(),
        limit
    );

    let result = state
        .feed
        .build_feed(&requester.traits(), candidates, limit, intent_filter);

    let feed: Vec<AgentCard> = result
        .entries
        .into_iter()
        .map(|entry| AgentCard {
            id: entry.profile.id,
            name: entry.profile.name,
            emoji: entry.profile.emoji,
            tagline: entry.profile.tagline,
            chains: entry.profile.chains,
            vibes: entry.profile.vibes,
            skills: entry.profile.skills,
            seeking: entry.profile.seeking,
            reputation: entry.profile.reputation,
            rivalries_won: entry.profile.rivalries_won,
            rivalries_lost: entry.profile.rivalries_lost,
            compatibility: entry.compatibility,
        })
        .collect();

    tracing::info!(
        "Returning {} feed entries for {} (from {} candidates)",
        feed.len(),
        agent_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FeedResponse {
        feed,
        total_candidates: result.total_candidates,
    })
}

/// Swipe endpoint
///
/// POST /api/v1/discovery/{agent_id}/swipe/{target_id}
///
/// Request body:
/// ```json
/// { "direction": "left|right|super" }
/// ```
///
/// A one-shot action: a second swipe on the same ordered pair is rejected
/// with 409. Returns match=true with the match id and compatibility when
/// the swipe completes a mutual right/super pair.
async fn swipe(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let (agent_id, target_id) = path.into_inner();

    let direction = match SwipeDirection::parse(&req.direction) {
        Some(d) => d,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_direction".to_string(),
                message: "direction must be one of: left, right, super".to_string(),
                status_code: 400,
            });
        }
    };

    match state
        .postgres
        .record_swipe(&agent_id, &target_id, direction)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(SwipeResponse {
            swiped: true,
            matched: outcome.matched,
            match_id: outcome.match_id,
            compatibility: outcome.compatibility,
        }),
        Err(e) => store_error_response(e),
    }
}
