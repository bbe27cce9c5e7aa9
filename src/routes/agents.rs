use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ListAgentsQuery, RegisterAgentRequest, UpdateAgentRequest};
use crate::routes::{store_error_response, validation_error_response, AppState};

/// Configure agent profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/agents")
            .route("", web::post().to(register_agent))
            .route("", web::get().to(list_agents))
            .route("/by-name/{name}", web::get().to(get_agent_by_name))
            .route("/{agent_id}", web::get().to(get_agent))
            .route("/{agent_id}", web::patch().to(update_agent)),
    );
}

/// Register a new agent
///
/// POST /api/v1/agents
async fn register_agent(
    state: web::Data<AppState>,
    req: web::Json<RegisterAgentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    match state.postgres.register_agent(&req).await {
        Ok(agent) => HttpResponse::Created().json(agent),
        Err(e) => store_error_response(e),
    }
}

/// Get agent by ID
///
/// GET /api/v1/agents/{agent_id}
async fn get_agent(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let agent_id = path.into_inner();

    match state.postgres.get_agent(&agent_id).await {
        Ok(agent) => HttpResponse::Ok().json(agent),
        Err(e) => store_error_response(e),
    }
}

/// Get agent by name
///
/// GET /api/v1/agents/by-name/{name}
async fn get_agent_by_name(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match state.postgres.get_agent_by_name(&name).await {
        Ok(agent) => HttpResponse::Ok().json(agent),
        Err(e) => store_error_response(e),
    }
}

/// Partially update an agent profile
///
/// PATCH /api/v1/agents/{agent_id}
async fn update_agent(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateAgentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let agent_id = path.into_inner();

    match state.postgres.update_agent(&agent_id, &req).await {
        Ok(agent) => HttpResponse::Ok().json(agent),
        Err(e) => store_error_response(e),
    }
}

/// List agents with pagination
///
/// GET /api/v1/agents?skip=0&limit=20
async fn list_agents(
    state: web::Data<AppState>,
    query: web::Query<ListAgentsQuery>,
) -> impl Responder {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(20).min(100);

    match state.postgres.list_agents(skip, limit).await {
        Ok(agents) => HttpResponse::Ok().json(agents),
        Err(e) => store_error_response(e),
    }
}
