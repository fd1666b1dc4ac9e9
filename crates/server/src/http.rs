//! HTTP Endpoints
//!
//! REST API for mood generation, persona context and the funnel.

use axum::{
    extract::{Json, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use moodcast_core::{GenerationRequest, Intensity, MoodState, PersonaContext};
use moodcast_funnel::{ConversationState, FunnelRecommendation, OfferKind};
use moodcast_persona::ContextRequest;

use crate::metrics::{
    record_funnel_message, record_hook_selection, record_mood_generated, record_objection,
};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.get_config();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    drop(config);

    Router::new()
        // Mood endpoints
        .route("/api/mood", post(generate_mood))
        .route("/api/mood/trigger/:event", post(trigger_mood))
        .route("/api/mood/current", get(current_mood))
        .route("/api/mood/history", get(mood_history))
        // Persona endpoints
        .route("/api/persona/context", post(persona_context))
        // Funnel endpoints
        .route("/api/funnel/:user_id/messages", post(analyze_message))
        .route(
            "/api/funnel/:user_id",
            get(get_conversation).delete(reset_conversation),
        )
        .route("/api/funnel/:user_id/pitch", post(mark_pitch))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty or all invalid, allows localhost:3000 only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Mood generation request; every field optional
#[derive(Debug, Default, Deserialize)]
struct MoodRequest {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    intensity: Option<Intensity>,
    /// Named trigger event; ignored when a category or intensity is forced
    #[serde(default)]
    trigger: Option<String>,
}

/// Generate a new active mood
async fn generate_mood(
    State(state): State<AppState>,
    Json(request): Json<MoodRequest>,
) -> Result<Json<MoodState>, ServerError> {
    let mood = if request.category.is_some() || request.intensity.is_some() {
        state.engine.generate_mood_with(
            request.category.as_deref(),
            request.intensity,
            request.trigger.as_deref(),
        )?
    } else {
        state.engine.generate_mood(request.trigger.as_deref())?
    };

    record_mood_generated(&mood);
    Ok(Json(mood))
}

/// Mood change for a named event
async fn trigger_mood(
    State(state): State<AppState>,
    Path(event): Path<String>,
) -> Result<Json<MoodState>, ServerError> {
    let mood = state.engine.trigger_change(&event)?;
    record_mood_generated(&mood);
    Ok(Json(mood))
}

async fn current_mood(State(state): State<AppState>) -> Result<Json<MoodState>, ServerError> {
    state
        .engine
        .current_mood()
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("no active mood".to_string()))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn mood_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<serde_json::Value> {
    let moods = state
        .engine
        .mood_history(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
    Json(serde_json::json!({
        "count": moods.len(),
        "moods": moods,
    }))
}

/// Resolved context plus rendered voice instructions
#[derive(Debug, Serialize)]
struct PersonaContextResponse {
    context: PersonaContext,
    instructions: String,
}

async fn persona_context(
    State(state): State<AppState>,
    Json(request): Json<ContextRequest>,
) -> Result<Json<PersonaContextResponse>, ServerError> {
    let had_active = state.engine.current_mood().is_some();
    let context = state.engine.get_persona_context(&request)?;

    if request.mood.is_none() && !had_active {
        record_mood_generated(&context.mood);
    }
    if request.include_hook {
        record_hook_selection(context.has_hook());
    }

    let instructions = state.engine.prompt_enhancement(&context);
    Ok(Json(PersonaContextResponse {
        context,
        instructions,
    }))
}

/// Incoming user message
#[derive(Debug, Deserialize)]
struct MessageRequest {
    text: String,
    /// Content type for the persona voice of the reply
    #[serde(default)]
    content_type: Option<String>,
}

/// Funnel recommendation with a ready-to-send generation request
#[derive(Debug, Serialize)]
struct MessageResponse {
    recommendation: FunnelRecommendation,
    generation: GenerationRequest,
}

async fn analyze_message(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let user_id = valid_user_id(&user_id)?;
    let recommendation = state.funnel.analyze_message(user_id, &request.text)?;
    record_funnel_message(&recommendation);
    record_objection(&recommendation);

    let mut context_request = ContextRequest::new();
    context_request.content_type = request.content_type;
    let had_active = state.engine.current_mood().is_some();
    let context = state.engine.get_persona_context(&context_request)?;
    if !had_active {
        record_mood_generated(&context.mood);
    }

    let voice = state.engine.prompt_enhancement(&context);
    let funnel = recommendation.prompt_fragment();
    let generation = GenerationRequest::compose(
        "",
        &[voice.as_str(), funnel.as_str()],
        request.text,
        context.temperature,
    );

    Ok(Json(MessageResponse {
        recommendation,
        generation,
    }))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ConversationState>, ServerError> {
    let user_id = valid_user_id(&user_id)?;
    state
        .funnel
        .conversation(user_id)?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("conversation '{}'", user_id)))
}

async fn reset_conversation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let user_id = valid_user_id(&user_id)?;
    if state.funnel.reset_conversation(user_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(format!("conversation '{}'", user_id)))
    }
}

#[derive(Debug, Deserialize)]
struct PitchRequest {
    kind: OfferKind,
}

/// Record that a pitch was made outside the funnel's own flow
async fn mark_pitch(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<PitchRequest>,
) -> Result<Json<ConversationState>, ServerError> {
    let user_id = valid_user_id(&user_id)?;
    let known = match request.kind {
        OfferKind::Product => state.funnel.mark_solution_suggested(user_id)?,
        OfferKind::Business => state.funnel.mark_business_suggested(user_id)?,
    };
    if !known {
        return Err(ServerError::NotFound(format!("conversation '{}'", user_id)));
    }

    state
        .funnel
        .conversation(user_id)?
        .map(Json)
        .ok_or_else(|| ServerError::Internal("conversation vanished after update".to_string()))
}

fn valid_user_id(user_id: &str) -> Result<&str, ServerError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ServerError::InvalidRequest("user id is empty".to_string()));
    }
    Ok(trimmed)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let catalog = state.engine.catalog();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.get_config().environment,
        "catalog": {
            "moods": catalog.moods.len(),
            "personas": catalog.personas.len(),
            "hooks": catalog.hooks.len(),
            "triggers": catalog.triggers.len(),
        },
        "active_mood": state.engine.current_mood().map(|m| m.describe()),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics disabled").into_response(),
    }
}
