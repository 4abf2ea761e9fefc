use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{PriorityVector, UserId};
use super::ingest::CandidateRecord;
use super::repository::{PreferenceError, PreferenceRepository};
use super::scoring::RankedMatch;
use super::service::{MatchingService, MatchingServiceError};

/// Candidates submitted for ranking against a user's stored priorities.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}

/// Stateless scoring request carrying its own priorities.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub priorities: PriorityVector,
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub complete: bool,
    pub matches: Vec<RankedMatch>,
}

/// Router builder exposing priority management and ranking endpoints.
pub fn matching_router<R>(service: Arc<MatchingService<R>>) -> Router
where
    R: PreferenceRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/priorities",
            get(priorities_handler::<R>).put(save_priorities_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/recommendations",
            post(recommendations_handler::<R>),
        )
        .route("/api/v1/matches/score", post(score_handler::<R>))
        .with_state(service)
}

pub(crate) async fn priorities_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    match service.priorities(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_priorities_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(priorities): axum::Json<PriorityVector>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    match service.save_priorities(&UserId(user_id), priorities) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recommendations_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    match service.recommend(&UserId(user_id), request.candidates) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let candidates = service.ingest().candidates(request.candidates);
    let matches = service.score(&request.priorities, &candidates);
    let body = ScoreResponse {
        complete: request.priorities.is_complete(),
        matches,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn error_response(err: MatchingServiceError) -> Response {
    let status = match &err {
        MatchingServiceError::InvalidPriorities(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingServiceError::Repository(PreferenceError::NotFound) => StatusCode::NOT_FOUND,
        MatchingServiceError::Repository(PreferenceError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
