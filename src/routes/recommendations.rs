use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRecord, RecommendationRequest},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    movie: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DirectorQuery {
    director: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    actor: Option<String>,
}

/// Handler for movie-seeded recommendations
pub async fn by_movie(
    State(state): State<AppState>,
    Query(params): Query<MovieQuery>,
) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let title = require_seed(params.movie, "movie")?;
    let records = state
        .recommender
        .get_recommendations(&RecommendationRequest::Movie { title })
        .await?;
    Ok(Json(records))
}

/// Handler for director-seeded recommendations
pub async fn by_director(
    State(state): State<AppState>,
    Query(params): Query<DirectorQuery>,
) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let name = require_seed(params.director, "director")?;
    let records = state
        .recommender
        .get_recommendations(&RecommendationRequest::Director { name })
        .await?;
    Ok(Json(records))
}

/// Handler for actor-seeded recommendations
pub async fn by_actor(
    State(state): State<AppState>,
    Query(params): Query<ActorQuery>,
) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let name = require_seed(params.actor, "actor")?;
    let records = state
        .recommender
        .get_recommendations(&RecommendationRequest::Actor { name })
        .await?;
    Ok(Json(records))
}

/// Handler for history-seeded recommendations; the seeds are fixed, so the
/// route takes no query parameter
pub async fn by_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let records = state
        .recommender
        .get_recommendations(&RecommendationRequest::History)
        .await?;
    Ok(Json(records))
}

fn require_seed(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(seed) if !seed.trim().is_empty() => Ok(seed),
        _ => Err(AppError::InvalidInput(format!(
            "{} query parameter is required",
            name
        ))),
    }
}
