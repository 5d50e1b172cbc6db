use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::request_id::RequestId;
use crate::models::UserId;
use crate::services::SnapshotStats;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct GenreRecommendationQuery {
    pub title: String,
    pub top_n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecommendationQuery {
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenreRecommendationResponse {
    pub title: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRecommendationResponse {
    pub user_id: UserId,
    pub recommendations: Vec<String>,
}

/// Requested list length; missing means the configured default, non-positive means none
fn resolve_top_n(requested: Option<i64>, default: usize) -> usize {
    match requested {
        Some(top_n) => usize::try_from(top_n).unwrap_or(0),
        None => default,
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List every title that can be used for genre recommendations
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.snapshot().await.titles())
}

/// List every user id that can be used for collaborative recommendations
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserId>> {
    Json(state.snapshot().await.users().to_vec())
}

/// Titles similar in genre to the requested title
pub async fn recommend_by_genre(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<GenreRecommendationQuery>,
) -> Json<GenreRecommendationResponse> {
    let top_n = resolve_top_n(query.top_n, state.default_top_n());
    let recommendations = state.snapshot().await.recommend_by_genre(&query.title, top_n);

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        top_n,
        results = recommendations.len(),
        "Genre recommendations served"
    );

    Json(GenreRecommendationResponse {
        title: query.title,
        recommendations,
    })
}

/// Unseen titles rated highly by users similar to the requested user
pub async fn recommend_for_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<UserRecommendationQuery>,
) -> Json<UserRecommendationResponse> {
    let top_n = resolve_top_n(query.top_n, state.default_top_n());
    let recommendations = state.snapshot().await.recommend_for_user(user_id, top_n);

    tracing::info!(
        request_id = %request_id,
        user_id,
        top_n,
        results = recommendations.len(),
        "User recommendations served"
    );

    Json(UserRecommendationResponse {
        user_id,
        recommendations,
    })
}

/// Statistics of the current snapshot
pub async fn get_stats(State(state): State<AppState>) -> Json<SnapshotStats> {
    Json(state.snapshot().await.stats())
}

/// Rebuild the snapshot from the configured source
pub async fn reload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<SnapshotStats>> {
    tracing::info!(request_id = %request_id, "Processing reload request");

    let recommender = state.reload().await?;
    let stats = recommender.stats();

    tracing::info!(
        request_id = %request_id,
        users = stats.users,
        titles = stats.titles,
        "Reload completed"
    );

    Ok(Json(stats))
}
