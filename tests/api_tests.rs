use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use movie_recommender::api::handlers::{GenreRecommendationResponse, UserRecommendationResponse};
use movie_recommender::api::{create_router, AppState};
use movie_recommender::models::{Genre, GenreFlags, RatingRecord};
use movie_recommender::services::sources::StaticSource;

fn genre_corpus() -> Vec<RatingRecord> {
    vec![
        RatingRecord::new(1, "Toy Story", 5.0, GenreFlags::from_genres(&[Genre::Animation])),
        RatingRecord::new(2, "Aliens", 4.0, GenreFlags::from_genres(&[Genre::Action])),
    ]
}

fn user_corpus() -> Vec<RatingRecord> {
    let drama = GenreFlags::from_genres(&[Genre::Drama]);
    vec![
        RatingRecord::new(1, "A", 5.0, drama),
        RatingRecord::new(1, "B", 3.0, drama),
        RatingRecord::new(2, "A", 5.0, drama),
        RatingRecord::new(2, "B", 3.0, drama),
        RatingRecord::new(2, "C", 4.0, drama),
        RatingRecord::new(3, "A", 5.0, drama),
        RatingRecord::new(3, "B", 3.0, drama),
        RatingRecord::new(3, "C", 4.0, drama),
    ]
}

async fn create_test_server(records: Vec<RatingRecord>) -> TestServer {
    let source = Arc::new(StaticSource::new(records));
    let state = AppState::initialize(source, 5).await.unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Vec::new()).await;
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_titles_and_users() {
    let server = create_test_server(user_corpus()).await;

    let titles: Vec<String> = server.get("/api/v1/titles").await.json();
    assert_eq!(titles, vec!["A", "B", "C"]);

    let users: Vec<u32> = server.get("/api/v1/users").await.json();
    assert_eq!(users, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_genre_recommendation_only_candidate() {
    let server = create_test_server(genre_corpus()).await;

    let response = server
        .get("/api/v1/recommendations/genre")
        .add_query_param("title", "Toy Story")
        .add_query_param("top_n", 5)
        .await;

    response.assert_status_ok();
    let body: GenreRecommendationResponse = response.json();
    assert_eq!(body.title, "Toy Story");
    assert_eq!(body.recommendations, vec!["Aliens"]);
}

#[tokio::test]
async fn test_genre_recommendation_unknown_title_is_empty() {
    let server = create_test_server(genre_corpus()).await;

    let response = server
        .get("/api/v1/recommendations/genre")
        .add_query_param("title", "Heat")
        .await;

    response.assert_status_ok();
    let body: GenreRecommendationResponse = response.json();
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_user_recommendation_from_similar_users() {
    let server = create_test_server(user_corpus()).await;

    let response = server
        .get("/api/v1/recommendations/users/1")
        .add_query_param("top_n", 1)
        .await;

    response.assert_status_ok();
    let body: UserRecommendationResponse = response.json();
    assert_eq!(body.user_id, 1);
    assert_eq!(body.recommendations, vec!["C"]);
}

#[tokio::test]
async fn test_user_recommendation_unknown_user_is_empty() {
    let server = create_test_server(user_corpus()).await;

    let response = server.get("/api/v1/recommendations/users/943").await;

    response.assert_status_ok();
    let body: UserRecommendationResponse = response.json();
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_non_positive_top_n_is_empty() {
    let server = create_test_server(user_corpus()).await;

    for top_n in [0, -3] {
        let body: UserRecommendationResponse = server
            .get("/api/v1/recommendations/users/1")
            .add_query_param("top_n", top_n)
            .await
            .json();
        assert!(body.recommendations.is_empty());

        let body: GenreRecommendationResponse = server
            .get("/api/v1/recommendations/genre")
            .add_query_param("title", "A")
            .add_query_param("top_n", top_n)
            .await
            .json();
        assert!(body.recommendations.is_empty());
    }
}

#[tokio::test]
async fn test_non_numeric_user_id_is_rejected() {
    let server = create_test_server(user_corpus()).await;

    let response = server
        .get("/api/v1/recommendations/users/abc")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_and_reload() {
    let server = create_test_server(user_corpus()).await;

    let stats: Value = server.get("/api/v1/stats").await.json();
    assert_eq!(stats["users"], 3);
    assert_eq!(stats["titles"], 3);
    assert_eq!(stats["ratings"], 8);

    let response = server.post("/api/v1/admin/reload").await;
    response.assert_status_ok();
    let reloaded: Value = response.json();
    assert_eq!(reloaded["users"], 3);
    assert_eq!(reloaded["ratings"], 8);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = create_test_server(Vec::new()).await;
    let request_id = "0b8e3a4e-7f5c-4d1a-9c59-2f1e6f7f4b2a";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(request_id),
        )
        .await;

    assert_eq!(response.headers()["x-request-id"], request_id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server(Vec::new()).await;

    let response = server.get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
