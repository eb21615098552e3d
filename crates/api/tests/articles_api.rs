//! HTTP-level tests for the article, search, stats and bulk endpoints.
//!
//! Articles are created through the repository layer, then read and
//! modified through the router.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_app, delete, get, post_json, test_storage};
use serde_json::json;
use wikicache_db::models::article::NewArticle;
use wikicache_db::repositories::{ArticleRepo, FavoriteRepo};
use wikicache_db::Storage;

async fn seed(storage: &Storage, title: &str, content: &str) -> i64 {
    ArticleRepo::insert(storage, &NewArticle::new(title, content, None))
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Listing and detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_newest_first_in_data_envelope() {
    let storage = test_storage().await;
    let first = seed(&storage, "First", "The first article body.").await;
    let second = seed(&storage, "Second", "The second article body.").await;
    let app = build_app(storage);

    let response = get(app, "/api/articles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn list_clamps_limit() {
    let storage = test_storage().await;
    seed(&storage, "First", "The first article body.").await;
    seed(&storage, "Second", "The second article body.").await;
    let app = build_app(storage);

    let json = body_json(get(app, "/api/articles?limit=0").await).await;

    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_article_includes_tags_and_favorite_flag() {
    let storage = test_storage().await;
    let input = NewArticle::new("Ada Lovelace", "An English mathematician and writer.", None)
        .with_tags(["people", "computing"]);
    let id = ArticleRepo::insert(&storage, &input).await.unwrap();
    FavoriteRepo::add(&storage, id).await.unwrap();
    let app = build_app(storage);

    let response = get(app, &format!("/api/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["title"], "Ada Lovelace");
    assert_eq!(data["content"], "An English mathematician and writer.");
    assert_eq!(data["is_favorite"], true);
    let mut tags: Vec<&str> = data["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    tags.sort_unstable();
    assert_eq!(tags, vec!["computing", "people"]);
}

#[tokio::test]
async fn get_missing_article_returns_404_json() {
    let app = build_app(test_storage().await);

    let response = get(app, "/api/articles/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "Article with id 999 not found");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_article_then_404() {
    let storage = test_storage().await;
    let id = seed(&storage, "Doomed", "This article will be deleted.").await;
    let app = build_app(storage);

    let response = delete(app.clone(), &format!("/api/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.clone(), &format!("/api/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_delete_counts_actual_removals() {
    let storage = test_storage().await;
    let a = seed(&storage, "A", "Article A body text.").await;
    let b = seed(&storage, "B", "Article B body text.").await;
    let app = build_app(storage);

    let response = post_json(app, "/api/bulk/delete", json!({ "ids": [a, b, 12345] })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["deleted"], 2);
    assert_eq!(data["requested"], 3);
}

#[tokio::test]
async fn bulk_delete_rejects_empty_and_oversized_batches() {
    let app = build_app(test_storage().await);

    let response = post_json(app.clone(), "/api/bulk/delete", json!({ "ids": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let ids: Vec<i64> = (1..=1001).collect();
    let response = post_json(app, "/api/bulk/delete", json!({ "ids": ids })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

// ---------------------------------------------------------------------------
// Search and stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_ranks_title_matches_first() {
    let storage = test_storage().await;
    let content_only = seed(&storage, "Computing", "Charles Babbage designed engines.").await;
    let title_match = seed(&storage, "Charles Babbage", "An English polymath.").await;
    let app = build_app(storage);

    let response = post_json(app, "/api/search", json!({ "query": "babbage" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["query"], "babbage");
    assert_eq!(data["count"], 2);
    let results = data["results"].as_array().unwrap();
    assert_eq!(results[0]["id"], title_match);
    assert_eq!(results[0]["relevance_score"], 2);
    assert_eq!(results[1]["id"], content_only);
    assert_eq!(results[1]["relevance_score"], 1);
}

#[tokio::test]
async fn blank_search_is_empty_not_an_error() {
    let storage = test_storage().await;
    seed(&storage, "Anything", "Some searchable body text.").await;
    let app = build_app(storage);

    let response = post_json(app, "/api/search", json!({ "query": "   " })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 0);
}

#[tokio::test]
async fn stats_report_totals() {
    let storage = test_storage().await;
    let body = vec!["word"; 50].join(" ");
    seed(&storage, "Turing Machine", &body).await;
    let app = build_app(storage);

    let response = get(app, "/api/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["total_articles"], 1);
    assert_eq!(data["total_words"], 50);
    assert!(data["newest_article_date"].is_string());
}
