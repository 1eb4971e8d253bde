//! HTTP-level integration tests for the journal: CRUD, the
//! same-category related strip, and AI draft generation wiring.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, assert_error_code, body_json, delete_auth, get, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn post_payload(slug: &str, category: &str, published_on: &str) -> serde_json::Value {
    serde_json::json!({
        "slug": slug,
        "title": format!("Post {slug}"),
        "category": category,
        "published_on": published_on,
        "published": true,
    })
}

async fn create_post(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/blog", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Test: create round-trips the editorial fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_fetch_post(pool: PgPool) {
    let created = create_post(
        &pool,
        serde_json::json!({
            "slug": "planning-a-lake-district-wedding",
            "title": "Planning a Lake District Wedding",
            "excerpt": "Everything we wish couples knew.",
            "body_html": "<p>Start with the light.</p>",
            "category": "planning",
            "published_on": "2025-06-01",
            "published": true,
            "meta_title": "Lake District Wedding Planning",
        }),
    )
    .await;
    assert!(created["data"]["id"].is_string());
    assert_eq!(created["data"]["published_on"], "2025-06-01");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog/planning-a-lake-district-wedding").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "planning");
    assert_eq!(json["data"]["excerpt"], "Everything we wish couples knew.");
    assert_eq!(json["data"]["meta_title"], "Lake District Wedding Planning");
}

// ---------------------------------------------------------------------------
// Test: public list is newest-first and excludes drafts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_order_and_visibility(pool: PgPool) {
    create_post(&pool, post_payload("older", "planning", "2025-01-10")).await;
    create_post(&pool, post_payload("newer", "planning", "2025-03-02")).await;
    create_post(
        &pool,
        serde_json::json!({
            "slug": "draft",
            "title": "Draft",
            "category": "planning",
            "published_on": "2025-04-01",
            "published": false,
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog").await;
    let json = body_json(response).await;
    let posts = json["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2, "drafts stay out of the public journal");
    assert_eq!(posts[0]["slug"], "newer");
    assert_eq!(posts[1]["slug"], "older");
}

// ---------------------------------------------------------------------------
// Test: related strip is same-category only, newest-first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_related_posts_match_category(pool: PgPool) {
    create_post(&pool, post_payload("subject", "real-weddings", "2025-05-01")).await;
    create_post(&pool, post_payload("same-a", "real-weddings", "2025-04-01")).await;
    create_post(&pool, post_payload("same-b", "real-weddings", "2025-02-01")).await;
    create_post(&pool, post_payload("other", "planning", "2025-04-15")).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/blog/subject/related").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let related = json["data"].as_array().unwrap();
    assert_eq!(related.len(), 2, "no cross-category backfill");
    assert_eq!(related[0]["slug"], "same-a");
    assert_eq!(related[1]["slug"], "same-b");

    // The limit parameter trims the strip.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog/subject/related?limit=1").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_related_for_unpublished_post_404s(pool: PgPool) {
    create_post(
        &pool,
        serde_json::json!({
            "slug": "unseen",
            "title": "Unseen",
            "category": "planning",
            "published_on": "2025-05-01",
            "published": false,
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog/unseen/related").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: update applies partial changes and slug history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_post(pool: PgPool) {
    let created = create_post(&pool, post_payload("first-title", "planning", "2025-05-01")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/blog/{id}"),
        serde_json::json!({ "slug": "second-title", "category": "advice" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["data"]["slug"], "second-title");
    assert_eq!(updated["data"]["category"], "advice");
    assert_eq!(updated["data"]["title"], "Post first-title", "untouched fields persist");

    // The post now lives only under its new slug.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/blog/second-title").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog/first-title").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: duplicate slug conflicts, delete removes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_and_delete(pool: PgPool) {
    let created = create_post(&pool, post_payload("only-one", "planning", "2025-05-01")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/blog",
        post_payload("only-one", "planning", "2025-06-01"),
        &admin_token(),
    )
    .await;
    assert_error_code(response, StatusCode::CONFLICT, "SLUG_TAKEN").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/blog/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/blog/only-one").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: draft generation reports 503 when no generator is wired up
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_without_client_returns_503(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/admin/blog/generate",
        serde_json::json!({ "topic": "winter elopements" }),
        &admin_token(),
    )
    .await;

    assert_error_code(response, StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED").await;
}
