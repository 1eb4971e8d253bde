//! HTTP-level integration tests for the film catalogue: public reads,
//! admin CRUD, slug history, and the recommendation strip.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, assert_error_code, body_json, delete_auth, get, get_auth, post_auth,
    post_json, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Minimal create payload for a published film.
fn film_payload(slug: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "slug": slug,
        "title": title,
        "published": true,
    })
}

/// Create a film through the admin API and return its JSON.
async fn create_film(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/films", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Test: public list only shows published films
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_excludes_unpublished(pool: PgPool) {
    create_film(&pool, film_payload("autumn-barn", "Autumn at the Barn")).await;
    create_film(
        &pool,
        serde_json::json!({
            "slug": "work-in-progress",
            "title": "Work in Progress",
            "published": false,
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let films = json["data"].as_array().expect("data should be an array");
    assert_eq!(films.len(), 1, "draft film must not appear publicly");
    assert_eq!(films[0]["slug"], "autumn-barn");
}

// ---------------------------------------------------------------------------
// Test: film detail carries vendors and gallery in submitted order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_film_by_slug_with_relations(pool: PgPool) {
    create_film(
        &pool,
        serde_json::json!({
            "slug": "lakeside",
            "title": "Lakeside",
            "published": true,
            "vendors": [
                { "role": "Florist", "name": "Wild Stems" },
                { "role": "Band", "name": "The Murmurs", "link": "https://example.com" },
            ],
            "gallery": [
                { "url": "https://cdn.example.com/a.jpg", "alt_text": "First dance" },
                { "url": "https://cdn.example.com/b.jpg" },
            ],
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/lakeside").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Lakeside");

    let vendors = json["data"]["vendors"].as_array().unwrap();
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0]["name"], "Wild Stems", "submitted order is kept");
    assert_eq!(vendors[1]["link"], "https://example.com");

    let gallery = json["data"]["gallery"].as_array().unwrap();
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0]["alt_text"], "First dance");
}

// ---------------------------------------------------------------------------
// Test: unpublished and unknown slugs both 404 publicly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_film_by_slug_not_found(pool: PgPool) {
    create_film(
        &pool,
        serde_json::json!({ "slug": "hidden", "title": "Hidden", "published": false }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/films/hidden").await;
    assert_error_code(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/never-existed").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: create requires auth; succeeds with a valid token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_film_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/admin/films",
        film_payload("no-auth", "No Auth"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_film_returns_hydrated_201(pool: PgPool) {
    let created = create_film(
        &pool,
        serde_json::json!({
            "slug": "first-look",
            "title": "First Look",
            "vendors": [{ "role": "Venue", "name": "The Glasshouse" }],
        }),
    )
    .await;

    assert!(created["data"]["id"].is_string(), "id is a uuid string");
    assert_eq!(created["data"]["slug"], "first-look");
    assert_eq!(created["data"]["published"], false, "drafts by default");
    assert_eq!(created["data"]["vendors"].as_array().unwrap().len(), 1);
    assert_eq!(created["data"]["gallery"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: duplicate slug returns 409 SLUG_TAKEN and persists nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_film_duplicate_slug(pool: PgPool) {
    create_film(&pool, film_payload("taken", "Original")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/films",
        film_payload("taken", "Duplicate"),
        &admin_token(),
    )
    .await;
    assert_error_code(response, StatusCode::CONFLICT, "SLUG_TAKEN").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/films", &admin_token()).await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"].as_array().unwrap().len(),
        1,
        "failed create must not leave a row behind"
    );
}

// ---------------------------------------------------------------------------
// Test: malformed slug is rejected with 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_film_invalid_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/admin/films",
        film_payload("Not A Slug!", "Bad"),
        &admin_token(),
    )
    .await;

    assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Test: renaming a slug keeps the old one resolving
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_slug_retains_history(pool: PgPool) {
    let created = create_film(&pool, film_payload("spring-wedding", "Spring")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/films/{id}"),
        serde_json::json!({ "slug": "spring-at-the-mill" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["data"]["slug"], "spring-at-the-mill");
    let old_slugs = updated["data"]["old_slugs"].as_array().unwrap();
    assert!(
        old_slugs.iter().any(|s| s == "spring-wedding"),
        "outgoing slug must be retired into old_slugs"
    );

    // The old slug resolves to the new one for frontend redirects.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/films/resolve-slug/spring-wedding").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "spring-at-the-mill");

    // The old slug itself no longer serves the detail page.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/films/spring-wedding").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And the new slug does.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/spring-at-the-mill").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: resolve-slug misses return 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_slug_unknown_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/resolve-slug/never-used").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: supplied collections replace, absent collections persist
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_collections_wholesale(pool: PgPool) {
    let created = create_film(
        &pool,
        serde_json::json!({
            "slug": "collections",
            "title": "Collections",
            "published": true,
            "vendors": [
                { "role": "Florist", "name": "A" },
                { "role": "Band", "name": "B" },
            ],
            "gallery": [{ "url": "https://cdn.example.com/1.jpg" }],
        }),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Replace vendors, leave gallery untouched.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/films/{id}"),
        serde_json::json!({ "vendors": [{ "role": "Caterer", "name": "C" }] }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    let vendors = updated["data"]["vendors"].as_array().unwrap();
    assert_eq!(vendors.len(), 1, "submitted list replaces stored list");
    assert_eq!(vendors[0]["name"], "C");
    assert_eq!(
        updated["data"]["gallery"].as_array().unwrap().len(),
        1,
        "absent collection is untouched"
    );

    // An explicitly empty list clears.
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/films/{id}"),
        serde_json::json!({ "gallery": [] }),
        &admin_token(),
    )
    .await;
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["gallery"].as_array().unwrap().len(), 0);
    assert_eq!(
        updated["data"]["vendors"].as_array().unwrap().len(),
        1,
        "vendors survive a gallery-only update"
    );
}

// ---------------------------------------------------------------------------
// Test: update and delete of a missing film return 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_film_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/admin/films/00000000-0000-7000-8000-000000000000",
        serde_json::json!({ "title": "Ghost" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_film(pool: PgPool) {
    let created = create_film(&pool, film_payload("short-lived", "Short Lived")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/films/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/admin/films/{id}"),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports the miss.
    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/admin/films/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: recommendation strip samples other published films
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recommended_excludes_subject_and_respects_limit(pool: PgPool) {
    for i in 1..=5 {
        create_film(&pool, film_payload(&format!("film-{i}"), &format!("Film {i}"))).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/films/film-1/recommended?limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let picked = json["data"].as_array().unwrap();
    assert_eq!(picked.len(), 2);
    assert!(
        picked.iter().all(|f| f["slug"] != "film-1"),
        "the film being viewed is never recommended alongside itself"
    );

    // Default limit is 3.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/film-1/recommended").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recommended_for_unpublished_film_404s(pool: PgPool) {
    create_film(
        &pool,
        serde_json::json!({ "slug": "draft", "title": "Draft", "published": false }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/films/draft/recommended").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: publish and feature toggles flip and persist
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_and_feature_toggles(pool: PgPool) {
    let created = create_film(
        &pool,
        serde_json::json!({ "slug": "toggle-me", "title": "Toggle Me" }),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["published"], false);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/films/{id}/publish"),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["published"], true);

    // Now visible publicly.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/films/toggle-me").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/films/{id}/feature"),
        &admin_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["featured"], true);

    // A second publish toggle flips back to draft.
    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/admin/films/{id}/publish"),
        &admin_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["published"], false);
}
