//! Integration tests for the design generation and gallery endpoints.
//!
//! The test config points the inference client at a closed local port,
//! so any request that reaches submission fails fast with an upstream
//! error. These tests cover everything up to that boundary: validation,
//! the quota gate, auth, and the gallery listing.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use roomlift_db::models::design::CreateDesign;
use roomlift_db::repositories::{DesignRepo, UsageRepo};

use common::{body_json, expect_error, get_authed, post_json, post_json_unauthed};

const GENERATE_URI: &str = "/api/v1/designs/generate";

fn generate_body(user: &str) -> serde_json::Value {
    json!({
        "userId": user,
        "imageUrl": "https://example.com/room.jpg",
        "prompt": "Interior design of a kitchen in modern style. High quality, realistic, professional photo.",
    })
}

fn seeded_design(user: &str, n: u32) -> CreateDesign {
    CreateDesign {
        user_id: user.to_string(),
        original_image: format!("https://example.com/original-{n}.jpg"),
        generated_image: format!("https://example.com/generated-{n}.png"),
        prompt: format!("prompt {n}"),
        room_type: Some("kitchen".to_string()),
        style: Some("modern".to_string()),
        palette: None,
    }
}

// ---------------------------------------------------------------------------
// generate: validation and quota gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_fields_is_400(pool: PgPool) {
    let bodies = [
        json!({ "imageUrl": "https://example.com/a.jpg", "prompt": "p" }),
        json!({ "userId": "u1", "prompt": "p" }),
        json!({ "userId": "u1", "imageUrl": "https://example.com/a.jpg" }),
        json!({ "userId": "", "imageUrl": "https://example.com/a.jpg", "prompt": "p" }),
    ];

    for body in bodies {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, GENERATE_URI, body).await;

        let json = expect_error(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["error"], "Missing userId, imageUrl, or prompt");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn exhausted_identity_is_402_before_upstream(pool: PgPool) {
    let user = "u-broke".to_string();
    for _ in 0..3 {
        UsageRepo::increment(&pool, &user).await.unwrap();
    }

    // The inference URL is unreachable, so a 402 here proves the quota
    // gate fires before any upstream submission is attempted.
    let app = common::build_test_app(pool);
    let response = post_json(app, GENERATE_URI, generate_body(&user)).await;

    let json = expect_error(response, StatusCode::PAYMENT_REQUIRED).await;
    assert_eq!(json["code"], "FREE_TIER_EXHAUSTED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_inference_service_is_500(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, GENERATE_URI, generate_body("u-conn")).await;

    let json = expect_error(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(json["error"], "Inference service unreachable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generate_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_unauthed(app, GENERATE_URI, generate_body("u1")).await;

    expect_error(response, StatusCode::UNAUTHORIZED).await;
}

// ---------------------------------------------------------------------------
// gallery listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_designs_empty_for_fresh_identity(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_authed(app, "/api/v1/designs?userId=u-empty").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["designs"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_designs_returns_only_own_rows_newest_first(pool: PgPool) {
    for n in 0..3 {
        DesignRepo::insert(&pool, &seeded_design("u-mine", n))
            .await
            .unwrap();
    }
    DesignRepo::insert(&pool, &seeded_design("u-other", 99))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get_authed(app, "/api/v1/designs?userId=u-mine").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let designs = json["designs"].as_array().unwrap();
    assert_eq!(designs.len(), 3);
    for design in designs {
        assert_eq!(design["user_id"], "u-mine");
    }
    // Newest first: ids descend.
    assert!(designs[0]["id"].as_i64() > designs[1]["id"].as_i64());
    assert!(designs[1]["id"].as_i64() > designs[2]["id"].as_i64());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_designs_honors_limit(pool: PgPool) {
    for n in 0..5 {
        DesignRepo::insert(&pool, &seeded_design("u-paged", n))
            .await
            .unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get_authed(app, "/api/v1/designs?userId=u-paged&limit=2").await;

    let json = body_json(response).await;
    assert_eq!(json["designs"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_designs_without_user_id_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_authed(app, "/api/v1/designs").await;

    expect_error(response, StatusCode::BAD_REQUEST).await;
}
