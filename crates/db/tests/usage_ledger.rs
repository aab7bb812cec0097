//! Integration tests for the usage ledger and design repositories.

use sqlx::PgPool;

use roomlift_db::models::design::CreateDesign;
use roomlift_db::repositories::{DesignRepo, UsageRepo};

fn identity(tag: &str) -> String {
    format!("test-identity-{tag}")
}

// ---------------------------------------------------------------------------
// Usage ledger
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn get_or_create_starts_at_zero(pool: PgPool) {
    let user = identity("fresh");
    let record = UsageRepo::get_or_create(&pool, &user).await.unwrap();

    assert_eq!(record.user_id, user);
    assert_eq!(record.designs_generated, 0);
    assert!(!record.is_premium);
    assert!(record.premium_expires_at.is_none());
}

#[sqlx::test]
async fn get_or_create_is_idempotent(pool: PgPool) {
    let user = identity("repeat");
    let first = UsageRepo::get_or_create(&pool, &user).await.unwrap();
    let second = UsageRepo::get_or_create(&pool, &user).await.unwrap();

    assert_eq!(first.user_id, second.user_id);
    assert_eq!(second.designs_generated, 0);
}

#[sqlx::test]
async fn increment_is_monotonic(pool: PgPool) {
    let user = identity("counter");
    for expected in 1..=4 {
        let count = UsageRepo::increment(&pool, &user).await.unwrap();
        assert_eq!(count, expected);
    }

    let record = UsageRepo::get_or_create(&pool, &user).await.unwrap();
    assert_eq!(record.designs_generated, 4);
}

#[sqlx::test]
async fn increment_creates_missing_row(pool: PgPool) {
    // No prior get_or_create: the upsert path must create the row itself.
    let user = identity("lazy");
    let count = UsageRepo::increment(&pool, &user).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn set_premium_round_trips(pool: PgPool) {
    let user = identity("premium");
    let expires = chrono::Utc::now() + chrono::Duration::days(30);

    UsageRepo::set_premium(&pool, &user, true, Some(expires))
        .await
        .unwrap();

    let record = UsageRepo::get_or_create(&pool, &user).await.unwrap();
    assert!(record.is_premium);
    assert_eq!(
        record.premium_expires_at.map(|t| t.timestamp()),
        Some(expires.timestamp())
    );
}

// ---------------------------------------------------------------------------
// Designs
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn insert_and_list_designs_newest_first(pool: PgPool) {
    let user = identity("gallery");

    for n in 0..3 {
        DesignRepo::insert(
            &pool,
            &CreateDesign {
                user_id: user.clone(),
                original_image: format!("https://store/designs/{user}/photo-{n}.jpg"),
                generated_image: format!("https://cdn/out-{n}.jpg"),
                prompt: "Interior design of a kitchen in modern style".to_string(),
                room_type: Some("kitchen".to_string()),
                style: Some("modern".to_string()),
                palette: Some("millennial-gray".to_string()),
            },
        )
        .await
        .unwrap();
    }

    let designs = DesignRepo::list_for_user(&pool, &user, None).await.unwrap();
    assert_eq!(designs.len(), 3);
    // Newest first: the last insert has the highest id.
    assert!(designs[0].id > designs[1].id);
    assert!(designs[1].id > designs[2].id);
}

#[sqlx::test]
async fn list_respects_limit_and_ownership(pool: PgPool) {
    let owner = identity("owner");
    let other = identity("other");

    for user in [&owner, &owner, &other] {
        DesignRepo::insert(
            &pool,
            &CreateDesign {
                user_id: user.clone(),
                original_image: "https://store/in.jpg".to_string(),
                generated_image: "https://cdn/out.jpg".to_string(),
                prompt: "p".to_string(),
                room_type: None,
                style: None,
                palette: None,
            },
        )
        .await
        .unwrap();
    }

    let designs = DesignRepo::list_for_user(&pool, &owner, Some(1)).await.unwrap();
    assert_eq!(designs.len(), 1);
    assert_eq!(designs[0].user_id, owner);
}
