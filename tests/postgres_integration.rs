//! The HTTP flows run against `PostgresStore` on a throwaway database.
//! Needs the Postgres server from `configuration.yaml`.

mod common;

use chrono::{DateTime, Utc};
use common::{spawn_app_with_postgres, POLKA_KEY};
use serde_json::{json, Value};
use sqlx::{PgPool, Row};

/// `(revoked_at, updated_at)` of the user's only refresh token
async fn revocation_state(pool: &PgPool, user_id: &str) -> (Option<DateTime<Utc>>, DateTime<Utc>) {
    let row = sqlx::query(
        "SELECT revoked_at, updated_at FROM refresh_tokens WHERE user_id = $1::uuid",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    (row.get("revoked_at"), row.get("updated_at"))
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let (app, _pool) = spawn_app_with_postgres().await;

    assert_eq!(201, app.create_user("dup@example.com", "pw").await.status().as_u16());
    assert_eq!(409, app.create_user("dup@example.com", "other").await.status().as_u16());

    let other = app.signed_in_user("other@example.com", "pw").await;
    let taken = app
        .client
        .put(app.url("/api/users"))
        .bearer_auth(&other.token)
        .json(&json!({ "email": "dup@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(409, taken.status().as_u16());
}

#[tokio::test]
async fn refresh_token_lifecycle() {
    let (app, pool) = spawn_app_with_postgres().await;
    let user = app.signed_in_user("life@example.com", "pw").await;

    // only the digest is stored
    let plaintext_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE token_hash = $1")
            .bind(&user.refresh_token)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(plaintext_rows, 0);

    let refresh = |token: String| {
        let request = app
            .client
            .post(app.url("/api/refresh"))
            .bearer_auth(token)
            .send();
        async move { request.await.unwrap().status().as_u16() }
    };
    let revoke = |token: String| {
        let request = app
            .client
            .post(app.url("/api/revoke"))
            .bearer_auth(token)
            .send();
        async move { request.await.unwrap().status().as_u16() }
    };

    assert_eq!(200, refresh(user.refresh_token.clone()).await);
    assert_eq!(204, revoke(user.refresh_token.clone()).await);
    assert_eq!(401, refresh(user.refresh_token.clone()).await);
    assert_eq!(401, revoke("never-issued".to_string()).await);

    let (first_revoked_at, first_updated_at) = revocation_state(&pool, &user.id).await;
    assert!(first_revoked_at.is_some());

    // revoking again changes nothing
    assert_eq!(204, revoke(user.refresh_token.clone()).await);
    assert_eq!(revocation_state(&pool, &user.id).await, (first_revoked_at, first_updated_at));
}

#[tokio::test]
async fn chirps_filter_by_author_and_sort() {
    let (app, _pool) = spawn_app_with_postgres().await;
    let alice = app.signed_in_user("alice@example.com", "pw").await;
    let bob = app.signed_in_user("bob@example.com", "pw").await;

    for body in ["one", "two", "three"] {
        assert_eq!(201, app.post_chirp(&alice.token, body).await.status().as_u16());
    }
    app.post_chirp(&bob.token, "bob's").await;

    let bodies = |query: String| {
        let request = app.client.get(app.url(&format!("/api/chirps{}", query))).send();
        async move {
            let chirps: Value = request.await.unwrap().json().await.unwrap();
            chirps
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c["body"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(bodies(String::new()).await, vec!["one", "two", "three", "bob's"]);
    assert_eq!(
        bodies(format!("?author_id={}", alice.id)).await,
        vec!["one", "two", "three"]
    );
    assert_eq!(
        bodies(format!("?author_id={}&sort=desc", alice.id)).await,
        vec!["three", "two", "one"]
    );
}

#[tokio::test]
async fn missing_rows_are_404() {
    let (app, _pool) = spawn_app_with_postgres().await;
    let user = app.signed_in_user("gone@example.com", "pw").await;
    let created: Value = app.post_chirp(&user.token, "short-lived").await.json().await.unwrap();
    let url = app.url(&format!("/api/chirps/{}", created["id"].as_str().unwrap()));

    let first = app.client.delete(&url).bearer_auth(&user.token).send().await.unwrap();
    let second = app.client.delete(&url).bearer_auth(&user.token).send().await.unwrap();
    assert_eq!(204, first.status().as_u16());
    assert_eq!(404, second.status().as_u16());

    let upgrade_unknown = app
        .client
        .post(app.url("/api/polka/webhooks"))
        .header("Authorization", format!("ApiKey {}", POLKA_KEY))
        .json(&json!({
            "event": "user.upgraded",
            "data": { "user_id": uuid::Uuid::new_v4() }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(404, upgrade_unknown.status().as_u16());
}

#[tokio::test]
async fn reset_cascades_to_chirps_and_refresh_tokens() {
    let (app, pool) = spawn_app_with_postgres().await;
    let user = app.signed_in_user("cascade@example.com", "pw").await;
    app.post_chirp(&user.token, "soon gone").await;

    let reset = app.client.post(app.url("/admin/reset")).send().await.unwrap();
    assert_eq!(200, reset.status().as_u16());

    for table in ["users", "chirps", "refresh_tokens"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{} should be empty", table);
    }
}
