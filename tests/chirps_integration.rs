mod common;

use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn create_chirp_redacts_profanity() {
    let app = spawn_app();
    let user = app.signed_in_user("lane@example.com", "pw").await;

    let response = app
        .post_chirp(&user.token, "I had something interesting for breakfast kerfuffle  FORNAX!  Sharbert")
        .await;

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["body"],
        "I had something interesting for breakfast **** FORNAX! ****"
    );
    assert_eq!(body["user_id"], user.id.as_str());
}

#[tokio::test]
async fn create_chirp_rejects_long_bodies() {
    let app = spawn_app();
    let user = app.signed_in_user("long@example.com", "pw").await;

    let at_limit = app.post_chirp(&user.token, &"a".repeat(140)).await;
    let over_limit = app.post_chirp(&user.token, &"a".repeat(141)).await;

    assert_eq!(201, at_limit.status().as_u16());
    assert_eq!(400, over_limit.status().as_u16());
}

#[tokio::test]
async fn create_chirp_requires_valid_session_token() {
    let app = spawn_app();

    let without_token = app
        .client
        .post(app.url("/api/chirps"))
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .unwrap();
    let with_garbage = app.post_chirp("not-a-jwt", "hello").await;

    assert_eq!(401, without_token.status().as_u16());
    assert_eq!(401, with_garbage.status().as_u16());
}

#[tokio::test]
async fn get_chirp_by_id() {
    let app = spawn_app();
    let user = app.signed_in_user("get@example.com", "pw").await;
    let created: Value = app.post_chirp(&user.token, "findable").await.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let found = app
        .client
        .get(app.url(&format!("/api/chirps/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(200, found.status().as_u16());
    let body: Value = found.json().await.unwrap();
    assert_eq!(body["body"], "findable");

    let missing = app
        .client
        .get(app.url(&format!("/api/chirps/{}", uuid::Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(404, missing.status().as_u16());

    let not_a_uuid = app.client.get(app.url("/api/chirps/abc")).send().await.unwrap();
    assert_eq!(400, not_a_uuid.status().as_u16());
}

#[tokio::test]
async fn list_chirps_filters_and_sorts() {
    let app = spawn_app();
    let alice = app.signed_in_user("alice@example.com", "pw").await;
    let bob = app.signed_in_user("bob@example.com", "pw").await;

    for body in ["one", "two", "three"] {
        app.post_chirp(&alice.token, body).await;
    }
    app.post_chirp(&bob.token, "bob's").await;

    let bodies = |chirps: Value| -> Vec<String> {
        chirps
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["body"].as_str().unwrap().to_string())
            .collect()
    };

    let all: Value = app
        .client
        .get(app.url("/api/chirps"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bodies(all), vec!["one", "two", "three", "bob's"]);

    let alices_desc: Value = app
        .client
        .get(app.url(&format!("/api/chirps?author_id={}&sort=desc", alice.id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bodies(alices_desc), vec!["three", "two", "one"]);

    let bad_sort = app
        .client
        .get(app.url("/api/chirps?sort=sideways"))
        .send()
        .await
        .unwrap();
    assert_eq!(400, bad_sort.status().as_u16());
}

#[tokio::test]
async fn only_the_author_can_delete_a_chirp() {
    let app = spawn_app();
    let author = app.signed_in_user("author@example.com", "pw").await;
    let other = app.signed_in_user("other@example.com", "pw").await;
    let created: Value = app.post_chirp(&author.token, "mine").await.json().await.unwrap();
    let url = app.url(&format!("/api/chirps/{}", created["id"].as_str().unwrap()));

    let forbidden = app.client.delete(&url).bearer_auth(&other.token).send().await.unwrap();
    assert_eq!(403, forbidden.status().as_u16());

    let deleted = app.client.delete(&url).bearer_auth(&author.token).send().await.unwrap();
    assert_eq!(204, deleted.status().as_u16());

    let gone = app.client.get(&url).send().await.unwrap();
    assert_eq!(404, gone.status().as_u16());

    let again = app.client.delete(&url).bearer_auth(&author.token).send().await.unwrap();
    assert_eq!(404, again.status().as_u16());
}

#[tokio::test]
async fn validate_chirp_returns_cleaned_body() {
    let app = spawn_app();

    let response = app
        .client
        .post(app.url("/api/validate_chirp"))
        .json(&json!({ "body": "This is a kerfuffle opinion I need to share with the world" }))
        .send()
        .await
        .unwrap();

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["cleaned_body"],
        "This is a **** opinion I need to share with the world"
    );

    let too_long = app
        .client
        .post(app.url("/api/validate_chirp"))
        .json(&json!({ "body": "x".repeat(141) }))
        .send()
        .await
        .unwrap();
    assert_eq!(400, too_long.status().as_u16());
}
