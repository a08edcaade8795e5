use crate::helpers::{spawn_app, spawn_app_with_api_secret, TEST_API_KEY};
use diesel::RunQueryDsl;
use serde_json::json;

fn registration_body() -> serde_json::Value {
    json!({
        "user_id": "u1",
        "app_id": "a1",
        "subscription": {"endpoint": "https://push.example.com/abc", "keys": {"auth": "x"}},
        "onesignal_player_id": "player-1"
    })
}

#[tokio::test]
async fn register_returns_a_200_and_stores_the_subscription() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));

    // act
    let response = app.post_register(&registration_body()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));

    let saved = app.ring_users();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].user_id, "u1");
    assert_eq!(saved[0].app_id, "a1");
    assert_eq!(saved[0].onesignal_player_id.as_deref(), Some("player-1"));
    assert_eq!(
        saved[0].subscription,
        json!({"endpoint": "https://push.example.com/abc", "keys": {"auth": "x"}})
    );
}

#[tokio::test]
async fn registering_twice_keeps_a_single_row_with_the_latest_values() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    app.post_register(&registration_body())
        .await
        .error_for_status()
        .unwrap();
    let first_created_at = app.ring_users()[0].created_at;

    // act
    let response = app
        .post_register(&json!({
            "user_id": "u1",
            "app_id": "a1",
            "subscription": {"endpoint": "https://push.example.com/def"}
        }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let saved = app.ring_users();
    assert_eq!(saved.len(), 1);
    assert_eq!(
        saved[0].subscription,
        json!({"endpoint": "https://push.example.com/def"})
    );
    assert_eq!(saved[0].onesignal_player_id, None);
    assert!(saved[0].created_at >= first_created_at);
}

#[tokio::test]
async fn the_same_user_can_register_with_several_apps() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    app.insert_app("a2", Some("os-app-2"));

    // act
    app.post_register(&registration_body()).await;
    let mut other_app = registration_body();
    other_app["app_id"] = json!("a2");
    app.post_register(&other_app).await;

    // assert
    assert_eq!(app.ring_users().len(), 2);
}

#[tokio::test]
async fn register_returns_a_403_for_missing_or_wrong_credentials() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    let test_cases = vec![
        (None, "no api key"),
        (Some("wrong-key"), "a wrong api key"),
        (Some(""), "an empty api key"),
    ];

    for (api_key, description) in test_cases {
        // act
        let response = app
            .post_json("register", &registration_body(), api_key)
            .await;

        // assert
        assert_eq!(
            403,
            response.status().as_u16(),
            "The API did not fail with 403 Forbidden when the request had {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Unauthorized"}));
    }
    assert!(app.ring_users().is_empty());
}

#[tokio::test]
async fn register_returns_a_403_when_no_secret_is_configured() {
    // arrange
    let app = spawn_app_with_api_secret(None).await;
    app.insert_app("a1", Some("os-app-1"));

    // act
    let response = app
        .post_json("register", &registration_body(), Some(TEST_API_KEY))
        .await;

    // assert
    assert_eq!(403, response.status().as_u16());
    assert!(app.ring_users().is_empty());
}

#[tokio::test]
async fn register_returns_a_400_when_data_is_missing() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    let test_cases = vec![
        (json!({"app_id": "a1", "subscription": {}}), "missing the user_id"),
        (json!({"user_id": "u1", "subscription": {}}), "missing the app_id"),
        (json!({"user_id": "u1", "app_id": "a1"}), "missing the subscription"),
        (
            json!({"user_id": "", "app_id": "a1", "subscription": {}}),
            "an empty user_id",
        ),
        (
            json!({"user_id": "u1", "app_id": "a1", "subscription": null}),
            "a null subscription",
        ),
        (json!({}), "missing every field"),
    ];

    for (invalid_body, error_message) in test_cases {
        // act
        let response = app.post_register(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Missing fields"}));
    }
    assert!(app.ring_users().is_empty());
}

#[tokio::test]
async fn register_returns_a_400_for_an_unknown_app() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    let mut body = registration_body();
    body["app_id"] = json!("not-an-app");

    // act
    let response = app.post_register(&body).await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid app_id"}));
    assert!(app.ring_users().is_empty());
}

#[tokio::test]
async fn register_returns_a_400_for_a_malformed_body() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        // Identifiers must be JSON strings; any other truthy value is refused.
        (json!({"user_id": 42, "app_id": "a1", "subscription": {}}), "a numeric user_id"),
        (json!("u1"), "a bare string"),
    ];

    for (invalid_body, description) in test_cases {
        // act
        let response = app.post_register(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Invalid request body"}));
    }
}

#[tokio::test]
async fn register_returns_a_500_with_detail_when_the_upsert_fails() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));
    diesel::sql_query("ALTER TABLE ring_users DROP COLUMN subscription")
        .execute(&app.db_connection)
        .unwrap();

    // act
    let response = app.post_register(&registration_body()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("Failed to register user"));
    assert!(body["detail"].as_str().unwrap().contains("subscription"));
}

#[tokio::test]
async fn register_returns_a_400_for_a_body_that_is_not_json() {
    // arrange
    let app = spawn_app().await;
    app.insert_app("a1", Some("os-app-1"));

    // act
    let response = app.post_raw_json("register", r#"{"user_id":"#).await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid request body"}));
    assert!(app.ring_users().is_empty());
}
