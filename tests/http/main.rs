#![cfg(feature = "http")]

//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use chrono::Duration;
use recordkeeper::db::Database;
use recordkeeper::http::{self, AppState};
use recordkeeper::ManualClock;
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL plus the clock driving expiry.
async fn start_server() -> (String, ManualClock) {
    let clock = ManualClock::default();
    let state = AppState::new(Database::new(), Arc::new(clock.clone())).unwrap();
    let app = http::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), clock)
}

async fn create_user(client: &reqwest::Client, base: &str, username: &str) -> Value {
    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "username": username }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn health_lists_tables() {
    let (base, _) = start_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "tables": ["subscription", "users"] }));
}

#[tokio::test]
async fn create_and_get_user() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let user = create_user(&client, &base, "alice").await;
    assert_eq!(user, json!({ "id": 1, "username": "alice" }));

    let resp = client.get(format!("{base}/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, user);
}

#[tokio::test]
async fn list_users_with_and_without_filter() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();
    for name in ["alice", "bob", "alice"] {
        create_user(&client, &base, name).await;
    }

    let all: Value = client
        .get(format!("{base}/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let alices: Value = client
        .get(format!("{base}/users?username=alice"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        alices,
        json!([{ "id": 1, "username": "alice" }, { "id": 3, "username": "alice" }])
    );
}

#[tokio::test]
async fn user_errors_map_to_status_codes() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let missing = client.get(format!("{base}/users/42")).send().await.unwrap();
    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.unwrap();
    assert!(body["error"].is_string());

    let bad_id = client.get(format!("{base}/users/abc")).send().await.unwrap();
    assert_eq!(bad_id.status(), 400);

    let empty = client
        .post(format!("{base}/users"))
        .json(&json!({ "username": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), 400);

    let malformed = client
        .post(format!("{base}/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 400);
}

#[tokio::test]
async fn subscription_lifecycle() {
    let (base, clock) = start_server().await;
    let client = reqwest::Client::new();
    create_user(&client, &base, "alice").await;

    let resp = client
        .post(format!("{base}/subscriptions"))
        .json(&json!({ "user_id": 1, "plan_type": "basic" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let sub: Value = resp.json().await.unwrap();
    assert_eq!(sub["id"], 1);
    assert_eq!(sub["user_id"], 1);
    assert_eq!(sub["plan_type"], "basic");
    assert!(sub["created_at"].is_string());

    let by_id: Value = client
        .get(format!("{base}/subscriptions/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_id, sub);

    let by_user: Value = client
        .get(format!("{base}/subscriptions/users/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_user, json!([sub.clone()]));

    let active = client
        .get(format!("{base}/subscriptions/users/1/active"))
        .send()
        .await
        .unwrap();
    assert_eq!(active.status(), 200);
    let active: Value = active.json().await.unwrap();
    assert_eq!(active, sub);

    clock.advance(Duration::days(31));

    let expired = client
        .get(format!("{base}/subscriptions/users/1/active"))
        .send()
        .await
        .unwrap();
    assert_eq!(expired.status(), 404);
}

#[tokio::test]
async fn subscription_validation() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();
    create_user(&client, &base, "alice").await;

    let cases = [
        json!({ "user_id": 1 }),
        json!({ "user_id": 1, "plan_type": "gold" }),
        json!({ "user_id": 7, "plan_type": "free" }),
        json!({ "user_id": "one", "plan_type": "free" }),
    ];
    for case in cases {
        let resp = client
            .post(format!("{base}/subscriptions"))
            .json(&case)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "payload {case}");
    }

    let list: Value = client
        .get(format!("{base}/subscriptions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!([]));

    let missing = client
        .get(format!("{base}/subscriptions/9"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}
