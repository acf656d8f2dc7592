mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

fn signup_body(username: &str, email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "username": username,
        "first_name": "Anna",
        "last_name": "Baker",
        "password": "sourdough-2024"
    })
}

#[tokio::test]
async fn sign_up_login_and_change_password() {
    let pool = setup_pool().await;
    let app = app(&pool);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(signup_body("anna", "anna@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "anna");
    assert_eq!(body["is_subscribed"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "anna@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid email or password");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "anna@example.com", "password": "sourdough-2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["auth_token"].as_str().unwrap().to_string();

    let (status, body) = send_json(&app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "anna@example.com");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/set_password",
        Some(&token),
        Some(json!({ "current_password": "nope", "new_password": "rye-bread-99" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/set_password",
        Some(&token),
        Some(json!({ "current_password": "sourdough-2024", "new_password": "rye-bread-99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "anna@example.com", "password": "rye-bread-99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sign_up_rejects_duplicates_and_reserved_username() {
    let pool = setup_pool().await;
    let app = app(&pool);
    create_user(&pool, "taken").await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(signup_body("taken", "fresh@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(signup_body("fresh", "taken@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(signup_body("me", "me@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"].get("username").is_some());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(signup_body("has space", "not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"].get("username").is_some());
    assert!(body["error"]["fields"].get("email").is_some());
}

#[tokio::test]
async fn me_requires_valid_token() {
    let pool = setup_pool().await;
    let app = app(&pool);

    let (status, body) = send_json(&app, Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "missing_token");

    let (status, body) =
        send_json(&app, Method::GET, "/api/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");

    // 공개 목록도 잘못된 토큰은 익명으로 취급하지 않음
    let (status, _) = send_json(&app, Method::GET, "/api/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn subscribe_lists_author_with_limited_recipes() {
    let pool = setup_pool().await;
    let app = app(&pool);
    let author = create_user(&pool, "author").await;
    let reader = create_user(&pool, "reader").await;
    let flour = create_ingredient(&pool, "flour", "g").await;
    for name in ["Bread", "Buns", "Bagels"] {
        create_recipe(&pool, &author, name, &[(&flour.id, 100)], &[]).await;
    }
    let token = token_for(&reader);
    let subscribe_uri = format!("/api/users/{}/subscribe", author.id);

    let (status, body) = send_json(&app, Method::POST, &subscribe_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "author");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 3);

    let (status, body) = send_json(&app, Method::POST, &subscribe_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Already subscribed to this author");

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/users/subscriptions?recipes_limit=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let subscriptions = body["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0]["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(subscriptions[0]["recipes_count"], 3);

    let (_, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/users/{}", author.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["is_subscribed"], true);

    let (_, body) = send_json(&app, Method::GET, &format!("/api/users/{}", author.id), None, None)
        .await;
    assert_eq!(body["is_subscribed"], false);

    let (status, _) = send_json(&app, Method::DELETE, &subscribe_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::DELETE, &subscribe_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Not subscribed to this author");
}

#[tokio::test]
async fn self_subscription_is_conflict() {
    let pool = setup_pool().await;
    let app = app(&pool);
    let user = create_user(&pool, "solo").await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/users/{}/subscribe", user.id),
        Some(&token_for(&user)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "You cannot subscribe to yourself");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/missing/subscribe",
        Some(&token_for(&user)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_recipes_limit_is_rejected_on_both_subscription_endpoints() {
    let pool = setup_pool().await;
    let app = app(&pool);
    let author = create_user(&pool, "author").await;
    let reader = create_user(&pool, "reader").await;
    let token = token_for(&reader);

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/users/{}/subscribe?recipes_limit=-1", author.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "recipes_limit must not be negative");

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/users/subscriptions?recipes_limit=-1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "recipes_limit must not be negative");

    // 거절된 구독 요청은 아무것도 남기지 않음
    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/users/subscriptions",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["subscriptions"].as_array().unwrap().is_empty());
}
