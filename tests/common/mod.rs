//! 통합 테스트 공용 헬퍼: 인메모리 DB, 시드 데이터, 라우터 호출
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use foodgram::{
    build_router,
    db::{self, users as db_users, MIGRATOR},
    middleware::auth::create_access_token,
    models::*,
    routes::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";

/// 연결이 하나뿐인 인메모리 DB. 연결이 닫히면 DB도 사라지므로 풀 하나를 끝까지 씁니다.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub fn app(pool: &SqlitePool) -> Router {
    build_router(AppState {
        pool: pool.clone(),
        jwt_secret: JWT_SECRET.to_string(),
        token_ttl_hours: 1,
    })
}

/// argon2 해시 없이 사용자를 만듭니다. 로그인 테스트는 `routes::auth::hash_password`를 씁니다.
pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    db_users::create_user(
        pool,
        &format!("{username}@example.com"),
        username,
        "Test",
        "User",
        "not-a-real-hash",
    )
    .await
    .unwrap()
}

pub fn token_for(user: &User) -> String {
    create_access_token(&user.id, JWT_SECRET, 1).unwrap()
}

pub async fn create_ingredient(pool: &SqlitePool, name: &str, unit: &str) -> Ingredient {
    db::create_ingredient(
        pool,
        &CreateIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_tag(pool: &SqlitePool, name: &str, slug: &str) -> Tag {
    db::create_tag(
        pool,
        &CreateTag {
            name: name.to_string(),
            color: None,
            slug: Some(slug.to_string()),
        },
    )
    .await
    .unwrap()
}

/// 재료 `(ingredient_id, amount)` 목록으로 레시피를 만듭니다.
pub async fn create_recipe(
    pool: &SqlitePool,
    author: &User,
    name: &str,
    lines: &[(&str, i64)],
    tags: &[&str],
) -> Recipe {
    let req = CreateRecipeRequest {
        ingredients: lines
            .iter()
            .map(|(id, amount)| IngredientAmount {
                id: id.to_string(),
                amount: *amount,
            })
            .collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: None,
        name: name.to_string(),
        text: Some("Mix and bake.".to_string()),
        cooking_time: 30,
    };
    db::create_recipe(pool, &author.id, &req).await.unwrap()
}

/// 라우터에 요청 하나를 보내고 (상태 코드, 본문 바이트)를 돌려줍니다.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// `send` 후 본문을 JSON으로 해석합니다. 본문이 비어 있으면 `Value::Null`.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, token, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
