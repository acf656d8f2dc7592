//! # 사용자(User) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST   /api/users`                  → 회원가입
//! - `GET    /api/users`                  → 사용자 목록
//! - `GET    /api/users/me`               → 내 정보 (인증 필요)
//! - `GET    /api/users/{id}`              → 사용자 조회
//! - `POST   /api/users/set_password`     → 비밀번호 변경 (인증 필요)
//! - `GET    /api/users/subscriptions`    → 내가 구독한 작성자 목록 (`?recipes_limit=`)
//! - `POST   /api/users/{id}/subscribe`    → 구독
//! - `DELETE /api/users/{id}/subscribe`    → 구독 취소

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    db::{self, users as db_users},
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{
        auth::{hash_password, verify_password},
        AppState,
    },
    services::{
        presenter::{render_subscription, UserAction, UserPresenter},
        toggle::ToggleGuard,
    },
};

/// `POST /users`: 회원가입. 비밀번호는 Argon2id로 해시해서 저장합니다.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let presenter = UserPresenter::select(UserAction::SignUp, None)?;
    req.validate()?;

    if db_users::find_by_username(&state.pool, &req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if db_users::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let user = db_users::create_user(
        &state.pool,
        &req.email,
        &req.username,
        &req.first_name,
        &req.last_name,
        &password_hash,
    )
    .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user signed up");

    let body = presenter.render(&state.pool, user).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn list_users(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let presenter = UserPresenter::select(UserAction::List, viewer.as_ref())?;
    let users = db_users::list_users(&state.pool).await?;
    let users = presenter.render_all(&state.pool, users).await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get_user(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let presenter = UserPresenter::select(UserAction::Retrieve, viewer.as_ref())?;
    let user = db_users::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(presenter.render(&state.pool, user).await?))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let presenter = UserPresenter::select(UserAction::Me, Some(&auth))?;
    let user = db_users::find_by_id(&state.pool, &auth.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(presenter.render(&state.pool, user).await?))
}

/// `POST /users/set_password`: 현재 비밀번호를 확인한 뒤 새 비밀번호로 바꿉니다.
pub async fn set_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()?;

    let user = db_users::find_by_id(&state.pool, &auth.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !verify_password(&req.current_password, &user.password_hash)? {
        return Err(AppError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = hash_password(&req.new_password)?;
    db_users::update_password(&state.pool, &user.id, &password_hash).await?;
    tracing::info!(user_id = %user.id, "password changed");

    Ok(Json(json!({ "message": "Password updated" })))
}

/// `GET /users/subscriptions`: 구독 중인 작성자와 각 작성자의 최근 레시피
///
/// `recipes_limit`이 있으면 작성자마다 최신 레시피를 그 개수까지만 싣습니다.
/// `recipes_count`는 제한과 무관하게 전체 개수입니다.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<Json<Value>, AppError> {
    let recipes_limit = recipes_limit(&query)?;
    let memberships =
        db::list_memberships(&state.pool, MembershipKind::Subscription, &auth.user_id).await?;

    let mut subscriptions = Vec::with_capacity(memberships.len());
    for membership in memberships {
        let author = db_users::find_by_id(&state.pool, &membership.target_id)
            .await?
            .ok_or(AppError::NotFound)?;
        subscriptions.push(render_subscription(&state.pool, author, recipes_limit).await?);
    }

    Ok(Json(json!({ "subscriptions": subscriptions })))
}

/// `POST /users/{id}/subscribe` → `201 Created` + 작성자 정보와 레시피
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let recipes_limit = recipes_limit(&query)?;
    ToggleGuard::SUBSCRIPTIONS
        .add(&state.pool, &auth.user_id, &id)
        .await?;

    let author = db_users::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let body = render_subscription(&state.pool, author, recipes_limit).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// SQLite는 음수 LIMIT을 "제한 없음"으로 처리하므로 여기서 거절합니다.
fn recipes_limit(query: &SubscriptionsQuery) -> Result<Option<i64>, AppError> {
    match query.recipes_limit {
        Some(limit) if limit < 0 => Err(AppError::BadRequest(
            "recipes_limit must not be negative".to_string(),
        )),
        limit => Ok(limit),
    }
}

/// `DELETE /users/{id}/subscribe` → `204 No Content`
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ToggleGuard::SUBSCRIPTIONS
        .remove(&state.pool, &auth.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
