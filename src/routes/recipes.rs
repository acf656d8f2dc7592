//! # 레시피(Recipe) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/recipes`                         → 목록 (필터: tags, is_favorited, is_in_shopping_cart, author, search)
//! - `POST   /api/recipes`                         → 생성 (인증 필요)
//! - `GET    /api/recipes/{id}`                     → 단일 조회
//! - `PATCH  /api/recipes/{id}`                     → 수정 (작성자만)
//! - `DELETE /api/recipes/{id}`                     → 삭제 (작성자만)
//! - `POST   /api/recipes/{id}/favorite`            → 즐겨찾기 추가
//! - `DELETE /api/recipes/{id}/favorite`            → 즐겨찾기 삭제
//! - `POST   /api/recipes/{id}/shopping_cart`       → 장바구니 추가
//! - `DELETE /api/recipes/{id}/shopping_cart`       → 장바구니 삭제
//! - `GET    /api/recipes/download_shopping_cart`  → 쇼핑 목록 파일 (`?format=json`이면 JSON)
//!
//! 인증이 선택인 핸들러는 `Option<AuthUser>`를, 필수인 핸들러는 `AuthUser`를 받습니다.
//! 요청한 사용자가 누구인지는 항상 이 인자로만 전달됩니다.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    db::{self, RecipeFilter},
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::AppState,
    services::{
        cart,
        presenter::{RecipeAction, RecipePresenter},
        toggle::ToggleGuard,
    },
};

/// `GET /recipes`: 필터에 맞는 레시피를 최신순으로 조회합니다.
///
/// `is_favorited`, `is_in_shopping_cart`는 "내" 목록을 뜻하므로
/// 익명 요청에서는 무시됩니다.
pub async fn list_recipes(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Value>, AppError> {
    let presenter = RecipePresenter::select(RecipeAction::List, viewer.as_ref())?;
    let viewer_id = presenter.viewer_id();

    let filter = RecipeFilter {
        tag_slug: query.tags.as_deref(),
        author_id: query.author.as_deref(),
        search: query.search.as_deref(),
        favorited_by: viewer_id.filter(|_| query.favorited_only()),
        in_cart_of: viewer_id.filter(|_| query.in_cart_only()),
    };

    let recipes = db::list_recipes(&state.pool, filter).await?;
    let recipes = presenter.render_all(&state.pool, recipes).await?;
    Ok(Json(json!({ "recipes": recipes })))
}

/// `GET /recipes/{id}`: 단일 레시피를 조회합니다.
pub async fn get_recipe(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, AppError> {
    let presenter = RecipePresenter::select(RecipeAction::Retrieve, viewer.as_ref())?;
    let recipe = db::get_recipe(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(presenter.render(&state.pool, recipe).await?))
}

/// `POST /recipes`: 새 레시피를 생성합니다. 작성자는 요청한 사용자입니다.
///
/// 검증 실패(예: 두 번째 재료의 amount가 0)면 400과 함께
/// `fields["ingredients[1].amount"]`에 메시지가 담기고, 아무것도 저장되지 않습니다.
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    let presenter = RecipePresenter::select(RecipeAction::Create, Some(&auth))?;
    req.validate()?;

    let recipe = db::create_recipe(&state.pool, &auth.user_id, &req).await?;
    tracing::info!(recipe_id = %recipe.id, author_id = %auth.user_id, "recipe created");

    let body = presenter.render(&state.pool, recipe).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// `PATCH /recipes/{id}`: 레시피를 수정합니다 (작성자만).
///
/// 재료/태그 목록은 보낸 내용으로 통째로 바뀝니다.
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    let presenter = RecipePresenter::select(RecipeAction::Update, Some(&auth))?;

    let existing = db::get_recipe(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_author(&existing, &auth)?;
    req.validate()?;

    let recipe = db::update_recipe(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(recipe_id = %recipe.id, "recipe updated");

    Ok(Json(presenter.render(&state.pool, recipe).await?))
}

/// `DELETE /recipes/{id}`: 레시피를 삭제합니다 (작성자만).
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let existing = db::get_recipe(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_author(&existing, &auth)?;

    if !db::delete_recipe(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(recipe_id = %id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn ensure_author(recipe: &Recipe, auth: &AuthUser) -> Result<(), AppError> {
    if recipe.author_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the author can modify this recipe".to_string(),
        ));
    }
    Ok(())
}

/// `POST /recipes/{id}/favorite` → `201 Created` + 짧은 레시피
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    add_recipe_membership(&state, ToggleGuard::FAVORITES, &auth, &id).await
}

/// `DELETE /recipes/{id}/favorite` → `204 No Content`
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ToggleGuard::FAVORITES
        .remove(&state.pool, &auth.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /recipes/{id}/shopping_cart` → `201 Created` + 짧은 레시피
pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    add_recipe_membership(&state, ToggleGuard::SHOPPING_CART, &auth, &id).await
}

/// `DELETE /recipes/{id}/shopping_cart` → `204 No Content`
pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ToggleGuard::SHOPPING_CART
        .remove(&state.pool, &auth.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_recipe_membership(
    state: &AppState,
    guard: ToggleGuard,
    auth: &AuthUser,
    recipe_id: &str,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    guard.add(&state.pool, &auth.user_id, recipe_id).await?;

    let recipe = db::get_recipe(&state.pool, recipe_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    /// `json`이면 JSON 객체, 그 외에는 텍스트 파일
    pub format: Option<String>,
}

/// `GET /recipes/download_shopping_cart`: 장바구니 재료 합산 결과를 내려받습니다.
///
/// 기본 응답은 `text/plain` 첨부 파일(`shopping_cart.txt`)입니다:
/// ```text
/// Ingredient amount
/// egg 2
/// flour 300
/// ```
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let list = cart::aggregate_cart(&state.pool, &auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, ingredients = list.len(), "shopping cart downloaded");

    if query.format.as_deref() == Some("json") {
        return Ok(Json(list).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_cart.txt\"",
            ),
        ],
        cart::render_text(&list),
    )
        .into_response())
}
