//! # 재료 API 라우트 핸들러
//!
//! - `GET /api/ingredients?name=мук` → `{ "ingredients": [...] }`
//! - `GET /api/ingredients/{id}` → `Ingredient`

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> Result<Json<Value>, AppError> {
    let ingredients = db::list_ingredients(&state.pool, query.name.as_deref()).await?;
    Ok(Json(json!({ "ingredients": ingredients })))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, AppError> {
    let ingredient = db::get_ingredient(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ingredient))
}
