//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/tags | `list_tags` | 전체 태그 목록 |
//! | GET | /api/tags/{id} | `get_tag` | 태그 하나 |
//!
//! 태그는 HTTP로 생성/수정할 수 없습니다. 레시피 쓰기 요청은 여기서 받은 ID를 참조합니다.

use crate::{db, error::AppError, models::*, routes::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

/// 전체 태그 목록을 조회합니다.
///
/// `GET /api/tags` → `{ "tags": [...] }`
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tags = db::list_tags(&state.pool).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// 태그 하나를 조회합니다.
///
/// `GET /api/tags/{id}` → `Tag`, 없으면 404
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tag>, AppError> {
    let tag = db::get_tag(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(tag))
}
