//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 조회/생성 및 레시피-태그 관계를 조회하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name, color, slug)
//! - `recipe_tags`: 레시피와 태그의 다대다(N:M) 관계 테이블
//!
//! 관계 행의 생성/삭제는 레시피 쓰기와 같은 트랜잭션에서 이루어지므로
//! `db::recipes::replace_associations`에 있습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

/// 모든 태그를 이름순으로 조회합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다.
///
/// 레시피 쓰기 트랜잭션 안에서 태그 존재 여부를 확인할 때도 쓰이므로
/// 풀(`&SqlitePool`)과 트랜잭션 연결(`&mut SqliteConnection`)을 모두 받습니다.
pub async fn get_tag<'e, E>(executor: E, id: &str) -> Result<Option<Tag>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(tag)
}

/// 새 태그를 생성하고 생성된 태그를 반환합니다.
///
/// ## 처리 흐름
/// 1. 입력 검증 (`SLUG_PATTERN` 포함)
/// 2. slug가 없으면 이름으로부터 생성 (`slug::slugify`, 키릴 문자는 라틴 문자로 음역됨)
/// 3. UUIDv7 ID로 INSERT 후 다시 조회하여 반환
///
/// 이름/색상/slug 중복은 UNIQUE 제약에 걸려 `Conflict`가 됩니다.
/// 이름이 문장부호뿐이라 만들어진 slug가 비면 `BadRequest`입니다.
pub async fn create_tag(pool: &SqlitePool, req: &CreateTag) -> Result<Tag, AppError> {
    req.validate()?;

    let slug = req
        .slug
        .clone()
        .unwrap_or_else(|| slug::slugify(&req.name));
    if !SLUG_PATTERN.is_match(&slug) {
        return Err(AppError::BadRequest(format!(
            "Cannot derive a slug from tag name {:?}",
            req.name
        )));
    }

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO tags (id, name, color, slug) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(req.color) // Option<TagColor>: None이면 SQL NULL
        .bind(&slug)
        .execute(pool)
        .await
        .map_err(|e| AppError::unique_violation_as_conflict(e, "Tag already exists"))?;

    get_tag(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tag".to_string()))
}

/// 특정 레시피에 연결된 모든 태그를 조회합니다.
///
/// ```sql
/// tags ←── recipe_tags ──→ recipes
///  (1)        (N:M)          (1)
/// ```
pub async fn get_recipe_tags(pool: &SqlitePool, recipe_id: &str) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.color, t.slug
        FROM tags t
        JOIN recipe_tags rt ON rt.tag_id = t.id
        WHERE rt.recipe_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
