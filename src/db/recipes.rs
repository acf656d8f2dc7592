//! # 레시피 데이터베이스 쿼리 모듈
//!
//! 레시피 CRUD와 필터링 목록, 재료/태그 관계 재작성을 담당합니다.
//!
//! ## 쓰기 정책 (replace-all)
//! 생성과 수정 모두 하나의 트랜잭션에서 실행됩니다.
//! 수정 시 기존 `recipe_ingredients`/`recipe_tags` 행은 모두 지우고
//! 요청에 담긴 목록으로 다시 만듭니다. 관계 행에는 수량 외의 메타데이터가
//! 없으므로 다시 만들어도 잃는 정보가 없습니다.
//! 존재하지 않는 재료/태그 ID가 하나라도 있으면 `NotFound`로 실패하고
//! 트랜잭션이 롤백되어 아무것도 저장되지 않습니다.

use std::collections::HashSet;

use crate::db::{self, escape_like};
use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.pub_date";

/// 목록 필터. 각 필드는 `Some`일 때만 조건으로 추가됩니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecipeFilter<'a> {
    pub tag_slug: Option<&'a str>,
    pub author_id: Option<&'a str>,
    pub search: Option<&'a str>,
    /// 이 사용자가 즐겨찾기한 레시피만
    pub favorited_by: Option<&'a str>,
    /// 이 사용자의 장바구니에 있는 레시피만
    pub in_cart_of: Option<&'a str>,
}

/// 조건에 맞는 레시피를 최신순으로 조회합니다.
///
/// `QueryBuilder`로 필요한 조건만 이어 붙이고 값은 모두 `push_bind`로 바인딩합니다.
pub async fn list_recipes(
    pool: &SqlitePool,
    filter: RecipeFilter<'_>,
) -> Result<Vec<Recipe>, AppError> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE 1 = 1"));

    if let Some(slug) = filter.tag_slug {
        query
            .push(
                " AND EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
                 WHERE rt.recipe_id = r.id AND t.slug = ",
            )
            .push_bind(slug)
            .push(")");
    }
    if let Some(author_id) = filter.author_id {
        query.push(" AND r.author_id = ").push_bind(author_id);
    }
    if let Some(search) = filter.search.map(str::trim).filter(|s| !s.is_empty()) {
        query
            .push(" AND r.name LIKE ")
            .push_bind(format!("%{}%", escape_like(search)))
            .push(" ESCAPE '\\'");
    }
    if let Some(user_id) = filter.favorited_by {
        query
            .push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ")
            .push_bind(user_id)
            .push(")");
    }
    if let Some(user_id) = filter.in_cart_of {
        query
            .push(
                " AND EXISTS (SELECT 1 FROM shopping_carts c WHERE c.recipe_id = r.id AND c.user_id = ",
            )
            .push_bind(user_id)
            .push(")");
    }
    // UUIDv7은 생성 시각 순이므로 같은 밀리초에 게시된 레시피도 최신순이 유지됩니다.
    query.push(" ORDER BY r.pub_date DESC, r.id DESC");

    let recipes = query.build_query_as::<Recipe>().fetch_all(pool).await?;
    Ok(recipes)
}

pub async fn get_recipe<'e, E>(executor: E, id: &str) -> Result<Option<Recipe>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = ?");
    let recipe = sqlx::query_as::<_, Recipe>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(recipe)
}

/// 레시피의 재료 줄을 입력된 순서대로 조회합니다.
pub async fn get_recipe_ingredients<'e, E>(
    executor: E,
    recipe_id: &str,
) -> Result<Vec<RecipeIngredient>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, RecipeIngredient>(
        r#"
        SELECT i.id, i.name, i.measurement_unit, ri.amount
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?
        ORDER BY ri.id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// 새 레시피를 만들고 재료/태그 관계까지 한 트랜잭션으로 저장합니다.
///
/// 요청 검증(`validate()`)은 호출 전에 끝나 있어야 합니다.
pub async fn create_recipe(
    pool: &SqlitePool,
    author_id: &str,
    req: &CreateRecipeRequest,
) -> Result<Recipe, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO recipes (id, author_id, name, image, text, cooking_time)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(author_id)
    .bind(&req.name)
    .bind(&req.image)
    .bind(&req.text)
    .bind(req.cooking_time)
    .execute(&mut *tx)
    .await?;

    replace_associations(&mut tx, &id, &req.ingredients, &req.tags).await?;

    let recipe = get_recipe(&mut *tx, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created recipe".to_string()))?;
    tx.commit().await?;

    Ok(recipe)
}

/// 레시피를 수정합니다. 재료/태그 관계는 통째로 다시 만듭니다.
///
/// ## 반환값
/// - `Ok(Some(Recipe))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 레시피가 없음
pub async fn update_recipe(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateRecipeRequest,
) -> Result<Option<Recipe>, AppError> {
    let mut tx = pool.begin().await?;

    if get_recipe(&mut *tx, id).await?.is_none() {
        return Ok(None);
    }

    // COALESCE(?, column): 값을 보내지 않은(NULL) 필드는 기존 값 유지
    sqlx::query(
        r#"
        UPDATE recipes
        SET name = COALESCE(?, name),
            image = COALESCE(?, image),
            text = COALESCE(?, text),
            cooking_time = COALESCE(?, cooking_time)
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.image)
    .bind(&req.text)
    .bind(req.cooking_time)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    replace_associations(&mut tx, id, &req.ingredients, &req.tags).await?;

    let recipe = get_recipe(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(recipe)
}

/// 레시피의 재료/태그 관계를 모두 지우고 주어진 목록으로 다시 만듭니다.
///
/// 같은 태그 ID가 여러 번 오면 한 번만 연결합니다.
/// 같은 재료가 여러 줄로 오면 줄마다 따로 저장합니다(장바구니 합산 시 모두 더해짐).
pub async fn replace_associations(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    ingredients: &[IngredientAmount],
    tag_ids: &[String],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    for line in ingredients {
        if db::get_ingredient(&mut *conn, &line.id).await?.is_none() {
            tracing::debug!(ingredient_id = %line.id, "unknown ingredient in recipe write");
            return Err(AppError::NotFound);
        }
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(&line.id)
        .bind(line.amount)
        .execute(&mut *conn)
        .await?;
    }

    let mut seen = HashSet::new();
    for tag_id in tag_ids.iter().filter(|id| seen.insert(id.as_str())) {
        if db::get_tag(&mut *conn, tag_id).await?.is_none() {
            tracing::debug!(tag_id = %tag_id, "unknown tag in recipe write");
            return Err(AppError::NotFound);
        }
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// ID로 레시피를 삭제합니다.
///
/// 관계 테이블(재료, 태그)과 즐겨찾기/장바구니 행은 `ON DELETE CASCADE`로 함께 삭제됩니다.
pub async fn delete_recipe(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 작성자의 레시피를 짧은 형태로 최신순 조회합니다. `limit`이 있으면 그 개수까지만.
pub async fn list_author_recipes(
    pool: &SqlitePool,
    author_id: &str,
    limit: Option<i64>,
) -> Result<Vec<RecipeShort>, AppError> {
    // LIMIT -1: SQLite에서 "제한 없음"
    let recipes = sqlx::query_as::<_, RecipeShort>(
        r#"
        SELECT id, name, image, cooking_time
        FROM recipes
        WHERE author_id = ?
        ORDER BY pub_date DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(author_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

pub async fn count_author_recipes(pool: &SqlitePool, author_id: &str) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
