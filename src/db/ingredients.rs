use crate::db::escape_like;
use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

/// 재료 목록을 조회합니다.
///
/// `name`이 있으면 이름에 검색어를 포함하는 재료만 돌려주고,
/// 검색어로 시작하는 재료를 먼저 정렬합니다.
/// SQLite의 LIKE는 ASCII 범위에서만 대소문자를 무시합니다.
pub async fn list_ingredients(
    pool: &SqlitePool,
    name: Option<&str>,
) -> Result<Vec<Ingredient>, AppError> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
        )
        .fetch_all(pool)
        .await?;
        return Ok(ingredients);
    };

    let escaped = escape_like(name);
    let ingredients = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT id, name, measurement_unit
        FROM ingredients
        WHERE name LIKE ? ESCAPE '\'
        ORDER BY CASE WHEN name LIKE ? ESCAPE '\' THEN 0 ELSE 1 END, name
        "#,
    )
    .bind(format!("%{escaped}%"))
    .bind(format!("{escaped}%"))
    .fetch_all(pool)
    .await?;

    Ok(ingredients)
}

pub async fn get_ingredient<'e, E>(executor: E, id: &str) -> Result<Option<Ingredient>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(ingredient)
}

pub async fn create_ingredient(
    pool: &SqlitePool,
    req: &CreateIngredient,
) -> Result<Ingredient, AppError> {
    req.validate()?;

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO ingredients (id, name, measurement_unit) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(&req.measurement_unit)
        .execute(pool)
        .await?;

    get_ingredient(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created ingredient".to_string()))
}
