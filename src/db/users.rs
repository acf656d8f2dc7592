use crate::error::AppError;
use crate::models::user::User;
use sqlx::{SqliteExecutor, SqlitePool};

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, password_hash, created_at";

pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, username, first_name, last_name, password_hash)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .execute(pool)
    .await
    .map_err(|e| AppError::unique_violation_as_conflict(e, "Username or email is already taken"))?;

    find_by_id(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<User>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;

    Ok(users)
}

pub async fn update_password(
    pool: &SqlitePool,
    id: &str,
    password_hash: &str,
) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
