//! # 멤버십 테이블 공통 쿼리
//!
//! `favorites`, `shopping_carts`, `subscriptions`는 모양이 같으므로
//! `MembershipKind`로 테이블/컬럼 이름을 골라 같은 쿼리를 씁니다.
//! 이름은 enum이 돌려주는 `&'static str`뿐이라 `format!`으로 넣어도
//! SQL 인젝션 위험이 없고, 값은 항상 `.bind()`로 전달합니다.
//!
//! "이미 있으면 거절" 같은 규칙은 여기 없고 `services::toggle`에 있습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

/// (user, target) 쌍의 행 수. UNIQUE 제약 때문에 0 또는 1입니다.
pub async fn count_memberships<'e, E>(
    executor: E,
    kind: MembershipKind,
    user_id: &str,
    target_id: &str,
) -> Result<i64, AppError>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE user_id = ? AND {} = ?",
        kind.table(),
        kind.target_column()
    );
    let (count,): (i64,) = sqlx::query_as(&sql)
        .bind(user_id)
        .bind(target_id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}

pub async fn membership_exists<'e, E>(
    executor: E,
    kind: MembershipKind,
    user_id: &str,
    target_id: &str,
) -> Result<bool, AppError>
where
    E: SqliteExecutor<'e>,
{
    Ok(count_memberships(executor, kind, user_id, target_id).await? > 0)
}

/// 멤버십 행을 추가합니다.
///
/// sqlx 에러를 그대로 돌려주므로 호출하는 쪽에서 UNIQUE 위반을
/// 원하는 메시지의 `Conflict`로 바꿀 수 있습니다.
pub async fn insert_membership(
    conn: &mut SqliteConnection,
    kind: MembershipKind,
    user_id: &str,
    target_id: &str,
) -> Result<Membership, sqlx::Error> {
    let id = uuid::Uuid::now_v7().to_string();
    let insert = format!(
        "INSERT INTO {} (id, user_id, {}) VALUES (?, ?, ?)",
        kind.table(),
        kind.target_column()
    );
    sqlx::query(&insert)
        .bind(&id)
        .bind(user_id)
        .bind(target_id)
        .execute(&mut *conn)
        .await?;

    let select = format!(
        "SELECT id, user_id, {} AS target_id, created_at FROM {} WHERE id = ?",
        kind.target_column(),
        kind.table()
    );
    sqlx::query_as::<_, Membership>(&select)
        .bind(&id)
        .fetch_one(&mut *conn)
        .await
}

/// (user, target) 쌍의 행을 삭제하고 삭제된 행 수를 돌려줍니다.
pub async fn delete_membership(
    conn: &mut SqliteConnection,
    kind: MembershipKind,
    user_id: &str,
    target_id: &str,
) -> Result<u64, AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE user_id = ? AND {} = ?",
        kind.table(),
        kind.target_column()
    );
    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(target_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// 사용자의 멤버십 행을 추가된 순서대로 조회합니다.
pub async fn list_memberships(
    pool: &SqlitePool,
    kind: MembershipKind,
    user_id: &str,
) -> Result<Vec<Membership>, AppError> {
    let sql = format!(
        "SELECT id, user_id, {} AS target_id, created_at FROM {} WHERE user_id = ? ORDER BY created_at, id",
        kind.target_column(),
        kind.table()
    );
    let rows = sqlx::query_as::<_, Membership>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
