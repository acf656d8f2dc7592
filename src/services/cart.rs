//! # 장바구니 재료 합산
//!
//! 사용자의 장바구니에 담긴 모든 레시피의 재료를 이름별로 합산하여
//! 쇼핑 목록(`재료 이름 → 총 수량`)을 만듭니다.
//!
//! ## 처리 흐름
//! 1. 사용자의 `shopping_carts` 행을 조회
//! 2. 각 레시피의 재료 줄을 조회 (레시피가 없으면 `NotFound`)
//! 3. `sum_amounts`로 같은 이름의 수량을 모두 더함
//!
//! 같은 재료가 한 레시피에 여러 줄로 있거나 여러 레시피에 걸쳐 있어도
//! 줄마다 정확히 한 번씩 더해집니다.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::MembershipKind;

/// 다운로드 파일의 첫 줄
pub const SHOPPING_LIST_HEADER: &str = "Ingredient amount";

/// 재료 이름 → 총 수량
///
/// `BTreeMap`이라 이름순으로 순회되어 다운로드 파일 내용이 항상 같습니다.
pub type ShoppingList = BTreeMap<String, i64>;

/// 사용자의 장바구니를 합산합니다. 장바구니가 비어 있으면 빈 목록을 돌려줍니다.
pub async fn aggregate_cart(pool: &SqlitePool, user_id: &str) -> Result<ShoppingList, AppError> {
    let entries = db::list_memberships(pool, MembershipKind::ShoppingCart, user_id).await?;

    let mut lines = Vec::new();
    for entry in &entries {
        let recipe = db::get_recipe(pool, &entry.target_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let ingredients = db::get_recipe_ingredients(pool, &recipe.id).await?;
        lines.extend(ingredients.into_iter().map(|line| (line.name, line.amount)));
    }

    tracing::debug!(user_id, recipes = entries.len(), lines = lines.len(), "aggregated shopping cart");
    sum_amounts(lines)
}

/// (이름, 수량) 줄들을 이름별로 더합니다.
///
/// 합계가 `i64` 범위를 넘으면 잘린 값 대신 `BadRequest`를 돌려줍니다.
pub fn sum_amounts<I>(lines: I) -> Result<ShoppingList, AppError>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut list = ShoppingList::new();
    for (name, amount) in lines {
        let total = list.entry(name).or_insert(0);
        *total = total.checked_add(amount).ok_or_else(|| {
            AppError::BadRequest("Total ingredient amount is too large".to_string())
        })?;
    }
    Ok(list)
}

/// 쇼핑 목록을 텍스트 파일 내용으로 만듭니다.
///
/// ```text
/// Ingredient amount
/// egg 2
/// flour 300
/// ```
pub fn render_text(list: &ShoppingList) -> String {
    let mut out = String::from(SHOPPING_LIST_HEADER);
    out.push('\n');
    for (name, amount) in list {
        out.push_str(name);
        out.push(' ');
        out.push_str(&amount.to_string());
        out.push('\n');
    }
    out
}
