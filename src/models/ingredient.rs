//! # 재료 모델 정의
//!
//! 재료는 이름과 측정 단위로 이루어지며, 레시피에서는 수량(amount)과 함께 참조됩니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 재료 엔티티: DB의 `ingredients` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: String,
    /// 재료 이름 (예: "мука")
    pub name: String,
    /// 측정 단위 (예: "г", "шт.")
    pub measurement_unit: String,
}

/// 재료 생성 입력 (HTTP로는 노출되지 않습니다)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub measurement_unit: String,
}

/// `GET /api/ingredients?name=...` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// 이름 검색어: 대소문자 구분 없이 "시작" 일치가 먼저, "포함" 일치가 뒤에 옵니다.
    pub name: Option<String>,
}
