//! # 레시피 모델 정의
//!
//! ## 구조체 역할
//! - `Recipe`: `recipes` 테이블 한 행
//! - `RecipeIngredient`: 레시피에 포함된 재료 한 줄 (재료 정보 + 수량)
//! - `RecipeShort`: 즐겨찾기/장바구니 추가 응답과 구독 목록에 쓰이는 짧은 형태
//! - `RecipeResponse`: 조회 응답 (태그, 작성자, 재료, 보는 사람 기준 플래그 포함)
//! - `CreateRecipeRequest` / `UpdateRecipeRequest`: 쓰기 요청 본문
//! - `RecipeListQuery`: 목록 필터

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Tag, UserResponse};

/// 레시피 엔티티: DB의 `recipes` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: String,
    /// 작성자 ID: 수정/삭제 권한 판단에 사용
    pub author_id: String,
    pub name: String,
    /// 클라이언트가 보낸 이미지 문자열(보통 base64 data URL)을 그대로 저장합니다.
    pub image: Option<String>,
    pub text: Option<String>,
    /// 조리 시간(분), 1 이상
    pub cooking_time: i64,
    /// 게시 시각 (ISO 8601), 목록은 이 값의 내림차순
    pub pub_date: String,
}

/// 레시피의 재료 한 줄: `recipe_ingredients`와 `ingredients`를 JOIN한 결과
///
/// `id`는 관계 행이 아니라 재료(Ingredient)의 ID입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeIngredient {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeShort {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i64,
}

impl From<Recipe> for RecipeShort {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// 레시피 조회 응답
///
/// `is_favorited`, `is_in_shopping_cart`, `author.is_subscribed`는
/// 요청한 사용자 기준 값이며, 익명 요청이면 모두 false입니다.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub tags: Vec<Tag>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: i64,
    pub pub_date: String,
}

/// 쓰기 요청의 재료 한 줄: `{ "id": "<재료 ID>", "amount": 200 }`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientAmount {
    pub id: String,
    #[validate(range(min = 1, message = "amount must be >= 1"))]
    pub amount: i64,
}

/// 레시피 생성 요청: `POST /api/recipes`의 요청 본문
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    /// `nested`: 각 재료 줄의 검증 에러가 `ingredients[i].amount`로 모입니다.
    #[validate(length(min = 1, message = "At least one ingredient is required"), nested)]
    pub ingredients: Vec<IngredientAmount>,
    /// 태그 ID 목록
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub text: Option<String>,
    #[validate(range(min = 1, message = "cooking_time must be >= 1"))]
    pub cooking_time: i64,
}

/// 레시피 수정 요청: `PATCH /api/recipes/{id}`의 요청 본문
///
/// 재료와 태그 목록은 항상 필요합니다. 기존 관계는 모두 지워지고
/// 보낸 목록으로 다시 만들어집니다(replace-all).
/// 나머지 필드는 보낸 것만 바뀝니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, message = "At least one ingredient is required"), nested)]
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub text: Option<String>,
    #[validate(range(min = 1, message = "cooking_time must be >= 1"))]
    pub cooking_time: Option<i64>,
}

/// `GET /api/recipes` 쿼리 파라미터
///
/// 예: `?tags=breakfast&is_favorited=1&author=<id>&search=борщ`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    /// 태그 slug
    pub tags: Option<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
    /// 작성자 ID
    pub author: Option<String>,
    /// 이름 부분 검색 (대소문자 무시)
    pub search: Option<String>,
}

impl RecipeListQuery {
    pub fn favorited_only(&self) -> bool {
        is_truthy(self.is_favorited.as_deref())
    }

    pub fn in_cart_only(&self) -> bool {
        is_truthy(self.is_in_shopping_cart.as_deref())
    }
}

/// `"1"`, `"true"`, `"True"`만 참으로 봅니다. 그 외(`"0"`, 빈 값 등)는 필터 없음.
fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true") | Some("True"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_errors;

    fn line(id: &str, amount: i64) -> IngredientAmount {
        IngredientAmount {
            id: id.to_string(),
            amount,
        }
    }

    #[test]
    fn zero_amount_fails_on_that_entry_only() {
        let req = CreateRecipeRequest {
            ingredients: vec![line("1", 2), line("2", 0)],
            tags: vec![],
            image: None,
            name: "Блины".into(),
            text: None,
            cooking_time: 20,
        };

        let errors = req.validate().unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["ingredients[1].amount"], vec!["amount must be >= 1".to_string()]);
    }

    #[test]
    fn update_validates_only_present_scalars() {
        let req = UpdateRecipeRequest {
            ingredients: vec![line("1", 1)],
            tags: vec![],
            image: None,
            name: None,
            text: None,
            cooking_time: Some(0),
        };

        let fields = field_errors(&req.validate().unwrap_err());
        assert!(fields.contains_key("cooking_time"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn empty_ingredient_list_is_rejected() {
        let req = CreateRecipeRequest {
            ingredients: vec![],
            tags: vec![],
            image: None,
            name: "Чай".into(),
            text: None,
            cooking_time: 3,
        };

        let fields = field_errors(&req.validate().unwrap_err());
        assert_eq!(
            fields["ingredients"],
            vec!["At least one ingredient is required".to_string()]
        );
    }

    #[test]
    fn list_flags_accept_one_and_true() {
        let query = RecipeListQuery {
            is_favorited: Some("1".into()),
            is_in_shopping_cart: Some("0".into()),
            ..Default::default()
        };
        assert!(query.favorited_only());
        assert!(!query.in_cart_only());
    }
}
