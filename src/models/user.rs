use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::RecipeShort;

/// 사용자 이름에 허용되는 문자: 글자, 숫자, `_`, `.`, `@`, `+`, `-`
pub static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+\z").expect("username pattern is a valid regex"));

/// `/users/me` 경로와 충돌하므로 사용할 수 없는 이름
pub const RESERVED_USERNAME: &str = "me";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserResponse {
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// 구독 목록 항목: 작성자 필드가 최상위에 펼쳐지고 레시피 목록이 붙습니다.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: i64,
}

/// `GET /api/users/subscriptions?recipes_limit=3`
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    pub recipes_limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Enter a valid email address"), length(max = 254))]
    pub email: String,
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = *USERNAME_PATTERN,
            message = "Username may contain only letters, digits and . @ + - _"
        ),
        custom(function = "reject_reserved_username")
    )]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 150, message = "Password must be at least 8 characters"))]
    pub password: String,
}

fn reject_reserved_username(username: &str) -> Result<(), ValidationError> {
    if username == RESERVED_USERNAME {
        return Err(ValidationError::new("reserved_username")
            .with_message("Using \"me\" as a username is not allowed".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, max = 150, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}
