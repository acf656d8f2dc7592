//! # 응답 빌더 (Presenter)
//!
//! 같은 레시피/사용자라도 누가 보느냐에 따라 응답이 달라집니다.
//! `is_favorited`, `is_in_shopping_cart`, `is_subscribed`는 보는 사람 기준이고,
//! 익명 요청이면 모두 false입니다.
//!
//! 핸들러는 `(action, 인증 여부)`를 넘겨 presenter를 명시적으로 고르고,
//! presenter가 필요한 조회를 모아 응답을 만듭니다.
//!
//! | action | 익명 | 인증됨 |
//! |--------|------|--------|
//! | List / Retrieve | `Public` | `Personalized` |
//! | Create / Update | 401 | `Personalized` |

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    List,
    Retrieve,
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    SignUp,
    List,
    Retrieve,
    Me,
}

/// 레시피 응답 빌더
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipePresenter {
    /// 개인화 플래그가 모두 false
    Public,
    /// `viewer_id` 기준으로 즐겨찾기/장바구니/구독 여부를 채움
    Personalized { viewer_id: String },
}

impl RecipePresenter {
    pub fn select(action: RecipeAction, viewer: Option<&AuthUser>) -> Result<Self, AppError> {
        match (action, viewer) {
            (RecipeAction::Create | RecipeAction::Update, None) => Err(AppError::Unauthorized(
                "Authentication required".to_string(),
            )),
            (RecipeAction::List | RecipeAction::Retrieve, None) => Ok(Self::Public),
            (_, Some(user)) => Ok(Self::Personalized {
                viewer_id: user.user_id.clone(),
            }),
        }
    }

    pub fn viewer_id(&self) -> Option<&str> {
        match self {
            Self::Public => None,
            Self::Personalized { viewer_id } => Some(viewer_id),
        }
    }

    fn user_presenter(&self) -> UserPresenter {
        match self {
            Self::Public => UserPresenter::Public,
            Self::Personalized { viewer_id } => UserPresenter::Personalized {
                viewer_id: viewer_id.clone(),
            },
        }
    }

    pub async fn render(&self, pool: &SqlitePool, recipe: Recipe) -> Result<RecipeResponse, AppError> {
        let tags = db::get_recipe_tags(pool, &recipe.id).await?;
        let ingredients = db::get_recipe_ingredients(pool, &recipe.id).await?;
        let author = db::users::find_by_id(pool, &recipe.author_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let author = self.user_presenter().render(pool, author).await?;

        let (is_favorited, is_in_shopping_cart) = match self.viewer_id() {
            Some(viewer_id) => (
                db::membership_exists(pool, MembershipKind::Favorite, viewer_id, &recipe.id).await?,
                db::membership_exists(pool, MembershipKind::ShoppingCart, viewer_id, &recipe.id)
                    .await?,
            ),
            None => (false, false),
        };

        Ok(RecipeResponse {
            id: recipe.id,
            tags,
            author,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            pub_date: recipe.pub_date,
        })
    }

    pub async fn render_all(
        &self,
        pool: &SqlitePool,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeResponse>, AppError> {
        let mut out = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            out.push(self.render(pool, recipe).await?);
        }
        Ok(out)
    }
}

/// 사용자 응답 빌더
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPresenter {
    Public,
    Personalized { viewer_id: String },
}

impl UserPresenter {
    pub fn select(action: UserAction, viewer: Option<&AuthUser>) -> Result<Self, AppError> {
        match (action, viewer) {
            // 방금 가입한 사용자는 아무도 구독하지 않았으므로 개인화할 것이 없음
            (UserAction::SignUp, _) => Ok(Self::Public),
            (UserAction::Me, None) => Err(AppError::Unauthorized(
                "Authentication required".to_string(),
            )),
            (UserAction::List | UserAction::Retrieve, None) => Ok(Self::Public),
            (_, Some(user)) => Ok(Self::Personalized {
                viewer_id: user.user_id.clone(),
            }),
        }
    }

    pub async fn render(&self, pool: &SqlitePool, user: User) -> Result<UserResponse, AppError> {
        let is_subscribed = match self {
            Self::Public => false,
            Self::Personalized { viewer_id } => {
                db::membership_exists(pool, MembershipKind::Subscription, viewer_id, &user.id)
                    .await?
            }
        };
        Ok(UserResponse::new(user, is_subscribed))
    }

    pub async fn render_all(
        &self,
        pool: &SqlitePool,
        users: Vec<User>,
    ) -> Result<Vec<UserResponse>, AppError> {
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.render(pool, user).await?);
        }
        Ok(out)
    }
}

/// 구독 목록의 한 항목: 작성자 정보 + 최근 레시피 + 전체 레시피 수
///
/// 구독 중인 작성자만 나오므로 `is_subscribed`는 항상 true입니다.
pub async fn render_subscription(
    pool: &SqlitePool,
    author: User,
    recipes_limit: Option<i64>,
) -> Result<SubscriptionResponse, AppError> {
    let recipes = db::list_author_recipes(pool, &author.id, recipes_limit).await?;
    let recipes_count = db::count_author_recipes(pool, &author.id).await?;

    Ok(SubscriptionResponse {
        author: UserResponse::new(author, true),
        recipes,
        recipes_count,
    })
}
