use serde::Serialize;

/// 멤버십 종류: 사용자와 대상 사이의 "있음/없음" 관계를 담는 테이블들
///
/// | 종류 | 테이블 | 대상 |
/// |------|--------|------|
/// | `Favorite` | `favorites` | 레시피 |
/// | `ShoppingCart` | `shopping_carts` | 레시피 |
/// | `Subscription` | `subscriptions` | 작성자(사용자) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipKind {
    Favorite,
    ShoppingCart,
    Subscription,
}

impl MembershipKind {
    /// 테이블 이름. 고정된 값만 돌려주므로 SQL 문자열에 직접 넣어도 안전합니다.
    pub const fn table(self) -> &'static str {
        match self {
            MembershipKind::Favorite => "favorites",
            MembershipKind::ShoppingCart => "shopping_carts",
            MembershipKind::Subscription => "subscriptions",
        }
    }

    /// 대상 ID가 들어 있는 컬럼 이름
    pub const fn target_column(self) -> &'static str {
        match self {
            MembershipKind::Favorite | MembershipKind::ShoppingCart => "recipe_id",
            MembershipKind::Subscription => "author_id",
        }
    }
}

/// 멤버십 행: 즐겨찾기, 장바구니, 구독 테이블의 공통 모양입니다.
///
/// `target_id`는 종류에 따라 레시피 ID(즐겨찾기/장바구니) 또는
/// 작성자 ID(구독)입니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub created_at: String,
}
