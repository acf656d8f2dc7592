//! # 멤버십 토글 (즐겨찾기 / 장바구니 / 구독)
//!
//! 각 (user, target) 쌍은 "없음"과 "있음" 두 상태만 가집니다.
//!
//! ```text
//!          add                      remove
//! [없음] ───────→ [있음]     [있음] ───────→ [없음]
//! [있음] ──add──→ Conflict   [없음] ─remove─→ Conflict
//! ```
//!
//! 확인과 쓰기는 한 트랜잭션 안에서 실행되고, 테이블의 UNIQUE 제약이
//! 동시 요청 사이의 경쟁까지 막습니다. 제약에 걸린 INSERT도 중복 추가와
//! 같은 `Conflict` 메시지로 응답합니다.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db;
use crate::error::AppError;
use crate::models::{Membership, MembershipKind};

pub const SELF_SUBSCRIPTION_MESSAGE: &str = "You cannot subscribe to yourself";

/// 멤버십 종류와 두 가지 거절 메시지로 구성된 토글 규칙
#[derive(Debug, Clone, Copy)]
pub struct ToggleGuard {
    pub kind: MembershipKind,
    /// 이미 있는 쌍을 다시 추가할 때
    pub duplicate_message: &'static str,
    /// 없는 쌍을 삭제하려 할 때
    pub missing_message: &'static str,
}

impl ToggleGuard {
    pub const FAVORITES: ToggleGuard = ToggleGuard {
        kind: MembershipKind::Favorite,
        duplicate_message: "Recipe is already in favorites",
        missing_message: "Recipe is not in favorites",
    };

    pub const SHOPPING_CART: ToggleGuard = ToggleGuard {
        kind: MembershipKind::ShoppingCart,
        duplicate_message: "Recipe is already in the shopping cart",
        missing_message: "Recipe is not in the shopping cart",
    };

    pub const SUBSCRIPTIONS: ToggleGuard = ToggleGuard {
        kind: MembershipKind::Subscription,
        duplicate_message: "Already subscribed to this author",
        missing_message: "Not subscribed to this author",
    };

    /// 없음 → 있음. 대상이 없으면 `NotFound`, 이미 있으면 `Conflict`.
    ///
    /// 구독은 중복 확인 전에 자기 자신 구독부터 거절합니다.
    pub async fn add(
        &self,
        pool: &SqlitePool,
        user_id: &str,
        target_id: &str,
    ) -> Result<Membership, AppError> {
        let mut tx = pool.begin().await?;

        self.ensure_target_exists(&mut tx, target_id).await?;

        if self.kind == MembershipKind::Subscription && user_id == target_id {
            return Err(AppError::Conflict(SELF_SUBSCRIPTION_MESSAGE.to_string()));
        }

        if db::membership_exists(&mut *tx, self.kind, user_id, target_id).await? {
            return Err(AppError::Conflict(self.duplicate_message.to_string()));
        }

        let membership = db::insert_membership(&mut tx, self.kind, user_id, target_id)
            .await
            .map_err(|e| AppError::unique_violation_as_conflict(e, self.duplicate_message))?;
        tx.commit().await?;

        tracing::info!(kind = ?self.kind, user_id, target_id, "membership added");
        Ok(membership)
    }

    /// 있음 → 없음. 대상이 없으면 `NotFound`, 쌍이 없으면 `Conflict`.
    pub async fn remove(
        &self,
        pool: &SqlitePool,
        user_id: &str,
        target_id: &str,
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        self.ensure_target_exists(&mut tx, target_id).await?;

        let removed = db::delete_membership(&mut tx, self.kind, user_id, target_id).await?;
        if removed == 0 {
            return Err(AppError::Conflict(self.missing_message.to_string()));
        }
        tx.commit().await?;

        tracing::info!(kind = ?self.kind, user_id, target_id, "membership removed");
        Ok(())
    }

    async fn ensure_target_exists(
        &self,
        conn: &mut SqliteConnection,
        target_id: &str,
    ) -> Result<(), AppError> {
        let exists = match self.kind {
            MembershipKind::Favorite | MembershipKind::ShoppingCart => {
                db::get_recipe(conn, target_id).await?.is_some()
            }
            MembershipKind::Subscription => db::users::find_by_id(conn, target_id).await?.is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}
