//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `ingredient`: 재료(Ingredient)
//! - `membership`: 즐겨찾기/장바구니/구독 멤버십 행
//! - `recipe`: 레시피와 레시피-재료 관계, 요청/응답 본문
//! - `tag`: 태그와 고정된 색상 목록
//! - `user`: 사용자(User)와 가입/로그인 요청
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Recipe`처럼 짧게 접근합니다.

pub mod ingredient;
pub mod membership;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::*;
pub use membership::*;
pub use recipe::*;
pub use tag::*;
pub use user::*;
