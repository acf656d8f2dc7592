//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 로그인(토큰 발급)
//! - `health`: 서버 상태 확인
//! - `ingredients`: 재료 조회/검색 (읽기 전용)
//! - `recipes`: 레시피 CRUD, 즐겨찾기, 장바구니, 쇼핑 목록 다운로드
//! - `tags`: 태그 조회 (읽기 전용)
//! - `users`: 가입, 사용자 조회, 비밀번호 변경, 구독

use sqlx::SqlitePool;

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

pub use health::*;
pub use ingredients::*;
pub use recipes::*;
pub use tags::*;
pub use users::*;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// 로그인 토큰 유효 시간(시간)
    pub token_ttl_hours: i64,
}
