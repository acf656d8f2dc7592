//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `ingredients`: 재료 조회/검색/생성
//! - `memberships`: 즐겨찾기·장바구니·구독 테이블의 공통 쿼리
//! - `recipes`: 레시피 CRUD, 필터링 목록, 재료/태그 관계 재작성
//! - `tags`: 태그 조회/생성, 레시피의 태그 목록
//! - `users`: 사용자 조회/생성, 비밀번호 변경
//!
//! 트랜잭션 안에서도 쓰이는 조회 함수는 `SqlitePool`과 트랜잭션 연결을 모두
//! 받을 수 있도록 `SqliteExecutor`를 제네릭으로 받습니다.

use sqlx::migrate::Migrator;

pub mod ingredients;
pub mod memberships;
pub mod recipes;
pub mod tags;
pub mod users;

pub use ingredients::*;
pub use memberships::*;
pub use recipes::*;
pub use tags::*;

/// `./migrations` 폴더의 SQL 파일들을 컴파일 타임에 포함한 마이그레이터
///
/// 서버 시작 시(main.rs)와 테스트의 인메모리 DB 준비에서 함께 사용합니다.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// LIKE 패턴에 들어갈 사용자 입력에서 `%`, `_`, `\`를 이스케이프합니다.
/// 쿼리에는 `ESCAPE '\'`를 함께 써야 합니다.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("мука"), "мука");
    }
}
