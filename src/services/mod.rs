//! # 비즈니스 로직 모듈
//!
//! DB 계층 위에서 여러 쿼리를 묶어 규칙을 적용하는 코드입니다.
//! - `cart`: 장바구니 재료 합산과 텍스트 파일 생성
//! - `presenter`: 보는 사람 기준 레시피/사용자 응답 생성
//! - `toggle`: 즐겨찾기·장바구니·구독의 추가/삭제 규칙

pub mod cart;
pub mod presenter;
pub mod toggle;
