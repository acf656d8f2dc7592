//! # 태그 모델 정의
//!
//! 태그는 레시피를 분류하는 라벨입니다 (예: "Завтрак", "Обед").
//! HTTP로는 읽기 전용이며, 생성은 DB 계층 함수(`db::create_tag`)로만 이루어집니다.
//!
//! ## 구조체 역할
//! - `TagColor`: 태그 표시 색상: 고정된 다섯 값 중 하나
//! - `Tag`: 데이터베이스에 저장된 태그 (응답용)
//! - `CreateTag`: 새 태그 생성 입력

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// slug에 허용되는 문자: 영문, 숫자, `-`, `_`
pub static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is a valid regex"));

/// 태그 색상: DB에는 variant 이름 그대로("Gray" 등) TEXT로 저장됩니다.
///
/// `sqlx::Type` derive 덕분에 `Option<TagColor>`를 바로 bind/조회할 수 있고,
/// 스키마의 `CHECK (color IN (...))`가 같은 목록을 DB에서도 강제합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TagColor {
    Gray,
    Black,
    White,
    Ginger,
    Mixed,
}

/// 태그 엔티티: DB의 `tags` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// 태그 고유 식별자 (UUIDv7 형식 문자열)
    pub id: String,
    /// 태그 이름 (유일)
    pub name: String,
    /// 표시 색상, 지정하지 않을 수 있음
    pub color: Option<TagColor>,
    /// URL 필터(`?tags=breakfast`)에 쓰이는 유일한 식별 문자열
    pub slug: String,
}

/// 태그 생성 입력
///
/// `slug`를 생략하면 이름으로부터 `slug::slugify`로 만들어집니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub color: Option<TagColor>,
    #[validate(
        length(min = 1, max = 200),
        regex(path = *SLUG_PATTERN, message = "Slug contains a disallowed character")
    )]
    pub slug: Option<String>,
}
