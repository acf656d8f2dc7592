//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 로그인 토큰 서명에 사용할 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값 `8000`)
//! - `TOKEN_TTL_HOURS`: 로그인 토큰 유효 시간 (기본값 `24`)
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 크기 (기본값 `5`)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `AppState`로 나눠 전달됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/foodgram.db?mode=rwc")
    pub database_url: String,
    /// JWT 서명/검증 비밀키
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    /// 로그인 토큰 유효 시간(시간 단위)
    pub token_ttl_hours: i64,
    pub db_max_connections: u32,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 값이 없거나 숫자로 해석되지 않으면 기본값을 씁니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8000),
            token_ttl_hours: parse_or("TOKEN_TTL_HOURS", 24),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
        })
    }
}

/// 환경변수를 숫자로 읽고, 없거나 파싱에 실패하면 `default`를 돌려줍니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
