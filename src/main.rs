//! # Foodgram 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. API 라우터 설정 후 HTTP 서버 시작
//!
//! 라우터와 핸들러는 라이브러리 크레이트(`foodgram`)에 있고,
//! 여기서는 설정을 읽어 조립한 뒤 서버를 띄우기만 합니다.

use std::str::FromStr;

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use foodgram::{build_router, config::Config, db::MIGRATOR, routes::AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 foodgram, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodgram=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Foodgram server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 데이터베이스 파일이 없으면 새로 만듭니다. 외래 키 제약은 sqlx 기본값으로 켜져 있습니다.
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State)와 라우터 ──
    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        token_ttl_hours: config.token_ttl_hours,
    };
    let app = build_router(state);

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
