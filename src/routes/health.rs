//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터의 상태 확인용입니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

/// `GET /health`: 서버와 DB 연결 상태를 확인합니다.
///
/// DB에 `SELECT 1`이 실패해도 에러 응답 대신 `"database": "unavailable"`로
/// 표시하여, 프로세스 자체는 살아 있음을 알립니다.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Health check database query failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "database": database
    }))
}
