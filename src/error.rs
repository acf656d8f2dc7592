//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//! - `field_errors`: `validator`의 중첩 에러를 `"ingredients[1].amount"` 같은
//!   평평한 필드 경로로 펼침

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스(레시피, 사용자, 재료, 태그)를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 선언적 검증 실패 (HTTP 400)
    /// #[from]: `req.validate()?`가 곧바로 이 variant로 변환됩니다.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음: 작성자가 아닌 사용자의 수정/삭제 시도 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 충돌 (HTTP 409)
    /// 중복 추가, 없는 멤버십 삭제, 자기 자신 구독, 중복 username/email
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// sqlx 에러 중 UNIQUE 제약 위반만 `Conflict(message)`로 바꿉니다.
    ///
    /// 애플리케이션 수준의 존재 확인을 통과한 두 요청이 동시에 INSERT하면
    /// 늦은 쪽은 DB의 UNIQUE 제약에 걸립니다. 클라이언트 입장에서는
    /// "이미 존재함"과 같은 상황이므로 같은 메시지로 응답합니다.
    pub fn unique_violation_as_conflict(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string(), None),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None)
            }
            AppError::Validation(ref errors) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                "Request validation failed".to_string(),
                Some(field_errors(errors)),
            ),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone(), None)
            }
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
        };

        // 결과: { "error": { "code": "conflict", "message": "..." } }
        // 검증 실패일 때만 "fields"가 추가됩니다.
        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// `ValidationErrors`를 `필드 경로 → 메시지 목록` 맵으로 펼칩니다.
///
/// ```text
/// ingredients: List { 1: { amount: [range] } }  →  "ingredients[1].amount": ["..."]
/// ```
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect_field_errors(errors, None, &mut out);
    out
}

fn collect_field_errors(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(items) => {
                let messages = out.entry(path).or_default();
                for item in items {
                    let message = item
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", item.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(nested, Some(&path), out);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    let item_path = format!("{path}[{index}]");
                    collect_field_errors(nested, Some(&item_path), out);
                }
            }
        }
    }
}
