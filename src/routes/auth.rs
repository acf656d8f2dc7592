use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::create_access_token,
    models::user::*,
    routes::AppState,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// `POST /auth/token/login`: 이메일/비밀번호로 액세스 토큰을 발급합니다.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    // 이메일이 없을 때와 비밀번호가 틀렸을 때 같은 메시지로 응답
    let user = db_users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "login failed");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let auth_token = create_access_token(&user.id, &state.jwt_secret, state.token_ttl_hours)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "token issued");
    Ok(Json(TokenResponse { auth_token }))
}

/// Argon2id 해시 문자열(PHC 형식)을 만듭니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// 저장된 해시와 비교합니다. 해시 자체가 깨져 있으면 `Internal`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_only_with_original() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }
}
