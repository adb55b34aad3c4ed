//! 애플리케이션 전역 에러 타입
//!
//! 모든 계층(리포지토리, 서비스, 핸들러)은 `AppError`를 반환하고,
//! `ResponseError` 구현이 HTTP 상태 코드와 `{"error": "..."}` 본문으로 변환합니다.
//!
//! | 변형 | 상태 코드 |
//! |------|-----------|
//! | `ValidationError`, `InvalidAssertion` | 400 |
//! | `AuthenticationError` | 401 |
//! | `AuthorizationError` | 403 |
//! | `NotFound` | 404 |
//! | `ConflictError` | 409 |
//! | `ExternalServiceError` | 502 |
//! | 그 외 | 500 |

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 자격 증명/토큰 실패. 원인은 메시지에 담지 않는다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 IdP가 발급한 assertion(Google ID 토큰) 검증 실패
    #[error("Invalid assertion: {0}")]
    InvalidAssertion(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 토큰 검증 실패 공통 에러
    pub fn invalid_token() -> Self {
        AppError::AuthenticationError("invalid token".to_string())
    }

    /// 로그인 실패 공통 에러 (이메일 없음 / 비밀번호 불일치 구분 없음)
    pub fn invalid_credentials() -> Self {
        AppError::AuthenticationError("invalid email or password".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidAssertion(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 내부 에러의 상세 내용은 로그에만 남긴다
        let message = match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn maps_each_variant_to_status() {
        let cases = [
            (AppError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidAssertion("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::invalid_token(), StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("no".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("post".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("email".into()), StatusCode::CONFLICT),
            (AppError::ExternalServiceError("google".into()), StatusCode::BAD_GATEWAY),
            (AppError::DatabaseError("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn internal_details_are_not_exposed() {
        let response = AppError::DatabaseError("connection string mongodb://secret".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(!text.contains("secret"));
        assert!(text.contains("Internal server error"));
    }

    #[actix_web::test]
    async fn token_failures_share_one_message() {
        let response = AppError::invalid_token().error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Authentication error: invalid token");
    }
}
