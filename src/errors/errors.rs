//! 애플리케이션 전역 에러 타입
//!
//! 모든 계층(repository, service, handler)이 같은 `AppError`를 반환하고,
//! actix-web 경계에서 `ResponseError` 구현을 통해 JSON 에러 응답으로 변환됩니다.
//!
//! ```text
//! { "error": "not_found", "message": "Post not found" }
//! ```
//!
//! 인프라 계열 에러(DB, Redis, S3, 내부 에러)는 상세 메시지를 로그로만 남기고
//! 클라이언트에는 일반화된 메시지를 돌려줍니다.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 오브젝트 스토리지(S3) 에러 (500)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 입력값 검증 실패 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 등 충돌 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 그 밖의 서버 내부 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 에러 종류 코드
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::RedisError(_) => "cache_error",
            AppError::StorageError(_) => "storage_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.kind(),
            "message": self.public_message(),
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("비밀번호 처리 실패: {}", e))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // 필드별 첫 번째 메시지만 모아 하나의 문장으로 만든다
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        AppError::ValidationError(messages.join(", "))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON 본문 추출 실패를 `ValidationError`로 (`JsonConfig::error_handler`)
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
}

/// 쿼리 문자열 추출 실패 (`QueryConfig::error_handler`)
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid query string: {}", err)).into()
}

/// 경로 파라미터 추출 실패 (`PathConfig::error_handler`)
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid path: {}", err)).into()
}

/// `Result`에 문맥 메시지를 붙여 `InternalError`로 변환하는 헬퍼
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::Validate;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Post not found".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("dup".into()), StatusCode::CONFLICT),
            (AppError::AuthenticationError("no".into()), StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("no".into()), StatusCode::FORBIDDEN),
            (AppError::StorageError("s3".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::DatabaseError("db".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = AppError::NotFound("Post not found".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Post not found");
    }

    #[actix_web::test]
    async fn test_server_error_hides_details() {
        let response = AppError::DatabaseError("connection string leaked".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(!text.contains("connection string"));
        assert_eq!(json["error"], "database_error");
        assert_eq!(json["message"], "Internal server error");
    }

    #[derive(Validate)]
    struct EmailForm {
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_conversion() {
        let form = EmailForm { email: "not-an-email".into() };
        let error: AppError = form.validate().unwrap_err().into();

        match error {
            AppError::ValidationError(msg) => assert_eq!(msg, "Invalid email format"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
