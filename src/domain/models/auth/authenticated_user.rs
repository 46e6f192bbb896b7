//! 인증된 사용자 정보
//!
//! `AuthMiddleware`가 토큰 검증에 성공하면 요청 extensions에 넣어두고,
//! 핸들러는 인자로 `AuthenticatedUser`를 받아 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[post("")]
//! async fn create_post(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
//!     // user.user_id, user.name 사용
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::models::token::token::TokenClaims;
use crate::errors::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    /// 본인이 아니면 403
    pub fn ensure_self(&self, user_id: &str) -> Result<(), AppError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(
                "You do not have permission to modify this user".to_string(),
            ))
        }
    }
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

/// 미들웨어가 사용자를 넣어두지 않았다면 401
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication is required".to_string(),
            )
            .into())),
        }
    }
}

/// 인증이 선택인 엔드포인트용
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use actix_web::ResponseError;

    fn alice() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user-1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            roles: vec!["user".into(), "moderator".into()],
        }
    }

    #[test]
    fn test_roles() {
        let user = alice();
        assert!(user.has_role("user"));
        assert!(!user.has_role("admin"));
        assert!(user.has_any_role(&["admin", "moderator"]));
        assert!(!user.has_any_role(&["admin", "premium"]));
    }

    #[test]
    fn test_ensure_self() {
        let user = alice();
        assert!(user.ensure_self("user-1").is_ok());

        let err = user.ensure_self("user-2").unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;

        let err = result.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_extractor_reads_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(alice());

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, "user-1");

        let optional = OptionalUser::extract(&req).await.unwrap();
        assert!(optional.0.is_some());
    }
}
