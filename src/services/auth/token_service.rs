//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명한 액세스 토큰을 발급하고 검증합니다. 게시글 작성자 정보를
//! 토큰에서 바로 꺼낼 수 있도록 클레임에 이름과 이메일을 함께 넣습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    domain::entities::users::user::User,
    domain::models::token::token::TokenClaims,
};
use crate::errors::{AppError, ErrorContext};

/// JWT 토큰 관리 서비스
///
/// 서명 키와 만료 시간은 호출 시점의 [`JwtConfig`]를 따릅니다.
#[service(name="token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = TokenService::instance().generate_token(&user)?;
    /// ```
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let claims = claims_for(user, Duration::hours(JwtConfig::expiration_hours()));
        encode_claims(&claims, &JwtConfig::secret())
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_claims(token, &JwtConfig::secret())
    }
}

fn claims_for(user: &User, ttl: Duration) -> TokenClaims {
    let now = Utc::now();

    TokenClaims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        roles: user.roles.clone(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String, AppError> {
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key).context("JWT 토큰 생성 실패")
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    decode::<TokenClaims>(token, &decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("Token expired".to_string())
            }
            _ => {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::AuthenticationError("Invalid token".to_string())
            }
        })
}

/// `Authorization: Bearer {token}` 헤더에서 토큰 부분만 꺼냅니다.
///
/// 스킴 이름은 대소문자를 구분하지 않으며, 토큰이 비어 있으면 거부합니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let invalid = || AppError::AuthenticationError("Invalid authorization header".to_string());

    let (scheme, token) = auth_header.trim().split_once(' ').ok_or_else(invalid)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(invalid());
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn user() -> User {
        User::new("Alice".into(), "alice@example.com".into(), "hash".into())
    }

    #[test]
    fn test_claims_round_trip() {
        let user = user();
        let token = encode_claims(&claims_for(&user, Duration::hours(1)), SECRET).unwrap();

        let claims = decode_claims(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.roles, vec!["user"]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = encode_claims(&claims_for(&user(), Duration::hours(1)), SECRET).unwrap();

        let result = decode_claims(&token, "other-secret");
        assert!(matches!(result, Err(AppError::AuthenticationError(ref m)) if m == "Invalid token"));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 기본 leeway(60초)보다 충분히 과거
        let token = encode_claims(&claims_for(&user(), Duration::hours(-2)), SECRET).unwrap();

        let result = decode_claims(&token, SECRET);
        assert!(matches!(result, Err(AppError::AuthenticationError(ref m)) if m == "Token expired"));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_claims("not.a.jwt", SECRET).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(extract_bearer_token("bearer   abc").unwrap(), "abc");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("abc").is_err());
    }
}
