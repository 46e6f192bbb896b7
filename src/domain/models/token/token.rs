//! JWT 클레임
//!
//! 게시글 작성자 정보를 토큰에서 바로 꺼낼 수 있도록 `name`, `email`을 함께 담습니다.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 id (UUID)
    pub sub: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}
