//! 사용자 응답 DTO
//!
//! 비밀번호 해시는 어떤 응답에도 포함하지 않습니다. `profilePhoto`는 오브젝트 키가 아닌
//! presigned URL이며, 사진이 없거나 URL 생성에 실패하면 `null`입니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::users::address::Address;
use crate::domain::entities::users::user::User;
use crate::utils::time_utils::to_utc;

/// 간단한 사용자 정보 (`user-detail`, `/update`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User, profile_photo: Option<String>) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            profile_photo,
        }
    }
}

/// 전체 프로필 (회원가입, 부분 수정, 검색 결과)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub other_websites: Vec<String>,
    pub address: Option<Address>,
    pub roles: Vec<String>,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDetailResponse {
    pub fn from_user(user: User, profile_photo: Option<String>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            other_websites: user.other_websites,
            address: user.address,
            roles: user.roles,
            profile_photo,
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
        }
    }
}

/// `POST /user/signin`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_never_exposes_password() {
        let user = User::new("Alice".into(), "alice@example.com".into(), "$2b$04$secret".into());
        let json = serde_json::to_string(&UserDetailResponse::from_user(user, None)).unwrap();

        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"profilePhoto\":null"));
        assert!(json.contains("\"otherWebsites\":[]"));
    }

    #[test]
    fn test_user_response_shape() {
        let user = User::new("Alice".into(), "alice@example.com".into(), "hash".into());
        let response = UserResponse::from_user(&user, Some("https://signed".into()));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], user.id.as_str());
        assert_eq!(json["profilePhoto"], "https://signed");
    }
}
