//! 사용자 엔티티
//!
//! `users` 컬렉션에 저장되는 문서입니다. `_id`는 ObjectId가 아닌 UUID v4 문자열이며,
//! 필드명은 camelCase로 저장됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::entities::users::address::Address;

/// 기본 역할
pub const ROLE_USER: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    pub email: String,

    /// bcrypt 해시. 평문 비밀번호는 어디에도 저장하지 않습니다.
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// `YYYY-MM-DD` 형식. 문자열 비교로 범위 검색합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default)]
    pub other_websites: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default)]
    pub roles: Vec<String>,

    /// 프로필 사진의 오브젝트 키 (`{id}-profile`). URL이 아님.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자를 만듭니다. id는 즉시 발급되어 프로필 사진 키에 사용할 수 있습니다.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password: password_hash,
            gender: None,
            date_of_birth: None,
            other_websites: Vec::new(),
            address: None,
            roles: vec![ROLE_USER.to_string()],
            profile_photo: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}
