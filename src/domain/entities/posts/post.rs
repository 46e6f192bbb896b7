//! 게시글 엔티티
//!
//! `posts` 컬렉션에 저장됩니다. 작성자 정보(`creator`)는 작성 시점의 토큰에서
//! 복사한 값이며, 사용자 문서와 조인하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::posts::media_type::MediaType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    pub text: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// 미디어 오브젝트 키
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    pub created_at: DateTime,

    #[serde(default)]
    pub likes: i64,

    pub creator: PostCreator,
}

/// 게시글 작성자 참조
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCreator {
    pub id: String,
    pub name: String,
}

impl Post {
    pub fn new(title: String, text: String, tags: Vec<String>, creator: PostCreator) -> Self {
        Self {
            id: None,
            title,
            text,
            tags,
            media_url: None,
            media_type: None,
            created_at: DateTime::now(),
            likes: 0,
            creator,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.creator.id == user_id
    }

    /// 미디어를 교체하고 이전 키를 돌려줍니다.
    pub fn replace_media(&mut self, key: String, media_type: MediaType) -> Option<String> {
        self.media_type = Some(media_type);
        self.media_url.replace(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn creator() -> PostCreator {
        PostCreator { id: "user-1".into(), name: "Alice".into() }
    }

    #[test]
    fn test_new_post_starts_without_likes_or_media() {
        let post = Post::new("Title".into(), "Body".into(), vec!["rust".into()], creator());

        assert!(post.id.is_none());
        assert_eq!(post.likes, 0);
        assert!(post.media_url.is_none());
        assert!(post.is_created_by("user-1"));
        assert!(!post.is_created_by("user-2"));
    }

    #[test]
    fn test_replace_media_returns_previous_key() {
        let mut post = Post::new("T".into(), "B".into(), vec![], creator());

        assert_eq!(post.replace_media("a-photo.png".into(), MediaType::Image), None);
        assert_eq!(
            post.replace_media("b-clip.mp4".into(), MediaType::Video),
            Some("a-photo.png".to_string())
        );
        assert_eq!(post.media_type, Some(MediaType::Video));
    }

    #[test]
    fn test_bson_layout() {
        let post = Post::new("T".into(), "B".into(), vec![], creator());
        let document = bson::to_document(&post).unwrap();

        assert!(!document.contains_key("_id"));
        assert!(document.contains_key("createdAt"));
        assert_eq!(document.get_document("creator").unwrap().get_str("id").unwrap(), "user-1");
    }
}
