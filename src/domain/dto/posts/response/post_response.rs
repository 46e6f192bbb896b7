//! 게시글 응답 DTO
//!
//! 저장된 오브젝트 키 대신 presigned URL을 내려주고, 요청자가 작성자인지(`owner`)를
//! 함께 표시합니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::posts::media_type::MediaType;
use crate::domain::entities::posts::post::Post;
use crate::utils::time_utils::to_utc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub creator: CreatorResponse,
    pub owner: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorResponse {
    pub id: String,
    pub name: String,
    pub profile_photo: Option<String>,
}

impl PostResponse {
    /// `media_url`, `creator_photo`는 이미 presign된 URL이어야 한다
    pub fn from_post(
        post: Post,
        media_url: Option<String>,
        creator_photo: Option<String>,
        viewer_id: Option<&str>,
    ) -> Self {
        let owner = viewer_id.is_some_and(|viewer| post.is_created_by(viewer));

        Self {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: post.title,
            text: post.text,
            tags: post.tags,
            media_url,
            media_type: post.media_type,
            created_at: to_utc(post.created_at),
            likes: post.likes,
            creator: CreatorResponse {
                id: post.creator.id,
                name: post.creator.name,
                profile_photo: creator_photo,
            },
            owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::posts::post::PostCreator;
    use mongodb::bson::oid::ObjectId;

    fn post() -> Post {
        let mut post = Post::new(
            "Title".into(),
            "Body".into(),
            vec!["rust".into()],
            PostCreator { id: "user-1".into(), name: "Alice".into() },
        );
        post.id = Some(ObjectId::new());
        post.replace_media("key-photo.png".into(), MediaType::Image);
        post
    }

    #[test]
    fn test_owner_flag() {
        assert!(PostResponse::from_post(post(), None, None, Some("user-1")).owner);
        assert!(!PostResponse::from_post(post(), None, None, Some("user-2")).owner);
        assert!(!PostResponse::from_post(post(), None, None, None).owner);
    }

    #[test]
    fn test_json_uses_signed_urls() {
        let source = post();
        let id = source.id_string().unwrap();
        let response = PostResponse::from_post(
            source,
            Some("https://signed/media".into()),
            Some("https://signed/profile".into()),
            None,
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], id.as_str());
        assert_eq!(json["mediaUrl"], "https://signed/media");
        assert_eq!(json["mediaType"], "IMAGE");
        assert_eq!(json["creator"]["profilePhoto"], "https://signed/profile");
        assert_eq!(json["likes"], 0);
    }
}
