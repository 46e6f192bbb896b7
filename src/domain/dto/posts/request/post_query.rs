use serde::Deserialize;
use crate::utils::string_utils::deserialize_optional_string;

/// `GET /posts?page=&size=&searchCriteria=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search_criteria: Option<String>,
}

/// `GET /posts/search?keyword=&page=&size=`
#[derive(Debug, Clone, Deserialize)]
pub struct PostSearchQuery {
    pub keyword: String,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// `GET /posts/ownership?postId=&userId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipQuery {
    pub post_id: String,
    pub user_id: String,
}

/// `DELETE /posts/creator/delete?creatorId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorQuery {
    pub creator_id: String,
}

/// 작성자별 목록의 선택적 페이지 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}
