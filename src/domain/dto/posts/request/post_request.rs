//! 게시글 작성/수정 요청 (multipart/form-data)
//!
//! `title`, `text`는 필수이고 `tags`는 반복 필드 또는 콤마 구분 문자열로 받습니다.
//! 첨부 파일(`mediaFile`)은 핸들러에서 따로 꺼냅니다.

use validator::Validate;
use crate::errors::errors::AppError;
use crate::utils::multipart::FormData;
use crate::utils::string_utils::split_list;

#[derive(Debug, Clone, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,

    /// 입력 순서대로, 중복 포함
    pub tags: Vec<String>,
}

impl PostRequest {
    pub fn from_form(form: &FormData) -> Result<Self, AppError> {
        let request = Self {
            title: form.required_text("title")?,
            text: form.required_text("text")?,
            tags: split_list(form.texts("tags")),
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_split_and_trimmed() {
        let mut form = FormData::default();
        form.insert_text("title", "Hello");
        form.insert_text("text", "World");
        form.insert_text("tags", " rust , ,actix");
        form.insert_text("tags", "mongo,rust");

        let request = PostRequest::from_form(&form).unwrap();
        assert_eq!(request.tags, vec!["rust", "actix", "mongo", "rust"]);
    }

    #[test]
    fn test_title_and_text_required() {
        let mut form = FormData::default();
        form.insert_text("title", "Hello");
        assert!(matches!(PostRequest::from_form(&form), Err(AppError::ValidationError(_))));

        form.insert_text("text", "   ");
        assert!(PostRequest::from_form(&form).is_err());
    }

    #[test]
    fn test_long_title_and_many_tags_are_kept() {
        let mut form = FormData::default();
        form.insert_text("title", "t".repeat(500));
        form.insert_text("text", "b");
        let tags: Vec<String> = (0..50).map(|i| format!("t{}", i)).collect();
        form.insert_text("tags", tags.join(","));

        let request = PostRequest::from_form(&form).unwrap();
        assert_eq!(request.title.len(), 500);
        assert_eq!(request.tags.len(), 50);
    }
}
