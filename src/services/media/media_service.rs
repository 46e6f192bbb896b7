//! 미디어 업로드/삭제 서비스
//!
//! 게시글 첨부 파일과 프로필 사진을 오브젝트 스토리지에 올리고, 조회 응답에 쓸
//! presigned URL을 만듭니다. URL 생성 실패는 응답 전체를 실패시키지 않고
//! 경고 로그와 함께 `None`으로 처리합니다.

use std::sync::Arc;
use log::{debug, warn};
use singleton_macro::service;
use crate::{
    domain::entities::posts::media_type::MediaType,
    domain::models::media::uploaded_file::UploadedFile,
    storage::keys::{post_media_key, profile_photo_key},
    storage::ObjectStorage,
};
use crate::errors::errors::AppError;

#[service(name="media")]
pub struct MediaService {
    storage: Arc<ObjectStorage>,
}

impl MediaService {
    /// 게시글 미디어를 저장하고 `(오브젝트 키, 미디어 종류)`를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이미지/영상이 아닌 파일
    /// * `AppError::StorageError` - 업로드 실패
    pub async fn store_post_media(&self, file: UploadedFile) -> Result<(String, MediaType), AppError> {
        let media_type = classify_post_media(&file.content_type)?;
        let key = post_media_key(&file.file_name);

        self.storage
            .put_object(&key, file.bytes, &file.content_type)
            .await?;

        Ok((key, media_type))
    }

    /// 프로필 사진을 `{userId}-profile` 키로 저장합니다. 기존 사진은 덮어씁니다.
    pub async fn store_profile_photo(&self, user_id: &str, file: UploadedFile) -> Result<String, AppError> {
        if MediaType::from_content_type(&file.content_type) != Some(MediaType::Image) {
            return Err(AppError::ValidationError(
                "profilePhoto must be an image".to_string(),
            ));
        }

        let key = profile_photo_key(user_id);
        self.storage
            .put_object(&key, file.bytes, &file.content_type)
            .await?;

        Ok(key)
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.storage.delete_object(key).await
    }

    /// 정리 작업용 삭제. 실패해도 호출자의 흐름을 멈추지 않습니다.
    pub async fn delete_quietly(&self, key: &str) {
        if let Err(e) = self.storage.delete_object(key).await {
            warn!("⚠️ 미디어 삭제 실패 (무시): {} - {}", key, e);
        }
    }

    pub async fn presigned_url(&self, key: &str) -> Option<String> {
        match self.storage.presigned_get_url(key).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("⚠️ presigned URL 생성 실패: {} - {}", key, e);
                None
            }
        }
    }

    pub async fn presigned_opt(&self, key: Option<&str>) -> Option<String> {
        match key {
            Some(key) => self.presigned_url(key).await,
            None => None,
        }
    }

    /// 게시글 작성자의 프로필 사진 URL
    ///
    /// 게시글에는 작성자의 사진 키가 없으므로 키 규칙으로 만든 URL을 돌려줍니다.
    /// 사진이 없는 사용자라면 URL은 만들어지지만 실제 요청 시 404가 됩니다.
    pub async fn presigned_profile_photo(&self, user_id: &str) -> Option<String> {
        debug!("작성자 프로필 사진 URL 생성: {}", user_id);
        self.presigned_url(&profile_photo_key(user_id)).await
    }
}

fn classify_post_media(content_type: &str) -> Result<MediaType, AppError> {
    MediaType::from_content_type(content_type).ok_or_else(|| {
        AppError::ValidationError(format!(
            "Unsupported media type '{}': only images and videos are allowed",
            content_type
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_post_media() {
        assert_eq!(classify_post_media("image/webp").unwrap(), MediaType::Image);
        assert_eq!(classify_post_media("video/quicktime").unwrap(), MediaType::Video);

        match classify_post_media("application/zip") {
            Err(AppError::ValidationError(message)) => {
                assert!(message.contains("application/zip"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
