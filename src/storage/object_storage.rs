//! S3 호환 오브젝트 스토리지 클라이언트
//!
//! 게시글 미디어와 프로필 사진을 하나의 버킷에 저장합니다. 객체는 비공개로 두고
//! 클라이언트에는 만료 시간이 있는 presigned GET URL만 내려줍니다.

use std::time::Duration;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use log::{debug, info};
use crate::config::StorageConfig;
use crate::errors::errors::AppError;

/// 단일 버킷에 대한 S3 클라이언트 래퍼
///
/// `Database`, `RedisClient`와 마찬가지로 main에서 한 번 생성하여
/// `ServiceLocator::set`으로 등록합니다.
#[derive(Clone)]
pub struct ObjectStorage {
    client: Client,
    bucket: String,
    presign_expiry: Duration,
}

impl ObjectStorage {
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        // 키가 둘 다 있을 때만 정적 자격 증명을 쓰고, 아니면 기본 자격 증명 체인
        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "social_media_static",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style())
            .build();

        info!(
            "✅ S3 클라이언트 준비 완료: bucket={}, region={}, endpoint={}",
            config.bucket,
            config.region,
            config.endpoint.as_deref().unwrap_or("aws")
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            presign_expiry: config.presign_expiry,
        })
    }

    pub async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                AppError::StorageError(format!("업로드 실패 ({}): {}", key, DisplayErrorContext(&e)))
            })?;

        debug!("📤 S3 업로드: {} ({} bytes, {})", key, size, content_type);
        Ok(())
    }

    /// 객체를 삭제합니다. S3는 존재하지 않는 키 삭제도 성공으로 응답합니다.
    pub async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::StorageError(format!("삭제 실패 ({}): {}", key, DisplayErrorContext(&e)))
            })?;

        debug!("🗑️ S3 삭제: {}", key);
        Ok(())
    }

    /// 설정된 만료 시간 동안 유효한 GET URL을 생성합니다.
    pub async fn presigned_get_url(&self, key: &str) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(self.presign_expiry)
            .map_err(|e| AppError::StorageError(format!("presign 설정 오류: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::StorageError(format!("presign 실패 ({}): {}", key, DisplayErrorContext(&e)))
            })?;

        Ok(request.uri().to_string())
    }
}
