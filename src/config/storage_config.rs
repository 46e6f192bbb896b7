//! 오브젝트 스토리지(S3 호환) 설정
//!
//! AWS S3를 기본으로 하며, `S3_ENDPOINT`를 지정하면 MinIO/LocalStack 같은
//! S3 호환 스토리지를 path-style 주소로 사용합니다.
//!
//! ```bash
//! export S3_BUCKET="social-media-app-ct113h"
//! export AWS_REGION="ap-southeast-2"
//! export S3_ENDPOINT="http://localhost:4566"     # 선택
//! export AWS_ACCESS_KEY_ID="..."                  # 선택, 없으면 기본 자격 증명 체인
//! export AWS_SECRET_ACCESS_KEY="..."
//! export S3_PRESIGN_EXPIRY_SECS=3600
//! ```

use std::env;
use std::time::Duration;

/// S3 접속 정보 묶음
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub presign_expiry: Duration,
}

impl StorageConfig {
    pub const DEFAULT_BUCKET: &'static str = "social-media-app-ct113h";
    pub const DEFAULT_REGION: &'static str = "ap-southeast-2";
    pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

    pub fn from_env() -> Self {
        Self {
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| Self::DEFAULT_BUCKET.to_string()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| Self::DEFAULT_REGION.to_string()),
            endpoint: non_empty_var("S3_ENDPOINT"),
            access_key_id: non_empty_var("AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
            presign_expiry: Duration::from_secs(
                env::var("S3_PRESIGN_EXPIRY_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|s: &u64| *s > 0)
                    .unwrap_or(Self::DEFAULT_PRESIGN_EXPIRY_SECS),
            ),
        }
    }

    /// 커스텀 엔드포인트를 쓰면 버킷을 경로에 포함하는 방식으로 접근한다
    pub fn force_path_style(&self) -> bool {
        self.endpoint.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
