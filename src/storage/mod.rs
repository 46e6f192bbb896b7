//! 미디어 오브젝트 스토리지 (S3 호환)
//!
//! ```bash
//! S3_BUCKET=social-media-app-ct113h
//! S3_ENDPOINT=http://localhost:4566   # LocalStack / MinIO 사용 시
//! ```

pub mod keys;
pub mod object_storage;

pub use object_storage::ObjectStorage;
