//! 캐싱 계층 모듈
//!
//! Redis 기반 read-through 캐시를 제공합니다. 리포지토리가 조회 결과를 JSON으로
//! 저장하고, 쓰기 작업 후에는 해당 키를 무효화합니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
