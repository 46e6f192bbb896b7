//! JWT 인증 설정
//!
//! ```bash
//! export JWT_SECRET="change-me"
//! export JWT_EXPIRATION_HOURS=24
//! ```

use std::env;

/// JWT 서명 및 만료 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명 키.
    ///
    /// 운영 환경에서는 반드시 `JWT_SECRET`을 설정해야 합니다. 미설정 시 경고 로그와
    /// 함께 개발용 기본 키를 사용합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// 액세스 토큰 유효 시간 (시간 단위, 기본 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|h: &i64| *h > 0)
            .unwrap_or(24)
    }
}
