//! 요청 처리 과정에서 쓰이는 비영속 모델 (인증 정보, 토큰 클레임, 업로드 파일)

pub mod auth;
pub mod media;
pub mod token;
