//! 소셜 미디어 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis, S3 연결을 설정하고 사용자/게시글 REST API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use social_media_backend::caching::redis::RedisClient;
use social_media_backend::config::{CorsConfig, RateLimitConfig, ServerConfig, StorageConfig, UploadConfig};
use social_media_backend::core::registry::ServiceLocator;
use social_media_backend::db::Database;
use social_media_backend::repositories::posts::post_repo::PostRepository;
use social_media_backend::repositories::users::user_repo::UserRepository;
use social_media_backend::routes::configure_all_routes;
use social_media_backend::storage::ObjectStorage;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 소셜 미디어 백엔드 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client, storage) = initialize_data_stores().await?;

    // ServiceLocator에 핵심 인프라 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(storage);

    // 모든 서비스 초기화
    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    ensure_indexes().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 Rate Limit → CORS → Logger → NormalizePath 순서로 적용됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();
    let workers = ServerConfig::workers();

    info!("🌐 서버가 http://{} 에서 실행중입니다 (workers: {})", bind_address, workers);
    info!("📎 업로드 파일 최대 크기: {} bytes", UploadConfig::max_upload_bytes());
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limit 설정이 올바르지 않습니다 (0 값)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();
    info!("🔓 CORS 허용 Origin: {:?}", allowed_origins);

    HttpServer::new(move || {
        let cors = configure_cors(&allowed_origins);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트와 추출기 설정 (multipart 크기는 FormData::read가 제한)
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(workers)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로 남긴다
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] env 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// # 특정 모듈만 debug
/// RUST_LOG=social_media_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB, Redis, S3 연결을 초기화합니다
///
/// 하나라도 실패하면 서버를 띄우지 않고 에러로 종료합니다.
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>, Arc<ObjectStorage>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("❌ MongoDB 연결 실패: {}", e);
        io::Error::other(format!("데이터베이스 연결 실패: {}", e))
    })?;

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("❌ Redis 연결 실패: {}", e);
        io::Error::other(format!("Redis 연결 실패: {}", e))
    })?;

    let storage = ObjectStorage::new(StorageConfig::from_env()).await.map_err(|e| {
        error!("❌ S3 클라이언트 생성 실패: {}", e);
        io::Error::other(format!("S3 클라이언트 생성 실패: {}", e))
    })?;

    Ok((Arc::new(database), Arc::new(redis_client), Arc::new(storage)))
}

/// 컬렉션 인덱스를 보장합니다 (이미 있으면 아무 일도 하지 않음)
async fn ensure_indexes() -> io::Result<()> {
    UserRepository::instance()
        .create_indexes()
        .await
        .map_err(|e| io::Error::other(format!("users 인덱스 생성 실패: {}", e)))?;

    PostRepository::instance()
        .create_indexes()
        .await
        .map_err(|e| io::Error::other(format!("posts 인덱스 생성 실패: {}", e)))?;

    info!("📇 인덱스 확인 완료");
    Ok(())
}

/// CORS 설정을 구성합니다
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(쿠키 등) 지원
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
