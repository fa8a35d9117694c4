//! 실험 기록 관리 서비스 메인 애플리케이션
//!
//! 설정을 읽고 어댑터(MongoDB/Redis 또는 메모리)를 연결한 뒤
//! 서비스 그래프를 조립하여 Actix-web HTTP 서버를 구동합니다.
//! 서명 비밀키가 없으면 어떤 라우트도 제공하지 않고 종료합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use lab_records_service::caching::{InMemoryCache, RedisClient};
use lab_records_service::config::{
    BootstrapAdminConfig, DataConfig, EnvSecretProvider, RateLimitConfig, SecretProvider, ServerConfig, StorageBackend,
};
use lab_records_service::core::{Adapters, AppError, AppState, Clock, ServiceSettings, SystemClock};
use lab_records_service::db::Database;
use lab_records_service::repositories::{
    InMemoryPrincipalStore, InMemoryRecordStore, MongoPrincipalStore, MongoRecordStore,
};
use lab_records_service::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 실험 기록 서비스 시작중...");

    let secrets = EnvSecretProvider;
    if secrets.signing_secret().is_none() {
        error!("JWT_SECRET이 설정되지 않았습니다. 서버를 시작하지 않습니다");
        return Err(io::Error::other("JWT_SECRET is not configured"));
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let adapters = initialize_adapters(clock.clone()).await?;
    let state = AppState::new(&secrets, clock, adapters, ServiceSettings::from_env());

    if !state.tokens.is_operational() {
        return Err(io::Error::other("token service is not operational"));
    }

    if let Some((identifier, secret)) = BootstrapAdminConfig::credentials() {
        state
            .auth
            .ensure_admin(&identifier, &secret)
            .await
            .map_err(|e| io::Error::other(format!("초기 관리자 생성 실패: {}", e)))?;
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 요청 로깅, 경로 정규화 미들웨어를 포함합니다.
/// JSON 본문이나 쿼리 문자열을 해석할 수 없으면 `validation_error`로 응답합니다.
async fn start_http_server(state: AppState) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))

            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    // 로거 초기화 전이므로 결과는 표준 에러로 남김
    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 `info,actix_web=info`를 사용합니다.
///
/// ```bash
/// RUST_LOG=lab_records_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// `STORAGE_BACKEND`에 따라 저장소/캐시 어댑터를 연결합니다
///
/// `mongo`는 MongoDB와 Redis에 연결하고 인덱스를 준비합니다.
/// `memory`는 외부 의존성 없이 프로세스 내 구현을 사용합니다.
async fn initialize_adapters(clock: Arc<dyn Clock>) -> io::Result<Adapters> {
    match DataConfig::storage_backend() {
        StorageBackend::Memory => {
            info!("💾 메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok(Adapters {
                principals: Arc::new(InMemoryPrincipalStore::new()),
                records: Arc::new(InMemoryRecordStore::new()),
                cache: Arc::new(InMemoryCache::new(clock)),
            })
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new()
                .await
                .map_err(|e| io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

            let principals = MongoPrincipalStore::new(&database);
            let records = MongoRecordStore::new(&database);
            principals.create_indexes().await.map_err(io::Error::other)?;
            records.create_indexes().await.map_err(io::Error::other)?;

            let redis_client = RedisClient::new()
                .await
                .map_err(|e| io::Error::other(format!("Redis 연결 실패: {}", e)))?;

            Ok(Adapters {
                principals: Arc::new(principals),
                records: Arc::new(records),
                cache: Arc::new(redis_client),
            })
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버에서의 호출을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:5000")
        .allowed_origin("http://127.0.0.1:5000")

        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
