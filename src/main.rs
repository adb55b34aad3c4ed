//! 게임 커뮤니티 백엔드 메인 애플리케이션
//!
//! 설정을 읽고 MongoDB/Redis 연결과 서비스 레지스트리를 준비한 뒤 Actix-web 서버를 띄웁니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use game_social_backend::caching::redis::RedisClient;
use game_social_backend::config::{AuthSettings, CorsConfig, RateLimitConfig, ServerConfig};
use game_social_backend::core::registry::ServiceLocator;
use game_social_backend::db::Database;
use game_social_backend::repositories::comments::CommentRepository;
use game_social_backend::repositories::follows::UserFollowRepository;
use game_social_backend::repositories::posts::PostRepository;
use game_social_backend::repositories::rankings::GameRankingRepository;
use game_social_backend::repositories::users::UserRepository;
use game_social_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 게임 커뮤니티 백엔드 시작중...");

    // 시크릿이 없으면 여기서 멈춘다
    let settings = AuthSettings::from_env().map_err(|e| {
        error!("인증 설정 로드 실패: {}", e);
        io::Error::other(e.to_string())
    })?;
    ServiceLocator::set(Arc::new(settings));

    let (database, redis_client) = initialize_data_stores().await?;
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all().await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    ensure_indexes().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

async fn start_http_server() -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api", bind_address);

    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("rate limit 설정이 올바르지 않습니다 (0 값)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();
    info!("CORS 허용 origin: {:?}", allowed_origins);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// PROFILE 환경변수에 따라 `.env.prod` / `.env.dev` / `.env` 를 로드합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 기본값: `info,actix_web=info`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("MongoDB 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;
    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("Redis 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;
    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 컬렉션 인덱스 생성. email/팔로우 쌍 unique 인덱스가 중복 가입·중복 팔로우를 막습니다.
async fn ensure_indexes() -> io::Result<()> {
    let results = [
        ("users", UserRepository::instance().create_indexes().await),
        ("posts", PostRepository::instance().create_indexes().await),
        ("comments", CommentRepository::instance().create_indexes().await),
        ("user_follows", UserFollowRepository::instance().create_indexes().await),
        ("game_rankings", GameRankingRepository::instance().create_indexes().await),
    ];

    for (collection, result) in results {
        if let Err(e) = result {
            error!("{} 인덱스 생성 실패: {}", collection, e);
            return Err(io::Error::other(e.to_string()));
        }
        info!("인덱스 확인: {}", collection);
    }
    Ok(())
}

fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
