use std::net::SocketAddr;

use survey_server::config::{establish_connection, AppConfig};
use survey_server::domain::health::init_start_time;
use survey_server::shutdown::shutdown_signal;
use survey_server::utils::auth::JwtAuthenticator;
use survey_server::utils::logging::init_logging;
use survey_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 main이 끝날 때까지 유지)
    let _log_guard = init_logging();
    init_start_time();

    // 3. 설정 및 DB 연결
    let config = AppConfig::from_env()?;
    let db = establish_connection(&config.database_url).await?;

    let state = AppState {
        db,
        authenticator: JwtAuthenticator::shared(config.jwt_secret.clone()),
        config,
    };

    // 4. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    let app = app(state);

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI: http://localhost:{}/swagger-ui", addr.port());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
