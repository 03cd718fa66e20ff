use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,

    // PDF 리포트
    pub pdf_font_dir: String,
    pub pdf_font_family: String,

    /// X-Forwarded-For / X-Real-IP 헤더 신뢰 여부 (리버스 프록시 뒤에서만 켤 것)
    pub trust_proxy_headers: bool,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let pdf_font_dir = env::var("PDF_FONT_DIR").unwrap_or_else(|_| "./fonts".to_string());
        let pdf_font_family =
            env::var("PDF_FONT_FAMILY").unwrap_or_else(|_| "NanumGothic".to_string());

        let trust_proxy_headers = match env::var("TRUST_PROXY_HEADERS") {
            Ok(value) => value
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidFlag("TRUST_PROXY_HEADERS"))?,
            Err(_) => false,
        };

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            pdf_font_dir,
            pdf_font_family,
            trust_proxy_headers,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("{0} must be 'true' or 'false'")]
    InvalidFlag(&'static str),
}
