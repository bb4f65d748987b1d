//! 설정 관리.
//!
//! 모든 설정은 환경변수에서 로드되며, 설정되지 않은 값은
//! 개발용 기본값으로 대체됩니다. 보안에 민감한 기본값이 사용되면
//! 경고 로그를 남깁니다.

use thiserror::Error;
use tracing::warn;

/// 개발용 기본 서명 비밀 키. 운영 환경에서는 반드시 JWT_SECRET으로 교체해야 합니다.
const DEFAULT_JWT_SECRET: &str = "34EB54AFB81F2411CFE4A62ED1ACB";

/// 개발용 기본 계정 (username:password).
const DEFAULT_AUTH_USERS: &str = "user:password";

/// 설정 로드 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// AUTH_USERS 항목 형식 오류
    #[error("AUTH_USERS 항목 형식이 잘못되었습니다: {0:?} (username:password 형식이어야 합니다)")]
    InvalidUserEntry(String),
}

/// 애플리케이션 설정.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 환경변수에서 전체 설정 로드.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }
}

/// 서버 설정.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 환경변수에서 설정 로드 (API_HOST, API_PORT).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 연결 URL (미설정 시 데이터베이스 기능 비활성화)
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// 환경변수에서 설정 로드 (DATABASE_URL, DB_MAX_CONNECTIONS, DB_ACQUIRE_TIMEOUT_SECS).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
        }
    }
}

/// 인증 설정.
///
/// 서명 비밀 키와 토큰 TTL은 프로세스 전역 설정이며 시작 후 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키 (HMAC-SHA256)
    pub jwt_secret: String,
    /// 토큰 유효 기간 (초)
    pub token_ttl_secs: i64,
    /// 아이덴티티 스토어 계정 목록 (username, 평문 password)
    ///
    /// 비밀번호는 시작 시 아이덴티티 스토어가 해싱하여 보관합니다.
    pub users: Vec<(String, String)>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            users: vec![("user".to_string(), "password".to_string())],
        }
    }
}

impl AuthConfig {
    /// 환경변수에서 설정 로드 (JWT_SECRET, TOKEN_TTL_SECS, AUTH_USERS).
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (INSECURE for development only)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let users_spec = std::env::var("AUTH_USERS").unwrap_or_else(|_| {
            warn!("AUTH_USERS not set, using default account (INSECURE for development only)");
            DEFAULT_AUTH_USERS.to_string()
        });
        let users = parse_users(&users_spec)?;

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
            users,
        })
    }
}

/// AUTH_USERS 형식 파싱.
///
/// `username:password` 쌍을 `;`로 구분합니다.
/// 예: `alice:secret1;bob:secret2`
pub fn parse_users(spec: &str) -> Result<Vec<(String, String)>, ConfigError> {
    spec.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (username, password) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidUserEntry(entry.to_string()))?;
            if username.is_empty() || password.is_empty() {
                return Err(ConfigError::InvalidUserEntry(entry.to_string()));
            }
            Ok((username.to_string(), password.to_string()))
        })
        .collect()
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 로그 레벨 (예: "info", "debug", "kitchensink_api=debug")
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// 환경변수에서 설정 로드 (LOG_LEVEL, LOG_FORMAT).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: std::env::var("LOG_FORMAT").unwrap_or(defaults.format),
        }
    }
}
