//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 서명 비밀 키와 아이덴티티 스토어는 시작 이후 읽기 전용이므로
//! 락이 필요하지 않습니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kitchensink_core::config::AuthConfig;
use sqlx::PgPool;

use crate::auth::IdentityStore;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL, 미설정 시 회원 기능 비활성화)
    pub db_pool: Option<PgPool>,

    /// 아이덴티티 스토어 - 자격 증명 검증
    pub identity: Arc<IdentityStore>,

    /// 인증 설정 - 서명 비밀 키 및 토큰 TTL
    pub auth: AuthConfig,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(auth: AuthConfig, identity: IdentityStore) -> Self {
        Self {
            db_pool: None,
            identity: Arc::new(identity),
            auth,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 풀 설정.
    #[must_use]
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => sqlx::query("SELECT 1").fetch_one(pool).await.is_ok(),
            None => false,
        }
    }
}

/// 테스트용 AppState 생성.
///
/// 데이터베이스 없이 인증 관련 테스트에 사용할 수 있는 상태를 만듭니다.
/// 아이덴티티 스토어에는 `alice` 계정이 등록되어 있습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    let auth = AuthConfig {
        jwt_secret: "test-secret-key-for-jwt-testing-minimum-32-chars".to_string(),
        token_ttl_secs: 3600,
        users: vec![("alice".to_string(), "alice-password-123".to_string())],
    };
    let identity = IdentityStore::from_config(&auth).expect("테스트 아이덴티티 스토어 생성 실패");

    AppState::new(auth, identity)
}
