//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/auth/login` - 로그인 및 토큰 발급
//! - `/members` - 회원 관리 (인증 필요)

pub mod auth;
pub mod health;
pub mod members;

pub use auth::{auth_router, LoginRequest};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use members::members_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
/// 인증 게이트 미들웨어는 호출 측에서 레이어로 적용합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/members", members_router())
}
