//! 요청 게이트.
//!
//! 모든 인바운드 요청에서 Bearer 토큰을 검사하는 미들웨어와,
//! 다운스트림 핸들러가 인증 주체를 조회하는 추출기를 제공합니다.
//!
//! 게이트는 요청을 차단하지 않습니다. 토큰 검증에 성공하면 요청
//! extension에 [`AuthenticatedSubject`]를 붙이고, 실패하면 아무것도
//! 붙이지 않은 채 다음 단계로 전달합니다. 401 응답은 게이트가 아니라
//! 접근 제어 계층([`RequireSubject`])의 책임입니다.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::auth::jwt::verify_token;
use crate::state::AppState;

/// Authorization 헤더의 Bearer 스킴 접두사.
const BEARER_PREFIX: &str = "Bearer ";

/// 인증된 주체.
///
/// 요청 하나의 수명 동안만 존재하며 요청 extension으로 전달됩니다.
/// 전역/ambient 보안 컨텍스트는 사용하지 않습니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    /// 사용자 이름
    pub username: String,
    /// 부여된 권한. 권한 모델이 없으므로 항상 비어 있음
    pub authorities: Vec<String>,
}

impl AuthenticatedSubject {
    /// 권한 없는 주체 생성.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authorities: Vec::new(),
        }
    }
}

/// 인증 게이트 미들웨어.
///
/// 요청당 한 번 실행됩니다:
///
/// - `Authorization` 헤더가 없거나 `"Bearer "`로 시작하지 않으면 아무
///   동작 없이 전달합니다.
/// - 접두사가 일치하면 나머지를 토큰으로 검증하고, 성공 시 주체를
///   extension으로 붙입니다. 단, 이미 주체가 붙어 있으면 재검증하지
///   않습니다 (멱등 재진입 가드).
/// - 검증 실패 사유는 debug 로그로만 남기고 요청은 미인증 상태로
///   계속 진행합니다. 게이트는 어떤 경우에도 파이프라인을 중단하지
///   않습니다.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<AuthenticatedSubject>().is_none() {
        let bearer = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix(BEARER_PREFIX));

        if let Some(token) = bearer {
            match verify_token(token, &state.auth.jwt_secret) {
                Ok(subject) => {
                    request
                        .extensions_mut()
                        .insert(AuthenticatedSubject::new(subject));
                }
                Err(reason) => {
                    debug!(%reason, "bearer token rejected, request continues unauthenticated");
                }
            }
        }
    }

    next.run(request).await
}

/// 현재 주체 조회 추출기.
///
/// `currentSubject() -> string | none` 협력자 인터페이스입니다.
/// 미인증 요청에서는 `None`을 담아 반환하며 절대 실패하지 않습니다.
#[derive(Debug, Clone)]
pub struct CurrentSubject(pub Option<AuthenticatedSubject>);

impl<S> FromRequestParts<S> for CurrentSubject
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSubject(
            parts.extensions.get::<AuthenticatedSubject>().cloned(),
        ))
    }
}

/// 접근 제어 에러.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("인증이 필요합니다")]
    Unauthenticated,
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": "UNAUTHENTICATED",
                "message": self.to_string()
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 인증 주체를 요구하는 추출기.
///
/// 게이트가 주체를 붙이지 않은 요청을 401로 거절하는 접근 제어
/// 계층입니다. 토큰 검증 실패 사유는 이 시점에 이미 소실되어
/// 클라이언트는 구분할 수 없습니다.
#[derive(Debug, Clone)]
pub struct RequireSubject(pub AuthenticatedSubject);

impl<S> FromRequestParts<S> for RequireSubject
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSubject>()
            .cloned()
            .map(RequireSubject)
            .ok_or(AccessError::Unauthenticated)
    }
}
