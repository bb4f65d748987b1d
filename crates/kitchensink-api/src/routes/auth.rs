//! 인증 라우트.
//!
//! 로그인 및 토큰 발급 엔드포인트를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `POST /auth/login` - 자격 증명 검증 후 토큰 발급

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::auth::issue_token;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// 사용자 이름
    pub username: String,
    /// 비밀번호
    pub password: String,
}

/// POST /auth/login - 로그인 및 토큰 발급.
///
/// 자격 증명 검증에 성공하면 발급된 토큰 문자열이 응답 본문
/// 전체입니다 (객체로 감싸지 않음). 실패하면 401을 반환하며,
/// 사용자 부재와 비밀번호 불일치는 구분되지 않습니다.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공, 발급된 토큰 문자열 반환", body = String),
        (status = 401, description = "잘못된 자격 증명", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<String> {
    let subject = state
        .identity
        .authenticate(&request.username, &request.password)
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiErrorResponse::simple(
                    "INVALID_CREDENTIALS",
                    "아이디 또는 비밀번호가 올바르지 않습니다",
                )),
            )
        })?;

    let token = issue_token(&subject, &state.auth).map_err(|e| {
        error!(error = %e, "token issuance failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "TOKEN_ISSUE_FAILED",
                "토큰 발급에 실패했습니다",
            )),
        )
    })?;

    info!(username = %subject, "login succeeded, token issued");
    Ok(token)
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}
