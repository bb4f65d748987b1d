//! 회원 관리 라우트.
//!
//! 회원 레코드에 대한 저장소 pass-through 엔드포인트를 제공합니다.
//! 모든 엔드포인트는 인증 주체를 요구합니다 ([`RequireSubject`]).
//!
//! # 엔드포인트
//!
//! - `POST /members` - 회원 등록
//! - `GET /members` - 전체 회원 조회 (이름 오름차순)
//! - `GET /members/{id}` - ID로 회원 조회
//! - `DELETE /members` - 전체 회원 삭제 (테스트 용도)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use kitchensink_core::member::{Member, NewMember};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireSubject;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::repository::members::EMAIL_UNIQUE_CONSTRAINT;
use crate::repository::MemberRepository;
use crate::state::AppState;

/// POST /members - 회원 등록.
#[utoipa::path(
    post,
    path = "/members",
    request_body = NewMember,
    responses(
        (status = 200, description = "등록된 회원", body = Member),
        (status = 400, description = "입력값 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 필요"),
        (status = 409, description = "이미 등록된 이메일", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "members"
)]
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    RequireSubject(_subject): RequireSubject,
    Json(input): Json<NewMember>,
) -> ApiResult<Json<Member>> {
    if let Err(errors) = input.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::with_details(
                "VALIDATION_ERROR",
                "입력값이 유효하지 않습니다",
                serde_json::to_value(&errors).unwrap_or_default(),
            )),
        ));
    }

    info!(name = %input.name, "Registering member");

    let pool = state.db_pool.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "DB_UNAVAILABLE",
                "Database not available",
            )),
        )
    })?;

    let member = MemberRepository::insert(pool, &input).await.map_err(|e| {
        if e.to_string().contains(EMAIL_UNIQUE_CONSTRAINT) {
            (
                StatusCode::CONFLICT,
                Json(ApiErrorResponse::simple(
                    "EMAIL_EXISTS",
                    "이미 등록된 이메일입니다",
                )),
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::simple(
                    "DB_ERROR",
                    format!("회원 등록 실패: {}", e),
                )),
            )
        }
    })?;

    info!(id = %member.id, "Member registered");
    Ok(Json(member))
}

/// GET /members - 전체 회원 조회 (이름 오름차순).
#[utoipa::path(
    get,
    path = "/members",
    responses(
        (status = 200, description = "회원 목록", body = [Member]),
        (status = 401, description = "인증 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "members"
)]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    RequireSubject(_subject): RequireSubject,
) -> ApiResult<Json<Vec<Member>>> {
    info!("Listing all members");

    let pool = state.db_pool.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "DB_UNAVAILABLE",
                "Database not available",
            )),
        )
    })?;

    let members = MemberRepository::find_all_ordered_by_name(pool)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::simple(
                    "DB_ERROR",
                    format!("회원 조회 실패: {}", e),
                )),
            )
        })?;

    Ok(Json(members))
}

/// GET /members/{id} - ID로 회원 조회.
///
/// UUID 형식이 아닌 id는 존재하지 않는 회원과 동일하게 404로 처리합니다.
#[utoipa::path(
    get,
    path = "/members/{id}",
    params(("id" = String, Path, description = "회원 ID")),
    responses(
        (status = 200, description = "조회된 회원", body = Member),
        (status = 401, description = "인증 필요"),
        (status = 404, description = "회원 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "members"
)]
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    RequireSubject(_subject): RequireSubject,
    Path(id): Path<String>,
) -> ApiResult<Json<Member>> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse::simple(
                "MEMBER_NOT_FOUND",
                format!("회원을 찾을 수 없습니다: {}", id),
            )),
        )
    };

    let Ok(member_id) = Uuid::parse_str(&id) else {
        info!(%id, "Member not found (not a valid id)");
        return Err(not_found());
    };

    let pool = state.db_pool.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "DB_UNAVAILABLE",
                "Database not available",
            )),
        )
    })?;

    let member = MemberRepository::find_by_id(pool, member_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::simple(
                    "DB_ERROR",
                    format!("회원 조회 실패: {}", e),
                )),
            )
        })?
        .ok_or_else(|| {
            info!(%id, "Member not found");
            not_found()
        })?;

    info!(id = %member.id, "Retrieved member");
    Ok(Json(member))
}

/// DELETE /members - 전체 회원 삭제.
///
/// 테스트 용도로만 사용합니다.
#[utoipa::path(
    delete,
    path = "/members",
    responses(
        (status = 200, description = "전체 삭제 완료"),
        (status = 401, description = "인증 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "members"
)]
pub async fn delete_all_members(
    State(state): State<Arc<AppState>>,
    RequireSubject(_subject): RequireSubject,
) -> ApiResult<StatusCode> {
    let pool = state.db_pool.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "DB_UNAVAILABLE",
                "Database not available",
            )),
        )
    })?;

    let deleted = MemberRepository::delete_all(pool).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::simple(
                "DB_ERROR",
                format!("회원 삭제 실패: {}", e),
            )),
        )
    })?;

    warn!(deleted, "All members deleted");
    Ok(StatusCode::OK)
}

/// 회원 라우터 생성.
pub fn members_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_members)
                .post(register_member)
                .delete(delete_all_members),
        )
        .route("/{id}", get(get_member))
}
