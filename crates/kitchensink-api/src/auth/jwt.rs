//! JWT 토큰 코덱.
//!
//! 서명된 토큰의 발급 및 검증 로직.
//!
//! 토큰은 compact JWS 형식(점으로 구분된 base64url 세그먼트 3개)이며
//! 프로세스 전역 비밀 키로 HMAC-SHA256 서명됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kitchensink_core::config::AuthConfig;
use serde::{Deserialize, Serialize};

/// JWT 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `subject` - 사용자 이름
    /// * `ttl_secs` - 만료 시간 (초)
    pub fn new(subject: impl Into<String>, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// 토큰 검증 에러.
///
/// 게이트에서는 모든 변형이 "미인증"으로 수렴하며 클라이언트에
/// 구분되어 노출되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("토큰 형식이 잘못되었습니다")]
    Malformed,
    #[error("토큰 서명이 유효하지 않습니다")]
    SignatureInvalid,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("subject 클레임이 비어 있습니다")]
    MissingSubject,
}

/// 토큰 발급.
///
/// `iat = 현재 시각`, `exp = 현재 시각 + TTL`로 서명된 토큰을 생성합니다.
///
/// # Arguments
///
/// * `subject` - 토큰에 바인딩할 사용자 이름
/// * `config` - 서명 비밀 키와 TTL
pub fn issue_token(subject: &str, config: &AuthConfig) -> Result<String, TokenError> {
    let claims = Claims::new(subject, config.token_ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(TokenError::from)
}

/// 토큰 검증.
///
/// 서명을 재계산해 대조하고 만료 여부를 확인한 뒤, 토큰에 포함된
/// subject를 반환합니다. subject는 아이덴티티 스토어와 재대조하지
/// 않습니다. 한번 서명된 토큰은 유효 기간 동안 그 자체로 권위를
/// 가집니다 (무상태 토큰이므로 서버 측 폐기 수단이 없습니다).
///
/// 만료 판정은 검증 시점의 벽시계 기준이며 시계 오차 보정(leeway)은
/// 적용하지 않습니다.
///
/// # Errors
///
/// - [`TokenError::Expired`] - `exp`가 과거인 경우 (서명 유효 여부와 무관)
/// - [`TokenError::SignatureInvalid`] - 서명 불일치
/// - [`TokenError::Malformed`] - 구조적 디코딩 실패 (`sub` 클레임 부재 포함)
/// - [`TokenError::MissingSubject`] - 서명은 유효하나 subject가 공백인 경우
pub fn verify_token(token: &str, secret: &str) -> Result<String, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })?;

    if data.claims.sub.trim().is_empty() {
        return Err(TokenError::MissingSubject);
    }

    Ok(data.claims.sub)
}
