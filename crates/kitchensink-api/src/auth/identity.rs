//! 아이덴티티 스토어 및 자격 증명 검증.
//!
//! 토큰 발급의 유일한 신뢰 루트입니다. 설정에서 로드한 계정 목록을
//! 메모리에 보관하며, 시작 이후 읽기 전용입니다.

use std::collections::HashMap;

use kitchensink_core::config::AuthConfig;
use tracing::debug;

use super::password::{hash_password, verify_password};

/// 자격 증명 검증 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 알 수 없는 사용자와 잘못된 비밀번호는 응답에서 구분되지 않습니다
    #[error("아이디 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,
    /// 시작 시 계정 해싱 실패
    #[error("아이덴티티 스토어 초기화 실패: {0}")]
    StoreInit(String),
}

/// 아이덴티티 스토어.
///
/// username → argon2 해시 매핑. 비밀번호는 로드 시점에 해싱되어
/// 평문은 보관하지 않습니다.
#[derive(Debug)]
pub struct IdentityStore {
    users: HashMap<String, String>,
}

impl IdentityStore {
    /// 설정에서 아이덴티티 스토어 구성.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::from_users(&config.users)
    }

    /// (username, 평문 password) 목록에서 스토어 구성.
    pub fn from_users(users: &[(String, String)]) -> Result<Self, AuthError> {
        let mut hashed = HashMap::new();
        for (username, password) in users {
            let hash =
                hash_password(password).map_err(|e| AuthError::StoreInit(e.to_string()))?;
            hashed.insert(username.clone(), hash);
        }
        Ok(Self { users: hashed })
    }

    /// 등록된 계정 수.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// 계정이 하나도 없는지 확인.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// 자격 증명 검증.
    ///
    /// 성공 시 인증된 사용자 이름을 반환합니다. 사용자 부재와
    /// 비밀번호 불일치는 모두 [`AuthError::InvalidCredentials`]로
    /// 수렴합니다 (사용자 열거 방지).
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(hash) = self.users.get(username) else {
            debug!(username, "login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, hash).map_err(|_| {
            debug!(username, "login attempt with wrong password");
            AuthError::InvalidCredentials
        })?;

        Ok(username.to_string())
    }
}
