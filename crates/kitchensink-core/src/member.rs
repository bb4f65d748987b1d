//! Member 엔티티.
//!
//! 회원 레코드와 등록 입력 타입을 정의합니다.
//! JSON 직렬화는 camelCase를 사용합니다 (예: `phoneNumber`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 이름은 숫자를 포함할 수 없음
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^0-9]*$").unwrap());

/// 전화번호는 10~12자리 숫자
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,12}$").unwrap());

/// 회원 레코드.
///
/// 저장소에 영속되는 회원 엔티티입니다. `id`는 저장 시 할당됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// 회원 ID (저장소에서 할당)
    pub id: Uuid,
    /// 이름
    pub name: String,
    /// 이메일 주소 (유니크)
    pub email: String,
    /// 전화번호
    pub phone_number: String,
}

/// 회원 등록 입력.
///
/// # 검증 규칙
///
/// - `name`: 1~40자, 숫자 포함 불가
/// - `email`: 유효한 이메일 주소, 비어 있을 수 없음
/// - `phone_number`: 10~12자리 숫자
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    /// 이름
    #[validate(
        length(min = 1, max = 40),
        regex(path = *NAME_RE, message = "Must not contain numbers")
    )]
    pub name: String,
    /// 이메일 주소
    #[validate(length(min = 1), email)]
    pub email: String,
    /// 전화번호
    #[validate(regex(path = *PHONE_RE, message = "Phone number must be between 10 and 12 digits"))]
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewMember {
        NewMember {
            name: "Akhil".to_string(),
            email: "akhil@gmail.com".to_string(),
            phone_number: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_valid_member_passes_validation() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_name_with_digits_rejected() {
        let mut input = valid_input();
        input.name = "Akhil99".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut input = valid_input();
        input.name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_name_over_40_chars_rejected() {
        let mut input = valid_input();
        input.name = "a".repeat(41);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut input = valid_input();
        input.email = "not-an-email".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_email_rejected() {
        let mut input = valid_input();
        input.email = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_short_phone_number_rejected() {
        let mut input = valid_input();
        input.phone_number = "123456789".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_phone_number_with_letters_rejected() {
        let mut input = valid_input();
        input.phone_number = "12345abcde".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_twelve_digit_phone_number_accepted() {
        let mut input = valid_input();
        input.phone_number = "123456789012".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_member_serializes_camel_case() {
        let member = Member {
            id: Uuid::nil(),
            name: "Sample".to_string(),
            email: "sample@gmail.com".to_string(),
            phone_number: "1234567890".to_string(),
        };

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains(r#""phoneNumber":"1234567890""#));
        assert!(!json.contains("phone_number"));
    }
}
