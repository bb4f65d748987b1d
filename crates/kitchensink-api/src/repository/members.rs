//! Member Repository
//!
//! 회원 레코드 관련 데이터베이스 연산을 담당합니다.
//! 스키마는 `scripts/init-db.sql`에서 생성됩니다.

use kitchensink_core::member::{Member, NewMember};
use sqlx::PgPool;
use uuid::Uuid;

/// 이메일 유니크 제약 이름. 중복 등록 감지에 사용됩니다.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "uq_members_email";

/// Member Repository
pub struct MemberRepository;

impl MemberRepository {
    /// 회원 저장.
    ///
    /// `id`는 저장소에서 할당되며, 저장된 레코드를 반환합니다.
    /// 이메일이 중복이면 유니크 제약 위반 에러가 발생합니다.
    pub async fn insert(pool: &PgPool, input: &NewMember) -> Result<Member, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, phone_number)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, phone_number
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone_number)
        .fetch_one(pool)
        .await
    }

    /// ID로 회원 조회.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, phone_number
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 전체 회원 조회 (이름 오름차순).
    pub async fn find_all_ordered_by_name(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, phone_number
            FROM members
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// 전체 회원 삭제.
    ///
    /// 삭제된 레코드 수를 반환합니다.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
