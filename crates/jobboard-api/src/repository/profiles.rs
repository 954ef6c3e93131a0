//! Profile Repository
//!
//! 구직자 프로필과 보유 기술 목록을 관리합니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 프로필 레코드
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub years_experience: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// 보유 기술 레코드
#[derive(Debug, Clone, FromRow)]
pub struct SkillRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub level: Option<String>,
}

/// 프로필 입력
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub years_experience: Option<i32>,
}

/// 기술 입력
#[derive(Debug, Clone)]
pub struct SkillInput {
    pub name: String,
    pub level: Option<String>,
}

// ================================================================================================
// Repository
// ================================================================================================

/// Profile Repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// 프로필 조회
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProfileRecord>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// 보유 기술 목록, 이름 순
    pub async fn list_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkillRecord>, sqlx::Error> {
        sqlx::query_as::<_, SkillRecord>(
            "SELECT * FROM user_skills WHERE user_id = $1 ORDER BY LOWER(name)",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// 프로필 upsert + 기술 목록 교체 (단일 트랜잭션)
    ///
    /// 기술 이름 중복은 호출자가 제거해서 넘겨야 합니다.
    pub async fn upsert_with_skills(
        pool: &PgPool,
        user_id: Uuid,
        profile: &ProfileInput,
        skills: &[SkillInput],
    ) -> Result<(ProfileRecord, Vec<SkillRecord>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            INSERT INTO user_profiles
                (user_id, headline, bio, location, phone, resume_url, years_experience)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                headline = EXCLUDED.headline,
                bio = EXCLUDED.bio,
                location = EXCLUDED.location,
                phone = EXCLUDED.phone,
                resume_url = EXCLUDED.resume_url,
                years_experience = EXCLUDED.years_experience,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&profile.headline)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(&profile.phone)
        .bind(&profile.resume_url)
        .bind(profile.years_experience)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut saved = Vec::with_capacity(skills.len());
        for skill in skills {
            let row = sqlx::query_as::<_, SkillRecord>(
                "INSERT INTO user_skills (user_id, name, level) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(user_id)
            .bind(&skill.name)
            .bind(&skill.level)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(row);
        }

        tx.commit().await?;

        saved.sort_by_key(|s| s.name.to_lowercase());
        Ok((record, saved))
    }
}
