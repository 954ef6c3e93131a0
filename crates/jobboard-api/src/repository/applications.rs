//! Application Repository
//!
//! 지원서와 지원 이력(이벤트)을 관리합니다.
//!
//! 상태를 바꾸는 연산(지원, 철회, 기업 상태 변경)은 지원서 행과 이벤트 행을
//! 하나의 트랜잭션으로 기록합니다. 이벤트는 추가만 하고 수정하지 않습니다.

use chrono::{DateTime, Utc};
use jobboard_core::{ApplicationEventType, ApplicationStatus, CoreError};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 지원서 레코드 (공고 요약 + 지원자 정보 포함)
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub step: i32,
    pub cover_letter: Option<String>,
    pub next_interview_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: String,
    pub job_slug: String,
    pub job_location: Option<String>,
    pub job_status: String,
    pub employer_id: Uuid,
    pub company_name: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: String,
}

impl ApplicationRecord {
    pub fn status(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::parse(&self.status)
    }
}

/// 지원 이력 레코드
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationEventRecord {
    pub id: Uuid,
    pub application_id: Uuid,
    pub actor_id: Option<Uuid>,
    pub event_type: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 기업 측 상태 변경 입력
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    /// 미지정 시 상태별 기본 단계
    pub step: Option<i32>,
    pub message: Option<String>,
    pub next_interview_at: Option<DateTime<Utc>>,
}

/// 상태 전이 결과
#[derive(Debug)]
pub enum TransitionOutcome {
    /// 변경됨
    Updated,
    /// 대상이 없거나 소유하지 않음
    NotFound,
    /// 현재 상태에서 허용되지 않는 전이 (`CoreError::InvalidTransition`)
    Rejected(CoreError),
}

/// 기업 화면 목록 필터
#[derive(Debug, Clone, Default)]
pub struct EmployerApplicationFilter {
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

const APPLICATION_SELECT: &str = r#"
    SELECT a.*,
           j.title AS job_title,
           j.slug AS job_slug,
           j.location AS job_location,
           j.status AS job_status,
           j.employer_id,
           e.company_name,
           c.name AS candidate_name,
           c.email AS candidate_email
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN users e ON e.id = j.employer_id
    JOIN users c ON c.id = a.candidate_id
"#;

async fn insert_event(
    tx: &mut Transaction<'_, Postgres>,
    application_id: Uuid,
    actor_id: Uuid,
    event_type: ApplicationEventType,
    from: Option<ApplicationStatus>,
    to: Option<ApplicationStatus>,
    message: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO application_events
            (application_id, actor_id, event_type, from_status, to_status, message)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(application_id)
    .bind(actor_id)
    .bind(event_type.as_str())
    .bind(from.map(|s| s.as_str()))
    .bind(to.map(|s| s.as_str()))
    .bind(message)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// ================================================================================================
// Repository
// ================================================================================================

/// Application Repository
pub struct ApplicationRepository;

impl ApplicationRepository {
    // ==================== 구직자 ====================

    /// 해당 공고에 지원했는지 여부
    pub async fn exists(pool: &PgPool, job_id: Uuid, candidate_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND candidate_id = $2)",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(pool)
        .await
    }

    /// 지원서 생성 + `applied` 이벤트 기록
    ///
    /// 같은 공고에 다시 지원하면 unique 제약 위반 에러를 반환합니다.
    pub async fn create_with_event(
        pool: &PgPool,
        job_id: Uuid,
        candidate_id: Uuid,
        cover_letter: Option<&str>,
    ) -> Result<Uuid, sqlx::Error> {
        let status = ApplicationStatus::Applied;
        let mut tx = pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO applications (job_id, candidate_id, status, step, cover_letter)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(status.as_str())
        .bind(status.default_step())
        .bind(cover_letter)
        .fetch_one(&mut *tx)
        .await?;

        insert_event(
            &mut tx,
            id,
            candidate_id,
            ApplicationEventType::Applied,
            None,
            Some(status),
            None,
        )
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    /// 구직자의 지원서 목록, 최신 순
    pub async fn list_for_candidate(
        pool: &PgPool,
        candidate_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "{} WHERE a.candidate_id = $1 ORDER BY a.created_at DESC",
            APPLICATION_SELECT
        ))
        .bind(candidate_id)
        .fetch_all(pool)
        .await
    }

    /// 구직자 소유 지원서 조회
    pub async fn find_for_candidate(
        pool: &PgPool,
        id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Option<ApplicationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "{} WHERE a.id = $1 AND a.candidate_id = $2",
            APPLICATION_SELECT
        ))
        .bind(id)
        .bind(candidate_id)
        .fetch_optional(pool)
        .await
    }

    /// 지원 철회
    ///
    /// 행을 잠근 뒤 현재 상태가 종료 상태가 아닐 때만 `withdrawn`으로 바꾸고
    /// `status_change` 이벤트를 남깁니다.
    pub async fn withdraw(
        pool: &PgPool,
        id: Uuid,
        candidate_id: Uuid,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<String> = sqlx::query_scalar(
            "SELECT status FROM applications WHERE id = $1 AND candidate_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(TransitionOutcome::NotFound);
        };
        let from = ApplicationStatus::parse(&current).unwrap_or(ApplicationStatus::Applied);
        let to = match from.transition_to(ApplicationStatus::Withdrawn) {
            Ok(to) => to,
            Err(e) => return Ok(TransitionOutcome::Rejected(e)),
        };

        sqlx::query("UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(to.as_str())
            .execute(&mut *tx)
            .await?;

        insert_event(
            &mut tx,
            id,
            candidate_id,
            ApplicationEventType::StatusChange,
            Some(from),
            Some(to),
            None,
        )
        .await?;

        tx.commit().await?;
        Ok(TransitionOutcome::Updated)
    }

    /// 지원 이력, 오래된 순
    pub async fn list_events(
        pool: &PgPool,
        application_id: Uuid,
    ) -> Result<Vec<ApplicationEventRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationEventRecord>(
            r#"
            SELECT * FROM application_events
            WHERE application_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(application_id)
        .fetch_all(pool)
        .await
    }

    // ==================== 기업 ====================

    /// 기업 공고에 들어온 지원서 목록, 최신 순
    pub async fn list_for_employer(
        pool: &PgPool,
        employer_id: Uuid,
        filter: &EmployerApplicationFilter,
    ) -> Result<Vec<ApplicationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            r#"{}
            WHERE j.employer_id = $1
              AND ($2::UUID IS NULL OR a.job_id = $2)
              AND ($3::TEXT IS NULL OR a.status = $3)
            ORDER BY a.created_at DESC"#,
            APPLICATION_SELECT
        ))
        .bind(employer_id)
        .bind(filter.job_id)
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await
    }

    /// 기업 소유 공고의 지원서 조회
    pub async fn find_for_employer(
        pool: &PgPool,
        id: Uuid,
        employer_id: Uuid,
    ) -> Result<Option<ApplicationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "{} WHERE a.id = $1 AND j.employer_id = $2",
            APPLICATION_SELECT
        ))
        .bind(id)
        .bind(employer_id)
        .fetch_optional(pool)
        .await
    }

    /// 특정 구직자가 기업 공고에 낸 지원서 목록
    pub async fn list_for_candidate_and_employer(
        pool: &PgPool,
        candidate_id: Uuid,
        employer_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "{} WHERE a.candidate_id = $1 AND j.employer_id = $2 ORDER BY a.created_at DESC",
            APPLICATION_SELECT
        ))
        .bind(candidate_id)
        .bind(employer_id)
        .fetch_all(pool)
        .await
    }

    /// 기업 측 상태 변경
    ///
    /// 공고 소유권은 조인으로 확인합니다. 종료 상태이거나 같은 상태로의 변경은 거부합니다.
    pub async fn update_status_by_employer(
        pool: &PgPool,
        id: Uuid,
        employer_id: Uuid,
        update: &StatusUpdate,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<String> = sqlx::query_scalar(
            r#"
            SELECT a.status
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1 AND j.employer_id = $2
            FOR UPDATE OF a
            "#,
        )
        .bind(id)
        .bind(employer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(TransitionOutcome::NotFound);
        };
        let from = ApplicationStatus::parse(&current).unwrap_or(ApplicationStatus::Applied);
        if let Err(e) = from.transition_to(update.status) {
            return Ok(TransitionOutcome::Rejected(e));
        }

        sqlx::query(
            r#"
            UPDATE applications
            SET status = $2,
                step = $3,
                next_interview_at = COALESCE($4, next_interview_at),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.status.as_str())
        .bind(update.step.unwrap_or_else(|| update.status.default_step()))
        .bind(update.next_interview_at)
        .execute(&mut *tx)
        .await?;

        insert_event(
            &mut tx,
            id,
            employer_id,
            ApplicationEventType::StatusChange,
            Some(from),
            Some(update.status),
            update.message.as_deref(),
        )
        .await?;

        tx.commit().await?;
        Ok(TransitionOutcome::Updated)
    }
}
