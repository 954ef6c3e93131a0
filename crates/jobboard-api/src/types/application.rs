//! 지원서 응답 타입.

use jobboard_core::{ApplicationEventType, ApplicationStatus, JobStatus};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::{ApplicationEventRecord, ApplicationRecord};
use crate::utils::{company_or_unknown, format_timestamp, format_timestamp_opt, or_empty};

/// 지원서
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub step: i32,
    pub cover_letter: String,
    pub next_interview_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub job: ApplicationJob,
    pub candidate: ApplicationCandidate,
}

/// 지원서에 포함되는 공고 요약
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJob {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub company_name: String,
    pub location: String,
    pub status: JobStatus,
}

/// 지원자 요약
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCandidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        let status = record.status().unwrap_or(ApplicationStatus::Applied);
        Self {
            id: record.id,
            job_id: record.job_id,
            status,
            step: record.step,
            cover_letter: or_empty(record.cover_letter),
            next_interview_at: format_timestamp_opt(record.next_interview_at.as_ref()),
            created_at: format_timestamp(&record.created_at),
            updated_at: format_timestamp(&record.updated_at),
            job: ApplicationJob {
                id: record.job_id,
                title: record.job_title,
                slug: record.job_slug,
                company_name: company_or_unknown(record.company_name),
                location: or_empty(record.job_location),
                status: JobStatus::parse(&record.job_status).unwrap_or(JobStatus::Draft),
            },
            candidate: ApplicationCandidate {
                id: record.candidate_id,
                name: or_empty(record.candidate_name),
                email: record.candidate_email,
            },
        }
    }
}

/// 지원 이력 항목
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub actor_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub event_type: ApplicationEventType,
    pub from_status: Option<ApplicationStatus>,
    pub to_status: Option<ApplicationStatus>,
    pub message: String,
    pub created_at: String,
}

impl From<ApplicationEventRecord> for EventResponse {
    fn from(record: ApplicationEventRecord) -> Self {
        Self {
            id: record.id,
            application_id: record.application_id,
            actor_id: record.actor_id,
            event_type: ApplicationEventType::parse(&record.event_type)
                .unwrap_or(ApplicationEventType::Note),
            from_status: record.from_status.as_deref().and_then(ApplicationStatus::parse),
            to_status: record.to_status.as_deref().and_then(ApplicationStatus::parse),
            message: or_empty(record.message),
            created_at: format_timestamp(&record.created_at),
        }
    }
}
