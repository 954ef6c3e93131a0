//! 채용공고 응답 타입.

use jobboard_core::{EmploymentType, JobStatus};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::{EmployerJobRecord, JobRecord, SavedJobRecord};
use crate::utils::{company_or_unknown, format_timestamp, format_timestamp_opt, or_empty};

fn employment_type(raw: &str) -> EmploymentType {
    EmploymentType::parse(raw).unwrap_or(EmploymentType::FullTime)
}

fn job_status(raw: &str) -> JobStatus {
    JobStatus::parse(raw).unwrap_or(JobStatus::Draft)
}

/// 공고 목록 항목
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub remote: bool,
    pub employment_type: EmploymentType,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub status: JobStatus,
    pub published_at: Option<String>,
    pub created_at: String,
}

impl From<&JobRecord> for JobSummary {
    fn from(record: &JobRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug.clone(),
            title: record.title.clone(),
            company_name: company_or_unknown(record.company_name.clone()),
            location: or_empty(record.location.clone()),
            remote: record.remote,
            employment_type: employment_type(&record.employment_type),
            salary_min: record.salary_min,
            salary_max: record.salary_max,
            salary_currency: or_empty(record.salary_currency.clone()),
            status: job_status(&record.status),
            published_at: format_timestamp_opt(record.published_at.as_ref()),
            created_at: format_timestamp(&record.created_at),
        }
    }
}

impl From<JobRecord> for JobSummary {
    fn from(record: JobRecord) -> Self {
        Self::from(&record)
    }
}

/// 공고 상세
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub description: String,
    /// 로그인한 구직자의 지원 여부
    pub is_applied: bool,
    /// 로그인한 구직자의 저장 여부
    pub is_saved: bool,
}

impl JobDetail {
    pub fn new(record: JobRecord, is_applied: bool, is_saved: bool) -> Self {
        Self {
            summary: JobSummary::from(&record),
            description: or_empty(record.description),
            is_applied,
            is_saved,
        }
    }
}

/// 기업 화면의 공고 (지원자 수 포함)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployerJobResponse {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub description: String,
    pub application_count: i64,
}

impl From<EmployerJobRecord> for EmployerJobResponse {
    fn from(record: EmployerJobRecord) -> Self {
        Self {
            summary: JobSummary::from(&record.job),
            description: or_empty(record.job.description),
            application_count: record.application_count,
        }
    }
}

impl From<JobRecord> for EmployerJobResponse {
    fn from(record: JobRecord) -> Self {
        EmployerJobRecord {
            job: record,
            application_count: 0,
        }
        .into()
    }
}

/// 관심 공고
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub saved_at: String,
    pub job: SavedJobCard,
}

/// 관심 공고에 포함되는 공고 요약
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobCard {
    pub title: String,
    pub slug: String,
    pub company_name: String,
    pub location: String,
    pub remote: bool,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub published_at: Option<String>,
}

impl From<SavedJobRecord> for SavedJobResponse {
    fn from(record: SavedJobRecord) -> Self {
        Self {
            id: record.id,
            job_id: record.job_id,
            saved_at: format_timestamp(&record.created_at),
            job: SavedJobCard {
                title: record.job_title,
                slug: record.job_slug,
                company_name: company_or_unknown(record.company_name),
                location: or_empty(record.job_location),
                remote: record.job_remote,
                employment_type: employment_type(&record.job_employment_type),
                status: job_status(&record.job_status),
                published_at: format_timestamp_opt(record.job_published_at.as_ref()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record() -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            slug: "rust-engineer-1a2b3c4d".to_string(),
            title: "Rust Engineer".to_string(),
            description: None,
            location: None,
            remote: true,
            employment_type: "part_time".to_string(),
            salary_min: Some(50_000),
            salary_max: None,
            salary_currency: None,
            status: "published".to_string(),
            published_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            company_name: None,
        }
    }

    #[test]
    fn test_summary_applies_sentinels() {
        let json = serde_json::to_value(JobSummary::from(record())).unwrap();
        assert_eq!(json["companyName"], "Unknown company");
        assert_eq!(json["location"], "");
        assert_eq!(json["salaryCurrency"], "");
        assert_eq!(json["employmentType"], "part_time");
        assert_eq!(json["status"], "published");
        assert!(json["salaryMax"].is_null());
    }

    #[test]
    fn test_detail_flattens_summary() {
        let json = serde_json::to_value(JobDetail::new(record(), true, false)).unwrap();
        assert_eq!(json["title"], "Rust Engineer");
        assert_eq!(json["description"], "");
        assert_eq!(json["isApplied"], true);
        assert_eq!(json["isSaved"], false);
    }
}
