//! 채용공고 타입.
//!
//! - `JobStatus` - 공고 상태 (초안/게시/마감)
//! - `EmploymentType` - 고용 형태
//! - `slugify` - 제목에서 URL 슬러그 생성

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 채용공고 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum JobStatus {
    /// 초안 (지원 불가)
    Draft,
    /// 게시됨
    Published,
    /// 마감
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(JobStatus::Draft),
            "published" => Some(JobStatus::Published),
            "closed" => Some(JobStatus::Closed),
            _ => None,
        }
    }

    /// 지원서를 받을 수 있는 상태인지 확인.
    pub fn accepts_applications(&self) -> bool {
        matches!(self, JobStatus::Published)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 고용 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
            EmploymentType::Temporary => "temporary",
        }
    }

    /// 문자열 파싱. `full-time`, `FULL_TIME` 같은 변형도 허용합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full_time" => Some(EmploymentType::FullTime),
            "part_time" => Some(EmploymentType::PartTime),
            "contract" => Some(EmploymentType::Contract),
            "internship" => Some(EmploymentType::Internship),
            "temporary" => Some(EmploymentType::Temporary),
            _ => None,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 급여 범위 검증.
///
/// 둘 다 있으면 `min <= max`, 음수 불가.
pub fn validate_salary_range(min: Option<i32>, max: Option<i32>) -> Result<(), &'static str> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err("급여는 음수일 수 없습니다");
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err("최소 급여가 최대 급여보다 클 수 없습니다");
        }
    }
    Ok(())
}

/// 제목을 URL 슬러그로 변환합니다.
///
/// ASCII 영숫자만 남기고 나머지는 `-`로 접습니다. 결과가 비면 `"job"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "job".to_string()
    } else {
        slug
    }
}

/// 고유 슬러그 생성: `slugify(title)` + 공고 id 앞 8자리.
pub fn job_slug(title: &str, id: Uuid) -> String {
    let simple = id.simple().to_string();
    format!("{}-{}", slugify(title), &simple[..8])
}
