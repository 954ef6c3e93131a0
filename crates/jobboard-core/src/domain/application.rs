//! 지원서 상태 및 이벤트 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// 지원서 상태.
///
/// `Withdrawn`, `Hired`, `Rejected`는 종결 상태로, 이후 전이가 불가능합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ApplicationStatus {
    Applied,
    Reviewing,
    Interview,
    Offer,
    Hired,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Some(ApplicationStatus::Applied),
            "reviewing" => Some(ApplicationStatus::Reviewing),
            "interview" => Some(ApplicationStatus::Interview),
            "offer" => Some(ApplicationStatus::Offer),
            "hired" => Some(ApplicationStatus::Hired),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }

    /// 종결 상태 여부.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Withdrawn | ApplicationStatus::Hired | ApplicationStatus::Rejected
        )
    }

    /// 다음 상태로 전이 가능한지 확인.
    ///
    /// 종결 상태에서는 어디로도 갈 수 없고, 같은 상태로의 전이도 허용하지 않습니다.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        !self.is_terminal() && *self != next
    }

    /// 전이를 검증하고, 불가능하면 `CoreError::InvalidTransition`.
    pub fn transition_to(&self, next: ApplicationStatus) -> CoreResult<ApplicationStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// 상태별 기본 진행 단계 (1부터 시작).
    pub fn default_step(&self) -> i32 {
        match self {
            ApplicationStatus::Applied => 1,
            ApplicationStatus::Reviewing => 2,
            ApplicationStatus::Interview => 3,
            ApplicationStatus::Offer => 4,
            ApplicationStatus::Hired => 5,
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => 1,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 지원서 이벤트 타입 (추가 전용 이력).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ApplicationEventType {
    /// 지원 생성
    Applied,
    /// 상태 변경
    StatusChange,
    /// 메모
    Note,
}

impl ApplicationEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationEventType::Applied => "applied",
            ApplicationEventType::StatusChange => "status_change",
            ApplicationEventType::Note => "note",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Some(ApplicationEventType::Applied),
            "status_change" => Some(ApplicationEventType::StatusChange),
            "note" => Some(ApplicationEventType::Note),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
