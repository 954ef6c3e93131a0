//! 사용자 역할 및 인증 제공자.
//!
//! 역할은 가입 시 고정되며, 어떤 라우트가 토큰을 받아들이는지를 결정합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Role {
    /// 구직자
    Candidate,
    /// 채용 담당자 (기업)
    Employer,
    /// 관리자
    Admin,
}

impl Role {
    /// DB 저장용 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }

    /// 문자열에서 역할 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "candidate" => Some(Role::Candidate),
            "employer" => Some(Role::Employer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// 셀프 가입으로 만들 수 있는 역할인지 확인.
    ///
    /// 관리자 계정은 가입 API로 만들 수 없습니다.
    pub fn is_self_service(&self) -> bool {
        matches!(self, Role::Candidate | Role::Employer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 인증 제공자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum AuthProvider {
    /// 이메일 + 비밀번호
    Credentials,
    /// Google ID 토큰
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Credentials => "credentials",
            AuthProvider::Google => "google",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "credentials" => Some(AuthProvider::Credentials),
            "google" => Some(AuthProvider::Google),
            _ => None,
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 이메일 정규화 (앞뒤 공백 제거 + 소문자).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("candidate"), Some(Role::Candidate));
        assert_eq!(Role::parse("EMPLOYER"), Some(Role::Employer));
        assert_eq!(Role::parse(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse("recruiter"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Employer).unwrap();
        assert_eq!(json, "\"employer\"");

        let parsed: Role = serde_json::from_str("\"candidate\"").unwrap();
        assert_eq!(parsed, Role::Candidate);
    }

    #[test]
    fn test_self_service_roles() {
        assert!(Role::Candidate.is_self_service());
        assert!(Role::Employer.is_self_service());
        assert!(!Role::Admin.is_self_service());
    }

    #[test]
    fn test_provider_round_trip_strings() {
        for provider in [AuthProvider::Credentials, AuthProvider::Google] {
            assert_eq!(AuthProvider::parse(provider.as_str()), Some(provider));
        }
        assert_eq!(AuthProvider::parse("github"), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }
}
