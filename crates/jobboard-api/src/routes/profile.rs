//! 구직자 프로필 API 라우트
//!
//! - `GET /api/profile` - 내 프로필 + 보유 기술
//! - `PUT /api/profile` - 프로필 저장 및 기술 목록 교체

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::CandidateAuth;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::repository::{ProfileInput, ProfileRecord, ProfileRepository, SkillInput, SkillRecord};
use crate::state::AppState;
use crate::utils::{format_timestamp, non_blank, or_empty, required_text, ValidatedJson};

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 보유 기술
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SkillDto {
    #[validate(length(min = 1, max = 100, message = "기술 이름을 입력하세요"))]
    pub name: String,
    #[validate(length(max = 50))]
    pub level: Option<String>,
}

/// 프로필 응답. 프로필이 없으면 빈 값으로 채웁니다.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub headline: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
    pub resume_url: String,
    pub years_experience: Option<i32>,
    pub skills: Vec<SkillDto>,
    pub updated_at: Option<String>,
}

impl ProfileResponse {
    pub fn new(profile: Option<ProfileRecord>, skills: Vec<SkillRecord>) -> Self {
        let skills = skills
            .into_iter()
            .map(|s| SkillDto {
                name: s.name,
                level: s.level,
            })
            .collect();

        match profile {
            Some(p) => Self {
                headline: or_empty(p.headline),
                bio: or_empty(p.bio),
                location: or_empty(p.location),
                phone: or_empty(p.phone),
                resume_url: or_empty(p.resume_url),
                years_experience: p.years_experience,
                skills,
                updated_at: Some(format_timestamp(&p.updated_at)),
            },
            None => Self {
                headline: String::new(),
                bio: String::new(),
                location: String::new(),
                phone: String::new(),
                resume_url: String::new(),
                years_experience: None,
                skills,
                updated_at: None,
            },
        }
    }
}

/// 프로필 저장 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 200))]
    pub headline: Option<String>,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(url(message = "올바른 URL이 아닙니다"))]
    pub resume_url: Option<String>,
    #[validate(range(min = 0, max = 80))]
    pub years_experience: Option<i32>,
    #[validate(length(max = 50), nested)]
    pub skills: Vec<SkillDto>,
}

/// 기술 이름을 정리하고 대소문자 무시 중복을 제거합니다. 처음 나온 항목이 남습니다.
fn dedupe_skills(skills: Vec<SkillDto>) -> Vec<SkillInput> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter_map(|skill| {
            let name = required_text(&skill.name)?;
            seen.insert(name.to_lowercase()).then(|| SkillInput {
                name,
                level: non_blank(skill.level),
            })
        })
        .collect()
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 내 프로필 조회
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "프로필", body = ProfileResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse)
    )
)]
pub async fn get_profile(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProfileResponse>> {
    let pool = state.db()?;
    let user_id = claims.user_id();

    let profile = ProfileRepository::find(pool, user_id).await?;
    let skills = ProfileRepository::list_skills(pool, user_id).await?;

    Ok(Json(ProfileResponse::new(profile, skills)))
}

/// 프로필 저장
///
/// 프로필은 upsert, 기술 목록은 요청 내용으로 통째로 교체합니다.
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "저장된 프로필", body = ProfileResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse)
    )
)]
pub async fn update_profile(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = claims.user_id();
    let input = ProfileInput {
        headline: non_blank(req.headline),
        bio: non_blank(req.bio),
        location: non_blank(req.location),
        phone: non_blank(req.phone),
        resume_url: non_blank(req.resume_url),
        years_experience: req.years_experience,
    };
    let skills = dedupe_skills(req.skills);

    let (profile, skills) =
        ProfileRepository::upsert_with_skills(state.db()?, user_id, &input, &skills).await?;
    debug!(user_id = %user_id, skills = skills.len(), "프로필 저장");

    Ok(Json(ProfileResponse::new(Some(profile), skills)))
}

/// 프로필 라우터 생성.
pub fn profile_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> SkillDto {
        SkillDto {
            name: name.to_string(),
            level: None,
        }
    }

    #[test]
    fn test_dedupe_skills() {
        let skills = dedupe_skills(vec![skill(" Rust "), skill("rust"), skill("SQL"), skill("  ")]);
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_empty_profile_response() {
        let json = serde_json::to_value(ProfileResponse::new(None, vec![])).unwrap();
        assert_eq!(json["headline"], "");
        assert_eq!(json["resumeUrl"], "");
        assert!(json["updatedAt"].is_null());
        assert_eq!(json["skills"], serde_json::json!([]));
    }

    #[test]
    fn test_update_request_validation() {
        let req: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "resumeUrl": "not a url",
            "yearsExperience": 120
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }
}
